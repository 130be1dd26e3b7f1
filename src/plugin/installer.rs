use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::gh::GhCli;
use crate::gh::repo;
use crate::model::config::{CommandRecord, ConfigStore};
use crate::plugin::builtin::BuiltinCommands;
use crate::plugin::naming::{NamingConvention, derive_short_name, repository_url};
use crate::util::print;

/// Part of the message `gh extension install` prints when another extension
/// already provides the same command. Pinned to gh's English output.
pub const ALREADY_PROVIDES: &str = "there is already an installed extension that provides";

const COMMIT_ABBREV_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Installed and recorded in the store.
    Installed {
        short_name: String,
        record: CommandRecord,
    },
    /// The plugin (or a built-in with that name) was already there. Nothing changed.
    AlreadyInstalled,
    /// `gh extension install` failed. The store was not touched.
    InstallFailed { stderr: String },
}

pub struct PluginInstaller<'a> {
    gh: GhCli<'a>,
    naming: NamingConvention,
    builtins: &'a BuiltinCommands,
    quiet: bool,
}

impl<'a> PluginInstaller<'a> {
    pub fn new(gh: GhCli<'a>, naming: NamingConvention, builtins: &'a BuiltinCommands) -> Self {
        Self {
            gh,
            naming,
            builtins,
            quiet: false,
        }
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Install `plugin` as a gh extension and track it in `store`.
    ///
    /// Fails with [`Error::NameCollision`] when the derived short name is
    /// taken; the caller is expected to exit non-zero.
    pub fn install(&self, store: &mut ConfigStore, plugin: &str) -> Result<InstallOutcome> {
        if plugin.trim().is_empty() {
            return Err(Error::InvalidPlugin {
                plugin: plugin.to_string(),
            });
        }

        if self.is_installed(store, plugin) {
            eprintln!("{plugin} is already installed");
            return Ok(InstallOutcome::AlreadyInstalled);
        }

        let canonical = self.naming.canonical(plugin);
        let url = repository_url(&canonical);
        let short_name = derive_short_name(&canonical);
        if short_name.is_empty() {
            return Err(Error::InvalidPlugin { plugin: canonical });
        }

        if store.contains(&short_name) || self.builtins.contains(&short_name) {
            eprintln!("There is already an installed extension with that name: {short_name}");
            return Err(Error::NameCollision { name: short_name });
        }

        print(self.quiet, &format!("Installing {canonical} ..."));
        let result = repo::extension_install(&self.gh, &url);
        if !result.success() && !result.stderr.contains(ALREADY_PROVIDES) {
            // The extension may now be on disk but untracked; that is left as is.
            warn!(%canonical, exit_code = ?result.code, "gh extension install failed");
            eprint!("{}", result.stderr.replace("edu-", ""));
            return Ok(InstallOutcome::InstallFailed {
                stderr: result.stderr,
            });
        }
        print(self.quiet, "Plugin installed in system");

        print(self.quiet, "Setting up configuration...");
        let record = CommandRecord {
            original_name: canonical.clone(),
            last_commit: self.last_commit(&canonical),
        };
        store.prepend(short_name.clone(), record.clone());
        store.save()?;

        info!(
            %canonical,
            %short_name,
            last_commit = ?record.last_commit,
            store = %store.path().display(),
            "plugin installed"
        );
        Ok(InstallOutcome::Installed { short_name, record })
    }

    fn is_installed(&self, store: &ConfigStore, plugin: &str) -> bool {
        store.has_original(plugin) || self.builtins.contains(plugin)
    }

    /// Abbreviated head commit of the default branch; `None` if either lookup fails.
    fn last_commit(&self, canonical: &str) -> Option<String> {
        let sha = repo::default_branch(&self.gh, canonical)
            .and_then(|branch| repo::head_commit_sha(&self.gh, canonical, &branch));

        let Some(sha) = sha else {
            warn!(%canonical, "could not resolve last commit");
            eprintln!("Couldn't get default branch for {canonical}. Skipping last commit info");
            return None;
        };

        Some(sha.chars().take(COMMIT_ABBREV_LEN).collect())
    }
}
