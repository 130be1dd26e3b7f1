use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use tracing::warn;

/// Subcommands of this binary; a plugin may never shadow them.
pub const BUILTIN_COMMANDS: &[&str] = &["install", "list", "members", "orgs", "urls"];

/// Names reserved by commands shipped with the base installation.
#[derive(Debug, Clone, Default)]
pub struct BuiltinCommands {
    names: BTreeSet<String>,
}

impl BuiltinCommands {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// [`BUILTIN_COMMANDS`] plus every entry (file or directory) of `dir`.
    pub fn discover(dir: Option<&Path>) -> Self {
        let mut builtins = Self::new(BUILTIN_COMMANDS.iter().copied());

        let Some(dir) = dir else {
            return builtins;
        };

        match fs::read_dir(dir) {
            Ok(entries) => {
                builtins.names.extend(
                    entries
                        .filter_map(|entry| entry.ok())
                        .map(|entry| entry.file_name().to_string_lossy().into_owned()),
                );
            }
            Err(err) => {
                warn!("failed to list built-in commands in {}: {err}", dir.display());
            }
        }

        builtins
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
