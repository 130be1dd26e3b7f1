use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Error, Result};

/// A plugin tracked by gh-edu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandRecord {
    /// Canonical `org/repo` reference the plugin was installed from.
    pub original_name: String,
    /// Abbreviated SHA of the default branch head at install time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_commit: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    commands: IndexMap<String, CommandRecord>,
    /// Top-level fields owned by other commands; carried through untouched.
    #[serde(flatten)]
    other: Map<String, Value>,
}

/// JSON-backed store of installed plugins, keyed by short name.
///
/// Loaded once, mutated in memory, saved back as a whole file.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    file: ConfigFile,
}

impl ConfigStore {
    /// Read the store at `path`. A missing file is an empty store.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => ConfigFile::default(),
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no store yet, starting empty");
                ConfigFile::default()
            }
            Err(source) => return Err(Error::Io { path, source }),
        };

        Ok(Self { path, file })
    }

    /// Write the whole store back (temp file + rename).
    pub fn save(&self) -> Result<()> {
        let io_err = |source: std::io::Error| Error::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut json = serde_json::to_string_pretty(&self.file)?;
        json.push('\n');

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, json).map_err(io_err)?;
        fs::rename(&temp_path, &self.path).map_err(io_err)?;

        debug!(path = %self.path.display(), commands = self.file.commands.len(), "store saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, short_name: &str) -> Option<&CommandRecord> {
        self.file.commands.get(short_name)
    }

    pub fn contains(&self, short_name: &str) -> bool {
        self.file.commands.contains_key(short_name)
    }

    /// True if any record was installed from `original_name`.
    pub fn has_original(&self, original_name: &str) -> bool {
        self.file
            .commands
            .values()
            .any(|record| record.original_name == original_name)
    }

    /// Insert `record` ahead of every existing entry.
    pub fn prepend(&mut self, short_name: impl Into<String>, record: CommandRecord) {
        self.file.commands.shift_insert(0, short_name.into(), record);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CommandRecord)> {
        self.file
            .commands
            .iter()
            .map(|(name, record)| (name.as_str(), record))
    }

    pub fn len(&self) -> usize {
        self.file.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.file.commands.is_empty()
    }
}
