use std::fs;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::gh::DEFAULT_BINARY;
use crate::plugin::naming::NamingConvention;

const DEFAULTS: &str = include_str!("../../config/default.toml");
const SETTINGS_FILE: &str = "settings.toml";
const STORE_FILE: &str = "data.json";

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub github: GithubSettings,
    pub store: StoreSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize)]
pub struct GithubSettings {
    #[serde(default = "default_binary")]
    pub binary: String,
    /// Namespace first-party plugins are resolved under.
    pub organization: String,
    pub plugin_prefix: String,
}

#[derive(Debug, Deserialize)]
pub struct StoreSettings {
    pub path: String,
    #[serde(default)]
    pub builtin_dir: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoggingSettings {
    pub filter: String,
}

impl Settings {
    /// Load settings with layering: defaults → user settings file.
    pub fn load() -> Result<Self> {
        let user_path = project_dirs().map(|dirs| dirs.config_dir().join(SETTINGS_FILE));

        let user = match user_path {
            Some(path) if path.exists() => {
                debug!(path = %path.display(), "loading user settings");
                Some(fs::read_to_string(&path).map_err(|source| Error::Io { path, source })?)
            }
            _ => None,
        };

        Self::from_layers(DEFAULTS, user.as_deref())
    }

    /// Deep-merge `user` over `defaults`; keys absent from `user` keep their default.
    pub fn from_layers(defaults: &str, user: Option<&str>) -> Result<Self> {
        let mut merged: toml::Value = toml::from_str(defaults)?;
        if let Some(user) = user {
            merge(&mut merged, toml::from_str(user)?);
        }

        let mut settings: Settings = merged.try_into()?;
        settings.store.path = expand_tilde(&settings.store.path);
        settings.store.builtin_dir = settings
            .store
            .builtin_dir
            .take()
            .filter(|dir| !dir.is_empty())
            .map(|dir| expand_tilde(&dir));

        Ok(settings)
    }

    pub fn store_path(&self) -> PathBuf {
        if !self.store.path.is_empty() {
            return PathBuf::from(&self.store.path);
        }

        project_dirs()
            .map(|dirs| dirs.data_dir().join(STORE_FILE))
            .unwrap_or_else(|| PathBuf::from(".gh-edu").join(STORE_FILE))
    }

    pub fn builtin_dir(&self) -> Option<PathBuf> {
        self.store.builtin_dir.as_ref().map(PathBuf::from)
    }

    pub fn naming(&self) -> NamingConvention {
        NamingConvention::new(&self.github.organization, &self.github.plugin_prefix)
    }
}

fn default_binary() -> String {
    DEFAULT_BINARY.to_string()
}

pub fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", "gh-edu")
}

fn merge(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

fn expand_tilde(path: &str) -> String {
    if !path.starts_with('~') {
        return path.to_string();
    }

    match directories::BaseDirs::new() {
        Some(base_dirs) => path.replacen('~', &base_dirs.home_dir().to_string_lossy(), 1),
        None => path.to_string(),
    }
}
