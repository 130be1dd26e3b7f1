use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A `gh api graphql` call exited with a non-zero status.
    #[error("Internal error: execute_query\ncommand: {command}\n{stderr}")]
    Query { command: String, stderr: String },

    /// The derived short name is already taken by a tracked plugin or a built-in.
    #[error("There is already an installed extension with that name: {name}")]
    NameCollision { name: String },

    #[error("invalid plugin reference: {plugin:?}")]
    InvalidPlugin { plugin: String },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Settings(#[from] toml::de::Error),
}
