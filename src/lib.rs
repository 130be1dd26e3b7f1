//! gh-edu
//!
//! Installs and tracks education plugins (GitHub repositories shipped as
//! `gh` extensions) and queries organization membership through the GitHub
//! CLI.

pub mod error;
pub mod gh;
pub mod model;
pub mod plugin;
pub mod shell;
pub mod util;

pub use error::{Error, Result};
