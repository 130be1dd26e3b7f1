pub mod builtin;
pub mod installer;
pub mod naming;

pub use builtin::BuiltinCommands;
pub use installer::{InstallOutcome, PluginInstaller};
pub use naming::{NamingConvention, derive_short_name, is_first_party};
