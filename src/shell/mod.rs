//! Synchronous process execution.
//!
//! Every external call goes through the [`Shell`] trait so the workflows can
//! be driven by a scripted shell in tests.

mod command;
mod system;

pub use command::{CommandLine, ShellOutput};
pub use system::{SystemShell, run_command, run_command_with};

pub trait Shell {
    /// Run `command` to completion and capture its output.
    ///
    /// Never fails: a process that could not be spawned is reported as an
    /// unsuccessful [`ShellOutput`] carrying the spawn error on stderr.
    fn exec(&self, command: &CommandLine) -> ShellOutput;
}
