//! Thin wrappers over the `gh` subcommands this tool issues.

pub mod graphql;
pub mod org;
pub mod repo;

use crate::shell::{CommandLine, Shell, ShellOutput};

pub use graphql::{execute_query, try_execute_query};
pub use org::{get_members_from_org, members_query};

pub const DEFAULT_BINARY: &str = "gh";

/// A `gh` binary bound to the shell that runs it.
#[derive(Clone, Copy)]
pub struct GhCli<'a> {
    shell: &'a dyn Shell,
    binary: &'a str,
}

impl<'a> GhCli<'a> {
    pub fn new(shell: &'a dyn Shell, binary: &'a str) -> Self {
        Self { shell, binary }
    }

    pub fn shell(&self) -> &'a dyn Shell {
        self.shell
    }

    /// Start a command line for the bound binary.
    pub fn command(&self) -> CommandLine {
        CommandLine::new(self.binary)
    }

    pub fn exec(&self, command: &CommandLine) -> ShellOutput {
        self.shell.exec(command)
    }
}
