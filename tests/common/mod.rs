#![allow(dead_code)]

use std::cell::RefCell;

use gh_edu::shell::{CommandLine, Shell, ShellOutput};

/// Scripted `gh`: answers each command with the first rule whose argv
/// prefix matches, and records every invocation.
#[derive(Default)]
pub struct MockShell {
    rules: Vec<(Vec<String>, ShellOutput)>,
    calls: RefCell<Vec<CommandLine>>,
}

impl MockShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, args: &[&str], output: ShellOutput) -> Self {
        self.rules
            .push((args.iter().map(|a| a.to_string()).collect(), output));
        self
    }

    pub fn calls(&self) -> Vec<CommandLine> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Shell for MockShell {
    fn exec(&self, command: &CommandLine) -> ShellOutput {
        self.calls.borrow_mut().push(command.clone());
        self.rules
            .iter()
            .find(|(prefix, _)| command.args.starts_with(prefix))
            .map(|(_, output)| output.clone())
            .unwrap_or_else(|| ShellOutput::failed(1, format!("unexpected command: {command}\n")))
    }
}
