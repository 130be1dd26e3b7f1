use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::time::Instant;

use tracing::{debug, warn};

use super::{CommandLine, Shell, ShellOutput};

/// Spawns processes directly, without a shell in between.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemShell;

impl Shell for SystemShell {
    fn exec(&self, command: &CommandLine) -> ShellOutput {
        debug!(program = %command.program, args = ?command.args, "Executing subprocess");
        let start = Instant::now();

        let output = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .output();

        match output {
            Ok(output) => {
                let result = ShellOutput {
                    code: output.status.code(),
                    stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                    stderr: String::from_utf8_lossy(&output.stderr).to_string(),
                };
                debug!(
                    exit_code = ?result.code,
                    duration_ms = start.elapsed().as_millis(),
                    "Subprocess completed"
                );
                result
            }
            Err(e) => {
                warn!(program = %command.program, error = %e, "Failed to spawn subprocess");
                ShellOutput {
                    code: None,
                    stdout: String::new(),
                    stderr: format!("Failed to spawn {}: {e}\n", command.program),
                }
            }
        }
    }
}

/// Run `command` and return whatever it wrote to stdout.
///
/// Failures are soft. With `silent` set, a non-zero exit writes a diagnostic
/// and the captured stderr to the error stream; otherwise the captured
/// streams are echoed as the child produced them.
pub fn run_command(shell: &dyn Shell, command: &CommandLine, silent: bool) -> String {
    run_command_with(shell, command, silent, &mut io::stdout(), &mut io::stderr())
}

/// [`run_command`] writing to the given streams instead of the process's own.
pub fn run_command_with(
    shell: &dyn Shell,
    command: &CommandLine,
    silent: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> String {
    let result = shell.exec(command);

    if silent {
        if !result.success() {
            let _ = writeln!(err, "Internal error: run_command: {command}");
            let _ = err.write_all(result.stderr.as_bytes());
        }
    } else {
        let _ = out.write_all(result.stdout.as_bytes());
        let _ = err.write_all(result.stderr.as_bytes());
    }

    result.stdout
}
