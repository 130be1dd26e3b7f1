use tracing::debug;

use super::GhCli;
use crate::error::{Error, Result};

/// Run a paginated GraphQL query.
///
/// `options` are passed to `gh api graphql` ahead of the query, e.g.
/// `["--jq", ".data.viewer.login"]`.
pub fn execute_query(gh: &GhCli<'_>, query: &str, options: &[&str]) -> Result<String> {
    let command = gh
        .command()
        .args(["api", "graphql", "--paginate"])
        .args(options.iter().copied())
        .arg("-f")
        .arg(format!("query={query}"));

    let result = gh.exec(&command);
    if !result.success() {
        debug!(exit_code = ?result.code, "GraphQL query failed");
        return Err(Error::Query {
            command: command.to_string(),
            stderr: result.stderr,
        });
    }

    Ok(result.stdout)
}

/// Same as [`execute_query`] but reports failure as a flag instead of an error.
///
/// With `debug` set the output (or the error) is printed.
pub fn try_execute_query(
    gh: &GhCli<'_>,
    query: &str,
    debug: bool,
    options: &[&str],
) -> (String, bool) {
    match execute_query(gh, query, options) {
        Ok(output) => {
            if debug {
                println!("{output}");
            }
            (output, true)
        }
        Err(err) => {
            if debug {
                eprintln!("{err}");
            }
            (String::new(), false)
        }
    }
}
