//! Repository-level `gh` calls used by the installer and URL helpers.

use serde::Deserialize;
use tracing::debug;

use super::GhCli;
use crate::shell::{ShellOutput, run_command};

#[derive(Debug, Deserialize)]
struct CommitResponse {
    sha: Option<String>,
}

/// `gh extension install <url>`, captured without echoing.
pub fn extension_install(gh: &GhCli<'_>, url: &str) -> ShellOutput {
    gh.exec(&gh.command().args(["extension", "install", url]))
}

/// Default branch of `repo` (`org/name`), or `None` when the lookup fails.
pub fn default_branch(gh: &GhCli<'_>, repo: &str) -> Option<String> {
    let endpoint = format!("/repos/{repo}");
    let command = gh
        .command()
        .args(["api", endpoint.as_str(), "--jq", ".default_branch"]);
    let branch = run_command(gh.shell(), &command, true);
    let branch = branch.trim();
    (!branch.is_empty() && branch != "null").then(|| branch.to_string())
}

/// Full SHA of the head commit of `branch`, or `None` when it can't be fetched.
pub fn head_commit_sha(gh: &GhCli<'_>, repo: &str, branch: &str) -> Option<String> {
    let command = gh
        .command()
        .arg("api")
        .arg(format!("/repos/{repo}/commits/{branch}"));
    let result = gh.exec(&command);
    if !result.success() {
        debug!(%repo, %branch, exit_code = ?result.code, "commit lookup failed");
        return None;
    }

    match serde_json::from_str::<CommitResponse>(&result.stdout) {
        Ok(commit) => commit.sha,
        Err(err) => {
            debug!(%repo, %branch, "unparsable commit response: {err}");
            None
        }
    }
}

/// Web URL of `repo` as printed by `gh browse -n`.
pub fn browse_url(gh: &GhCli<'_>, repo: &str) -> String {
    run_command(
        gh.shell(),
        &gh.command().args(["browse", "-n", "--repo", repo]),
        true,
    )
}
