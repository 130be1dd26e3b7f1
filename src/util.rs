//! Small helpers shared by the subcommands.

use serde_json::Value;

use crate::error::Result;
use crate::gh::GhCli;
use crate::gh::org::split_lines;
use crate::gh::repo;
use crate::shell::run_command;

pub use crate::plugin::naming::is_first_party;

/// Re-indent a JSON document with two spaces.
pub fn beautify(json: &str) -> Result<String> {
    let value: Value = serde_json::from_str(json)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

/// True only for `{}`. `null`, arrays and scalars are not empty objects.
pub fn is_obj_empty(value: &Value) -> bool {
    matches!(value, Value::Object(map) if map.is_empty())
}

/// True if `pattern` compiles. Nothing is matched.
pub fn is_valid_regex(pattern: &str) -> bool {
    regex::Regex::new(pattern).is_ok()
}

pub fn print(silent: bool, message: &str) {
    if !silent {
        println!("{message}");
    }
}

pub fn prefix_org<S: AsRef<str>>(names: &[S], org: &str) -> Vec<String> {
    names
        .iter()
        .map(|name| format!("{org}/{}", name.as_ref()))
        .collect()
}

/// Logins of the organizations the authenticated user belongs to.
pub fn fetch_orgs(gh: &GhCli<'_>) -> Vec<String> {
    let command = gh.command().args([
        "api",
        "--paginate",
        "/user/memberships/orgs",
        "--jq",
        ".[].organization.login",
    ]);
    split_lines(run_command(gh.shell(), &command, true).trim_end())
        .into_iter()
        .map(|org| org.trim().to_string())
        .filter(|org| !org.is_empty())
        .collect()
}

/// `name` if the authenticated user is a member of that organization.
pub fn find_org(gh: &GhCli<'_>, name: &str) -> Option<String> {
    fetch_orgs(gh).into_iter().find(|org| org == name)
}

/// Clone URL for each `org/repo`, resolved with `gh browse -n`.
pub fn names_to_urls<S: AsRef<str>>(gh: &GhCli<'_>, names: &[S]) -> Vec<String> {
    names
        .iter()
        .map(|name| {
            let url = repo::browse_url(gh, name.as_ref());
            format!("{}.git", url.trim_end())
        })
        .collect()
}
