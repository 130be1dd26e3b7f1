use super::GhCli;
use super::graphql::execute_query;
use crate::error::Result;

const MEMBERS_PAGE_SIZE: u32 = 60;
const MEMBER_LOGINS_FILTER: &str = ".data.organization.membersWithRole.nodes[].login";

/// GraphQL query listing the members of the `$org` variable, one page per `$endCursor`.
pub fn members_query() -> String {
    format!(
        r#"
query ($org: String!, $endCursor: String) {{
  organization(login: $org) {{
    membersWithRole(first: {MEMBERS_PAGE_SIZE}, after: $endCursor) {{
      pageInfo {{
        endCursor
        hasNextPage
      }},
      nodes {{
          login
      }}
    }}
  }}
}}
"#
    )
}

/// Logins of every member of `org`, across all pages, in API order.
pub fn get_members_from_org(gh: &GhCli<'_>, org: &str) -> Result<Vec<String>> {
    let org_field = format!("org={org}");
    let output = execute_query(
        gh,
        &members_query(),
        &["--jq", MEMBER_LOGINS_FILTER, "-f", org_field.as_str()],
    )?;
    Ok(split_lines(&output))
}

/// Split newline-delimited output, dropping the empty entry after the final newline.
pub(crate) fn split_lines(output: &str) -> Vec<String> {
    let mut lines: Vec<String> = output.split('\n').map(str::to_string).collect();
    if lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}
