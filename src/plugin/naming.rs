//! How plugin references map to remote repositories and local short names.
//!
//! A first-party plugin is referenced by its bare name (`grader`) and lives
//! at `<organization>/<prefix><name>`. A third-party plugin is referenced by
//! its full `org/repo`. Either way it is tracked locally under a short name:
//! the repository name with the `gh-` and `edu-` markers removed.

const GH_MARKER: &str = "gh-";
const EDU_MARKER: &str = "edu-";

/// True if `plugin` is a bare first-party name rather than `org/repo`.
pub fn is_first_party(plugin: &str) -> bool {
    !plugin.contains('/')
}

/// Local short name for a plugin reference.
///
/// Keeps the part after the last `/`, then removes the first `gh-` and the
/// first `edu-`. The removal repeats until neither marker is left, so the
/// result never contains either one and deriving again is a no-op:
///
/// - `gh-cli-for-education/gh-edu-grader` → `grader`
/// - `alu0101/gh-edu-gh-tool` → `tool`
/// - `alu0101/repo-stats` → `repo-stats`
pub fn derive_short_name(reference: &str) -> String {
    let mut name = reference.rsplit('/').next().unwrap_or(reference).to_string();
    loop {
        let stripped = name.replacen(GH_MARKER, "", 1).replacen(EDU_MARKER, "", 1);
        if stripped == name {
            return name;
        }
        name = stripped;
    }
}

pub fn repository_url(canonical: &str) -> String {
    format!("https://github.com/{canonical}")
}

/// The namespace and repository prefix first-party plugins are published under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingConvention {
    pub organization: String,
    pub prefix: String,
}

impl NamingConvention {
    pub fn new(organization: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            prefix: prefix.into(),
        }
    }

    /// Fully qualified `org/repo` for `plugin`. Third-party references pass through.
    pub fn canonical(&self, plugin: &str) -> String {
        if is_first_party(plugin) {
            format!("{}/{}{plugin}", self.organization, self.prefix)
        } else {
            plugin.to_string()
        }
    }
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self::new("gh-cli-for-education", "gh-edu-")
    }
}
