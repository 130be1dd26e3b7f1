mod common;

use std::fs;

use gh_edu::Error;
use gh_edu::gh::GhCli;
use gh_edu::model::config::{CommandRecord, ConfigStore};
use gh_edu::plugin::{BuiltinCommands, InstallOutcome, NamingConvention, PluginInstaller};
use gh_edu::shell::ShellOutput;
use serde_json::Value;

use common::MockShell;

const SHA: &str = "3f2a9c1d7e8b4a6f0c5d2e1b9a8f7c6d5e4b3a21";
const GRADER: &str = "gh-cli-for-education/gh-edu-grader";

fn grader_shell() -> MockShell {
    MockShell::new()
        .on(
            &["extension", "install", "https://github.com/gh-cli-for-education/gh-edu-grader"],
            ShellOutput::ok(""),
        )
        .on(&["api", "/repos/gh-cli-for-education/gh-edu-grader", "--jq"], ShellOutput::ok("main\n"))
        .on(
            &["api", "/repos/gh-cli-for-education/gh-edu-grader/commits/main"],
            ShellOutput::ok(format!(r#"{{"sha":"{SHA}","commit":{{"message":"init"}}}}"#)),
        )
}

fn install(
    shell: &MockShell,
    store: &mut ConfigStore,
    builtins: &BuiltinCommands,
    plugin: &str,
) -> gh_edu::Result<InstallOutcome> {
    PluginInstaller::new(GhCli::new(shell, "gh"), NamingConvention::default(), builtins)
        .quiet(true)
        .install(store, plugin)
}

#[test]
fn test_first_party_install_records_short_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    let mut store = ConfigStore::load(&path).unwrap();
    let shell = grader_shell();

    let outcome = install(&shell, &mut store, &BuiltinCommands::default(), "grader").unwrap();

    let expected = CommandRecord {
        original_name: GRADER.to_string(),
        last_commit: Some("3f2a9c1d".to_string()),
    };
    assert_eq!(
        outcome,
        InstallOutcome::Installed {
            short_name: "grader".to_string(),
            record: expected.clone(),
        }
    );
    assert_eq!(shell.call_count(), 3);

    let reloaded = ConfigStore::load(&path).unwrap();
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded.get("grader"), Some(&expected));

    let json: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["commands"]["grader"]["originalName"], GRADER);
    assert_eq!(json["commands"]["grader"]["lastCommit"], "3f2a9c1d");
}

#[test]
fn test_already_installed_original_name_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    let mut store = ConfigStore::load(&path).unwrap();
    store.prepend(
        "clone",
        CommandRecord {
            original_name: "alu0101/gh-clone".to_string(),
            last_commit: None,
        },
    );
    let shell = MockShell::new();

    let outcome = install(&shell, &mut store, &BuiltinCommands::default(), "alu0101/gh-clone").unwrap();

    assert_eq!(outcome, InstallOutcome::AlreadyInstalled);
    assert_eq!(shell.call_count(), 0);
    assert_eq!(store.len(), 1);
    assert!(!path.exists());
}

#[test]
fn test_builtin_name_counts_as_installed() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ConfigStore::load(dir.path().join("data.json")).unwrap();
    let builtins = BuiltinCommands::new(["remove"]);
    let shell = MockShell::new();

    let outcome = install(&shell, &mut store, &builtins, "remove").unwrap();

    assert_eq!(outcome, InstallOutcome::AlreadyInstalled);
    assert_eq!(shell.call_count(), 0);
    assert!(store.is_empty());
}

#[test]
fn test_short_name_collision_fails_before_installing() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ConfigStore::load(dir.path().join("data.json")).unwrap();
    store.prepend(
        "grader",
        CommandRecord {
            original_name: "someone/gh-grader".to_string(),
            last_commit: None,
        },
    );
    let shell = grader_shell();

    let result = install(&shell, &mut store, &BuiltinCommands::default(), "grader");

    assert!(matches!(result, Err(Error::NameCollision { name }) if name == "grader"));
    assert_eq!(shell.call_count(), 0);
    assert_eq!(store.get("grader").unwrap().original_name, "someone/gh-grader");
}

#[test]
fn test_short_name_colliding_with_builtin_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ConfigStore::load(dir.path().join("data.json")).unwrap();
    let shell = MockShell::new();

    let result = install(
        &shell,
        &mut store,
        &BuiltinCommands::discover(None),
        "alu0101/gh-edu-list",
    );

    assert!(matches!(result, Err(Error::NameCollision { name }) if name == "list"));
    assert_eq!(shell.call_count(), 0);
}

#[test]
fn test_install_failure_leaves_store_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    let mut store = ConfigStore::load(&path).unwrap();
    let shell = MockShell::new().on(
        &["extension", "install"],
        ShellOutput::failed(1, "could not find extension 'gh-edu-nope'\n"),
    );

    let outcome = install(&shell, &mut store, &BuiltinCommands::default(), "nope").unwrap();

    assert!(matches!(outcome, InstallOutcome::InstallFailed { ref stderr } if stderr.contains("gh-edu-nope")));
    assert_eq!(shell.call_count(), 1);
    assert!(store.is_empty());
    assert!(!path.exists());
}

#[test]
fn test_already_provided_extension_continues_to_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    let mut store = ConfigStore::load(&path).unwrap();
    let shell = MockShell::new()
        .on(
            &["extension", "install"],
            ShellOutput::failed(
                1,
                "there is already an installed extension that provides the \"edu-grader\" command\n",
            ),
        )
        .on(&["api", "/repos/gh-cli-for-education/gh-edu-grader", "--jq"], ShellOutput::ok("main\n"))
        .on(
            &["api", "/repos/gh-cli-for-education/gh-edu-grader/commits/main"],
            ShellOutput::ok(format!(r#"{{"sha":"{SHA}"}}"#)),
        );

    let outcome = install(&shell, &mut store, &BuiltinCommands::default(), "grader").unwrap();

    assert!(matches!(outcome, InstallOutcome::Installed { ref short_name, .. } if short_name == "grader"));
    assert_eq!(shell.call_count(), 3);
    assert_eq!(
        ConfigStore::load(&path).unwrap().get("grader").unwrap().last_commit.as_deref(),
        Some("3f2a9c1d")
    );
}

#[test]
fn test_metadata_failure_records_without_commit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    let mut store = ConfigStore::load(&path).unwrap();
    let shell = MockShell::new()
        .on(&["extension", "install"], ShellOutput::ok(""))
        .on(&["api"], ShellOutput::failed(1, "HTTP 404: Not Found\n"));

    let outcome = install(&shell, &mut store, &BuiltinCommands::default(), "alu0101/gh-edu-stats").unwrap();

    let InstallOutcome::Installed { short_name, record } = outcome else {
        panic!("expected install to succeed");
    };
    assert_eq!(short_name, "stats");
    assert_eq!(record.original_name, "alu0101/gh-edu-stats");
    assert_eq!(record.last_commit, None);

    let json: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert!(json["commands"]["stats"].get("lastCommit").is_none());
}

#[test]
fn test_third_party_reference_is_used_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ConfigStore::load(dir.path().join("data.json")).unwrap();
    let shell = MockShell::new()
        .on(&["extension", "install"], ShellOutput::ok(""))
        .on(&["api", "/repos/alu0101/gh-report", "--jq"], ShellOutput::ok("trunk\n"))
        .on(
            &["api", "/repos/alu0101/gh-report/commits/trunk"],
            ShellOutput::ok(r#"{"sha":"abcdef0123456789"}"#),
        );

    install(&shell, &mut store, &BuiltinCommands::default(), "alu0101/gh-report").unwrap();

    let calls = shell.calls();
    assert_eq!(calls[0].program, "gh");
    assert_eq!(
        calls[0].args,
        vec!["extension", "install", "https://github.com/alu0101/gh-report"]
    );
    assert_eq!(store.get("report").unwrap().last_commit.as_deref(), Some("abcdef01"));
}

#[test]
fn test_new_installs_are_prepended() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    let mut store = ConfigStore::load(&path).unwrap();
    store.prepend(
        "clone",
        CommandRecord {
            original_name: "gh-cli-for-education/gh-edu-clone".to_string(),
            last_commit: Some("aaaaaaaa".to_string()),
        },
    );

    install(&grader_shell(), &mut store, &BuiltinCommands::default(), "grader").unwrap();

    let names: Vec<String> = ConfigStore::load(&path)
        .unwrap()
        .iter()
        .map(|(name, _)| name.to_string())
        .collect();
    assert_eq!(names, vec!["grader", "clone"]);
}

#[test]
fn test_empty_plugin_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ConfigStore::load(dir.path().join("data.json")).unwrap();
    let shell = MockShell::new();

    let result = install(&shell, &mut store, &BuiltinCommands::default(), "  ");

    assert!(matches!(result, Err(Error::InvalidPlugin { .. })));
    assert_eq!(shell.call_count(), 0);
}
