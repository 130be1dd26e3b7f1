use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gh_edu::Error;
use gh_edu::gh::{GhCli, get_members_from_org};
use gh_edu::model::config::ConfigStore;
use gh_edu::model::settings::{Settings, project_dirs};
use gh_edu::plugin::{BuiltinCommands, PluginInstaller};
use gh_edu::shell::SystemShell;
use gh_edu::util::{fetch_orgs, find_org, names_to_urls, prefix_org};

#[derive(Parser)]
#[command(name = "gh-edu", version, about = "Manage GitHub CLI extensions for education")]
struct Cli {
    /// Suppress progress output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the JSON store of installed plugins
    #[arg(long, global = true, env = "GH_EDU_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Install a plugin: a bare first-party name or an `org/repo`
    Install { plugin: String },
    /// List installed plugins
    List,
    /// List the members of an organization
    Members { org: String },
    /// List your organizations, or check membership of one
    Orgs { name: Option<String> },
    /// Print the clone URLs of repositories in an organization
    Urls {
        org: String,
        #[arg(required = true)]
        repos: Vec<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("gh-edu: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Logs go to a file; stdout and stderr belong to the user.
    let _guard = init_logging(&settings);
    tracing::info!("gh-edu starting");

    match run(cli, &settings) {
        Ok(code) => code,
        Err(e) => {
            // Collisions have already been reported to the user.
            if !matches!(e.downcast_ref::<Error>(), Some(Error::NameCollision { .. })) {
                eprintln!("gh-edu: {e:#}");
            }
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(settings: &Settings) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_dir = project_dirs()
        .map(|d| d.data_dir().to_path_buf())
        .unwrap_or_else(std::env::temp_dir);
    std::fs::create_dir_all(&log_dir).ok()?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "gh-edu.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.filter));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_env_filter(filter)
        .init();

    Some(guard)
}

fn run(cli: Cli, settings: &Settings) -> Result<ExitCode> {
    let shell = SystemShell;
    let gh = GhCli::new(&shell, &settings.github.binary);

    match cli.command {
        Command::Install { plugin } => {
            let store_path = cli.config.unwrap_or_else(|| settings.store_path());
            let mut store = ConfigStore::load(&store_path)
                .with_context(|| format!("failed to load {}", store_path.display()))?;
            let builtins = BuiltinCommands::discover(settings.builtin_dir().as_deref());

            PluginInstaller::new(gh, settings.naming(), &builtins)
                .quiet(cli.quiet)
                .install(&mut store, &plugin)?;
        }
        Command::List => {
            let store_path = cli.config.unwrap_or_else(|| settings.store_path());
            let store = ConfigStore::load(&store_path)
                .with_context(|| format!("failed to load {}", store_path.display()))?;

            if store.is_empty() && !cli.quiet {
                println!("No plugins installed");
            }
            for (name, record) in store.iter() {
                match &record.last_commit {
                    Some(commit) => println!("{name} → {} ({commit})", record.original_name),
                    None => println!("{name} → {}", record.original_name),
                }
            }
        }
        Command::Members { org } => {
            for login in get_members_from_org(&gh, &org)? {
                println!("{login}");
            }
        }
        Command::Orgs { name: Some(name) } => match find_org(&gh, &name) {
            Some(org) => println!("{org}"),
            None => {
                eprintln!("You are not a member of {name}");
                return Ok(ExitCode::FAILURE);
            }
        },
        Command::Orgs { name: None } => {
            for org in fetch_orgs(&gh) {
                println!("{org}");
            }
        }
        Command::Urls { org, repos } => {
            for url in names_to_urls(&gh, &prefix_org(&repos, &org)) {
                println!("{url}");
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
