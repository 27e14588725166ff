use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use repograph::cli::commands;

#[derive(Parser)]
#[command(name = "repograph")]
#[command(
    version,
    about = "Repository dependency-graph and file-tree analysis for remote codebases"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long)]
    verbose: bool,

    #[arg(long, short)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a repository into a file tree and dependency graph
    Analyze {
        #[arg(help = "Repository spec: owner/name")]
        repo: String,
        #[arg(long, help = "Print the full JSON document instead of a summary")]
        json: bool,
        #[arg(long, short, help = "Write the JSON document to a file")]
        output: Option<PathBuf>,
        #[arg(long, env = "GITHUB_TOKEN", help = "GitHub access token")]
        token: Option<String>,
    },

    /// List supported languages and their extensions
    Languages,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the merged effective configuration
    Show {
        #[arg(long, help = "Emit JSON instead of TOML")]
        json: bool,
    },
    /// Show configuration file paths
    Path,
}

fn main() -> ExitCode {
    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Analyze {
            repo,
            json,
            output,
            token,
        } => {
            let rt = Runtime::new()?;
            rt.block_on(commands::analyze::run(commands::analyze::AnalyzeOptions {
                repo_spec: repo,
                json,
                output,
                token,
            }))?;
        }
        Commands::Languages => {
            commands::languages::run()?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { json } => {
                commands::config::show(json)?;
            }
            ConfigAction::Path => {
                commands::config::path()?;
            }
        },
    }

    Ok(())
}
