use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::BufReader;

use kakebo::cli::Shell;
use kakebo::config::{KakeboPaths, Settings};
use kakebo::gateway::CollaboratorGateway;
use kakebo::logging::init_tracing;
use kakebo::services::BudgetSession;

#[derive(Parser)]
#[command(
    name = "kakebo",
    author = "Kaylee Beyene",
    version,
    about = "Terminal-based Kakebo budgeting assistant",
    long_about = "Kakebo sorts every expense into a few fixed envelopes, watches how \
                  much of your revenue goes to essentials and steps in with guidance \
                  when survival spending crosses the limit."
)]
struct Cli {
    /// Use this directory for configuration instead of the platform default
    #[arg(long, global = true, env = "KAKEBO_CLI_DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session (default)
    Shell,

    /// Run session commands from a file, one per line
    Run {
        /// Script file (`#` starts a comment line)
        file: PathBuf,
    },

    /// Write default settings to the configuration directory
    Init,

    /// Show current configuration and paths
    Config,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = match cli.config_dir {
        Some(dir) => KakeboPaths::with_base_dir(dir),
        None => KakeboPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            let mut shell = new_shell(&settings)?;
            shell
                .run_interactive(BufReader::new(tokio::io::stdin()))
                .await?;
        }
        Commands::Run { file } => {
            let script = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read script {}", file.display()))?;
            let mut shell = new_shell(&settings)?;
            let failures = shell.run_script(&script).await?;
            if failures > 0 {
                bail!("{} command(s) failed", failures);
            }
        }
        Commands::Init => {
            println!("Initializing Kakebo at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            println!("Settings written to {}", paths.settings_file().display());
            println!();
            println!("Edit the file to change the currency symbol, the survival threshold");
            println!("or to plug in an external collaborator command.");
        }
        Commands::Config => {
            println!("Kakebo Configuration");
            println!("====================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Exports:          {}", paths.exports_dir().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:    {}", settings.currency_symbol);
            println!("  Date format:        {}", settings.date_format);
            println!("  Survival threshold: {}%", settings.survival_threshold_percent);
            println!("  Savings prefix:     {:?}", settings.savings_prefix);
            println!("  Collaborator:       {:?}", settings.collaborator.backend);
            if !settings.collaborator.command.is_empty() {
                println!("  Command:            {}", settings.collaborator.command.join(" "));
                println!("  Timeout:            {}s", settings.collaborator.timeout_secs);
            }
        }
    }

    Ok(())
}

fn new_shell(settings: &Settings) -> Result<Shell<std::io::Stdout>> {
    let gateway = CollaboratorGateway::from_settings(settings)?;
    let session = BudgetSession::with_settings(gateway, settings);
    Ok(Shell::new(session, settings, std::io::stdout()))
}
