use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use cviewer::log::init_logging;

/// Utility to view currencies exchange rate information.
#[derive(Parser)]
#[command(name = "cviewer", version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for cviewer::AppCommand {
    fn from(cmd: Commands) -> cviewer::AppCommand {
        match cmd {
            Commands::GetRates { base, currencies } => {
                cviewer::AppCommand::Rates { base, currencies }
            }
            Commands::Convert { amount, from, to } => {
                cviewer::AppCommand::Convert { amount, from, to }
            }
            Commands::ViewCurs => cviewer::AppCommand::Currencies,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// View the most recent exchange rate data
    #[command(name = "getrates")]
    GetRates {
        /// Currency for which the rates are shown
        base: String,
        /// Space-separated list of currencies
        currencies: Vec<String>,
    },
    /// Convert one currency to another
    Convert {
        /// Currency amount
        amount: f64,
        /// Currency to be converted from
        from: String,
        /// Currency to be converted to
        to: String,
    },
    /// View list of available currencies
    #[command(name = "viewcurs")]
    ViewCurs,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(cmd) => cviewer::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

fn setup() -> anyhow::Result<()> {
    use anyhow::Context;

    let path = cviewer::config::AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = r#"---
providers:
  geo:
    base_url: "https://api.getgeoapi.com/v2/currency"
    api_key: ~
  currencyapi:
    base_url: "https://api.currencyapi.com/v3"
    api_key: ~
"#;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
