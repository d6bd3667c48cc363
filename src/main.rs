use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use ratebook::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
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

impl From<Commands> for ratebook::AppCommand {
    fn from(cmd: Commands) -> ratebook::AppCommand {
        match cmd {
            Commands::List => ratebook::AppCommand::List,
            Commands::Load => ratebook::AppCommand::Load,
            Commands::Add { code, value } => ratebook::AppCommand::Add { code, value },
            Commands::Edit { code, value } => ratebook::AppCommand::Edit { code, value },
            Commands::Delete { code } => ratebook::AppCommand::Delete { code },
            Commands::Reset => ratebook::AppCommand::Reset,
            Commands::Purge => ratebook::AppCommand::Purge,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Show cached rates and local overrides
    List,
    /// Fetch rates from the API. Local overrides are discarded
    Load,
    /// Add a local rate
    Add {
        /// Currency code, e.g. MXN
        #[arg(long)]
        code: Option<String>,
        /// Exchange value
        #[arg(long, allow_negative_numbers = true)]
        value: Option<f64>,
    },
    /// Change the value of a displayed rate
    Edit {
        /// Code of the rate to edit
        code: String,
        /// New exchange value
        #[arg(long, allow_negative_numbers = true)]
        value: Option<f64>,
    },
    /// Delete a rate
    Delete {
        /// Code of the rate to delete
        code: String,
    },
    /// Discard local overrides and fetch rates again
    Reset,
    /// Remove all stored rates, including the cached API response
    Purge,
}

#[tokio::main]
async fn main() -> Result<()> {
    // dotenvy loads .env, but doesn't override already-set env vars
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => ratebook::cli::setup::setup(),
        Some(cmd) => ratebook::run_command(cmd.into(), cli.config_path.as_deref()).await,
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
