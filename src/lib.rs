pub mod cli;
pub mod core;
pub mod providers;
pub mod rates;
pub mod store;

use anyhow::Result;
use tracing::{debug, info};

use crate::core::config::AppConfig;
use crate::providers::RapidApiProvider;
use crate::rates::{RateStore, RatesView};

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    List,
    Load,
    Add {
        code: Option<String>,
        value: Option<f64>,
    },
    Edit {
        code: String,
        value: Option<f64>,
    },
    Delete {
        code: String,
    },
    Reset,
    Purge,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("ratebook starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!(
        url = %config.provider.base_url,
        data_path = ?config.data_path,
        "Loaded config"
    );

    let storage = store::open_default(&config)?;
    let mut rate_store = RateStore::new(storage);

    if command == AppCommand::Purge {
        return cli::rates::purge(&mut rate_store);
    }

    let provider = RapidApiProvider::new(&config.provider)?;
    let mut view = RatesView::new(&mut rate_store, &provider);

    match command {
        AppCommand::List => cli::rates::list(&mut view),
        AppCommand::Load => cli::rates::load(&mut view).await,
        AppCommand::Add { code, value } => cli::rates::add(&mut view, code, value),
        AppCommand::Edit { code, value } => cli::rates::edit(&mut view, &code, value),
        AppCommand::Delete { code } => cli::rates::delete(&mut view, &code),
        AppCommand::Reset => cli::rates::reset(&mut view).await,
        AppCommand::Purge => unreachable!("Purge command should be handled separately"),
    }
}
