//! wfhtracker library root.
//! Exposes the CLI parser, the high-level run() function and the store,
//! controller and sensor modules used by the binary.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli, cfg),
        Commands::Config { .. } => cli::commands::config::handle(cli, cfg),
        Commands::Set { .. } => cli::commands::set::handle(&cli.command, cfg),
        Commands::Status => cli::commands::status::handle(cfg),
        Commands::Summary { .. } => cli::commands::summary::handle(&cli.command, cfg),
        Commands::Check => cli::commands::check::handle(cfg),
        Commands::Watch { .. } => cli::commands::watch::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
    }
}

/// Configuration file selected by `--config`, or the platform default.
pub fn config_path(cli: &Cli) -> PathBuf {
    cli.config
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(Config::config_file)
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let default_level = if matches!(cli.command, Commands::Watch { .. }) {
        LevelFilter::INFO
    } else {
        LevelFilter::WARN
    };
    utils::logging::enable_logging(default_level);

    // file, then environment, then --db
    let path = config_path(&cli);
    let mut cfg = Config::load(&path)?;
    if let Some(custom_db) = &cli.db {
        cfg.database = Config::resolve_db(&Config::config_dir_of(&path), custom_db);
    }

    dispatch(&cli, &cfg)
}
