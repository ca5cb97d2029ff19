#![allow(clippy::collapsible_if)]
#![allow(clippy::too_many_arguments)]

// Core modules
pub mod app;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod models;
pub mod projection;
pub mod ui;
pub mod utils;

pub use app::App;
pub use engine::{SignalDesk, UserAction};

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the signal server
    #[arg(long, env = "SIGNAL_DESK_API_URL", default_value = config::API.fallback_base_url)]
    pub api_base_url: String,

    /// Session credential, passed through as the `initData` query parameter
    #[arg(long, env = "SIGNAL_DESK_INIT_DATA")]
    pub init_data: Option<String>,
}

/// Builds the GUI app. Public so the binary can hand it to eframe.
pub fn run_app(cc: &eframe::CreationContext<'_>, args: Cli) -> anyhow::Result<App> {
    App::new(cc, args)
}
