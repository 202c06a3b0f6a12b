pub mod app;
pub mod cli;
pub mod config;
pub mod env_manager;
pub mod parser;
pub mod repl;
pub mod services;
pub mod trip;

use anyhow::Result;
use log::*;

pub async fn run(cli: cli::Cli) -> Result<()> {
    let app = app::Application::load(cli.config.as_deref())?;
    info!("Initializing OnTime");
    app.run(cli).await
}

// Re-export commonly used types
pub use config::Config;
pub use parser::{parse_time, TimeOfDay, TimeParseError};
pub use trip::{LeaveTime, PlanError, TripPlan, TripPlanner};
