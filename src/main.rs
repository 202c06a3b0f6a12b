use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use log::error;
use ontime::cli::Cli;
use ontime::env_manager;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging with custom format
    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::new().filter_or("ONTIME_LOG_LEVEL", default_level))
        .format(|buf, record| {
            use chrono::Local;
            use std::io::Write;
            writeln!(
                buf,
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();

    env_manager::load_env_file();

    if let Err(err) = ontime::run(cli).await {
        error!("{:#}", err);
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
    Ok(())
}
