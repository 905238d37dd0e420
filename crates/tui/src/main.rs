mod app;
mod client;
mod config;
mod error;
mod store;
#[cfg(test)]
mod testing;
mod ui;

use std::{fs::OpenOptions, path::Path, sync::Mutex};

use crate::{config::AppConfig, error::Result};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;
    init_tracing(&config)?;

    let mut app = app::App::new(config)?;
    app.run().await?;
    Ok(())
}

fn init_tracing(config: &AppConfig) -> Result<()> {
    if let Some(parent) = Path::new(&config.log_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "tally_tui={level},view={level}",
            level = config.log_level
        ))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
