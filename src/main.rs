use crate::app_config::AppConfig;
use crate::archiver::Archiver;
use crate::console::TerminalPrompt;
use crate::run_snapshot::run_snapshot;
use crate::skyport::SkyportApi;
use std::io;
use tracing::info;

mod app_config;
mod archiver;
mod console;
mod domain;
mod extensions;
mod presenter;
mod run_snapshot;
mod skyport;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    tracing_subscriber::fmt()
        .with_max_level(config.log().level())
        .with_writer(io::stderr)
        .init();

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let client = skyport::new_client(&config)?;
    let api = SkyportApi::new(client, &config);
    let archiver = Archiver::new(config.output().directory());
    info!("✅  Initialized Skyport client for {}", config.skyport().url());

    let summary = run_snapshot(&api, &mut TerminalPrompt, &archiver, &mut io::stdout()).await?;

    if !summary.logged_in {
        info!("⛔ Stopped without a session");
        return Ok(());
    }

    info!(
        "✅  Done, {} device(s) found, {} dump(s) written",
        summary.devices,
        summary.archived.len()
    );
    Ok(())
}
