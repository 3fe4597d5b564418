use anyhow::Context;
use relm4::prelude::*;
use viewfinder::config;
use viewfinder::gui::app::AppModel;
use viewfinder::sys::runtime;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    match config::write_default_config() {
        Ok(path) => log::debug!("Using config at {}", path.display()),
        Err(e) => log::warn!("Could not write default config: {}", e),
    }
    let config = config::load_or_default();

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx.clone())
        .context("Failed to start background services")?;

    let app = RelmApp::new("org.viewfinder.overlay");

    app.run::<AppModel>((config, tx, rx));
    Ok(())
}
