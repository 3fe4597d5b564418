use crate::events::AppEvent;
use async_channel::Sender;
use std::thread;
use tokio::runtime::Runtime;

/// Runs the control socket and the config watcher on a tokio runtime in a
/// thread of their own. They only talk to the UI through `tx`.
pub fn start_background_services(tx: Sender<AppEvent>) -> std::io::Result<()> {
    let rt = Runtime::new()?;

    thread::Builder::new()
        .name("viewfinder-services".into())
        .spawn(move || {
            rt.block_on(async {
                {
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        crate::sys::server::run_server(tx).await;
                    });
                }

                {
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        crate::config::run_async_watcher(tx).await;
                    });
                }

                std::future::pending::<()>().await;
            });
        })?;
    Ok(())
}
