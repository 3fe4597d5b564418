use crate::events::{AppEvent, FocusSignal};
use async_channel::Sender;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::UnixListener;

const SOCKET_PATH: &str = "/tmp/viewfinder.sock";

/// One command per line: a [`FocusSignal`] word, or `pie` to toggle the menu.
fn parse_command(line: &str) -> Option<AppEvent> {
    let word = line.trim();
    if word.eq_ignore_ascii_case("pie") {
        return Some(AppEvent::TogglePie);
    }
    word.parse::<FocusSignal>().ok().map(AppEvent::Focus)
}

pub async fn run_server(tx: Sender<AppEvent>) {
    // Cleanup old socket if it exists
    if std::fs::metadata(SOCKET_PATH).is_ok() {
        let _ = std::fs::remove_file(SOCKET_PATH);
    }

    let listener = match UnixListener::bind(SOCKET_PATH) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket: {}", e);
            return;
        }
    };
    log::info!("Listening for focus signals on {}", SOCKET_PATH);

    loop {
        match listener.accept().await {
            Ok((mut stream, _)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    let reader = BufReader::new(&mut stream);
                    let mut lines = reader.lines();

                    while let Ok(Some(line)) = lines.next_line().await {
                        match parse_command(&line) {
                            Some(event) => {
                                if tx.send(event).await.is_err() {
                                    break;
                                }
                            }
                            None if line.trim().is_empty() => {}
                            None => log::warn!("Unknown command: {}", line.trim()),
                        }
                    }
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_focus_words_and_pie() {
        assert!(matches!(
            parse_command("focus-start\n"),
            Some(AppEvent::Focus(FocusSignal::FocusStart))
        ));
        assert!(matches!(
            parse_command("  focus-fail-hold "),
            Some(AppEvent::Focus(FocusSignal::FocusFailHold))
        ));
        assert!(matches!(parse_command("PIE"), Some(AppEvent::TogglePie)));
        assert!(parse_command("show").is_none());
        assert!(parse_command("").is_none());
    }
}
