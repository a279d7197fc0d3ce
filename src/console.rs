//! Terminal input shared by the interactive page and wallet prompts.

use std::io::Write;
use tokio::sync::oneshot;

/// Print `prompt` without a newline.
pub fn prompt(text: &str) {
    let mut stdout = std::io::stdout();
    let _ = write!(stdout, "{}", text);
    let _ = stdout.flush();
}

/// Read one line from stdin; `None` on EOF or error.
///
/// The read runs on a detached thread so an abandoned read never holds up
/// runtime shutdown.
pub async fn read_line() -> Option<String> {
    let (tx, rx) = oneshot::channel();
    std::thread::spawn(move || {
        let mut line = String::new();
        let result = match std::io::stdin().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read from stdin");
                None
            }
        };
        let _ = tx.send(result);
    });
    rx.await.ok().flatten()
}
