//! relaychat terminal front-end
//!
//! Reads messages from stdin and renders replies with the pending indicator
//! and character reveal. Lines typed while a reply is pending are dropped.
//! At end of input the last reply is still awaited and shown; Ctrl-C stops
//! immediately.

use relaychat::config::{load_env_file, ClientConfig};
use relaychat::inference::HttpInferenceClient;
use relaychat::render::TerminalSink;
use relaychat::runtime::{Timing, TurnRuntime};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_file = load_env_file();

    // Logs go to stderr so they stay out of the conversation
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "relaychat=warn".into()),
        )
        .with_writer(std::io::stderr)
        .compact()
        .init();

    if let Some(path) = &env_file {
        tracing::info!(path = %path.display(), "Loaded environment file");
    }

    let config = ClientConfig::from_env();
    tracing::info!(endpoint = %config.endpoint, timeout = ?config.request_timeout, "Chat configured");

    let client = HttpInferenceClient::new(&config)?;
    let mut sink = TerminalSink::stdout();
    sink.prompt();

    let (runtime, handle) = TurnRuntime::new(client, sink, Timing::default());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut task = tokio::spawn(runtime.run());
    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(text) => {
                    if handle.submit(text).await.is_err() {
                        break;
                    }
                }
                None => {
                    // Piped input: let the reply to the last line come through
                    handle.finish().await;
                    tokio::select! {
                        joined = &mut task => {
                            joined?;
                            println!();
                            return Ok(());
                        }
                        _ = tokio::signal::ctrl_c() => break,
                    }
                }
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    handle.shutdown().await;
    task.await?;
    println!();

    Ok(())
}
