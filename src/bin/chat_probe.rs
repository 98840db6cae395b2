//! chat-probe: run the fixed request sequence against the local chat service
//!
//! Usage:
//!   chat-probe
//!
//! The server must already be listening on http://localhost:3000. Responses
//! go to stdout; logs go to stderr (filter with `RUST_LOG`, default `info`).
//! The exit status is always 0.

use chat_probe::ProbeBuilder;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();

    match ProbeBuilder::new().build(std::io::stdout()) {
        Ok(mut probe) => {
            probe.run().await;
        }
        Err(e) => tracing::error!("Error: {e}"),
    }
}
