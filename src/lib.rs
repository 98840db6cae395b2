//! # chat-probe
//!
//! Manual integration-test client for a local chat-completion HTTP service.
//!
//! The probe walks a fixed sequence against the server under test and echoes
//! every raw response to its output sink for a human to read:
//!
//! 1. `GET /health`
//! 2. `POST /chat-completion` (buffered)
//! 3. `POST /gemini-stream` (echoed line by line as it arrives)
//!
//! A one-second pause separates the calls. A failing step is logged through
//! `tracing` and the sequence carries on; nothing here asserts on the
//! responses.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chat_probe::ProbeBuilder;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> chat_probe::Result<()> {
//!     let mut probe = ProbeBuilder::new().build(std::io::stdout())?;
//!     let report = probe.run().await;
//!     println!("{} step(s) failed", report.failures().count());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Probe configuration, builder, steps and runner |
//! | [`transport`] | HTTP transport and streamed line decoding |
//! | [`types`] | Request payloads and step reports |

pub mod client;
pub mod transport;
pub mod types;

pub use client::{Probe, ProbeBuilder, ProbeConfig};
pub use types::{
    message::{ChatRequest, Message, MessageRole},
    report::{RunReport, StepKind, StepOutcome, StepReport},
};

use futures::Stream;
use std::pin::Pin;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// A unified pinned, boxed stream that emits `Result<T>`
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = Result<T>> + Send + 'a>>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
