//! Core data types for the probe.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`message`] | Chat request payloads sent to the server under test |
//! | [`report`] | Per-step outcomes returned by the runner |

pub mod message;
pub mod report;

pub use message::{ChatRequest, Message, MessageRole};
pub use report::{RunReport, StepKind, StepOutcome, StepReport};
