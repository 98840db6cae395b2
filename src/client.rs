//! Probe client: configuration, the three fixed steps and the sequential runner.
//!
//! Implementation details are split into submodules under `src/client/`.

pub mod builder;
pub mod core;
mod steps;

pub use builder::{ProbeBuilder, ProbeConfig, DEFAULT_BASE_URL, DEFAULT_PAUSE};
pub use core::Probe;
pub use steps::{STREAM_COMPLETE, STREAM_HEADER};
