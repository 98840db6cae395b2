//! Step outcomes collected by [`Probe::run`](crate::Probe::run).

use std::fmt;
use std::time::Duration;

/// The three fixed requests, in run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    HealthCheck,
    ChatCompletion,
    Stream,
}

impl StepKind {
    pub const ALL: [StepKind; 3] = [
        StepKind::HealthCheck,
        StepKind::ChatCompletion,
        StepKind::Stream,
    ];

    /// Section heading printed before the step's request.
    pub fn heading(&self) -> &'static str {
        match self {
            StepKind::HealthCheck => "Health Check",
            StepKind::ChatCompletion => "Chat Completion (Non-Streaming)",
            StepKind::Stream => "Gemini Stream Endpoint (Raw)",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            StepKind::HealthCheck => "/health",
            StepKind::ChatCompletion => "/chat-completion",
            StepKind::Stream => "/gemini-stream",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.heading())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Buffered response read to the end.
    Completed { status: u16, bytes: usize },
    /// Streamed response echoed; `read_error` is set when the body broke off.
    Streamed {
        status: u16,
        lines: usize,
        read_error: Option<String>,
    },
    /// Step abandoned before any response was printed.
    Failed { error: String },
}

impl StepOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, StepOutcome::Failed { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            StepOutcome::Completed { status, .. } | StepOutcome::Streamed { status, .. } => {
                Some(*status)
            }
            StepOutcome::Failed { .. } => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StepReport {
    pub kind: StepKind,
    pub outcome: StepOutcome,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub steps: Vec<StepReport>,
}

impl RunReport {
    pub fn step(&self, kind: StepKind) -> Option<&StepReport> {
        self.steps.iter().find(|s| s.kind == kind)
    }

    pub fn failures(&self) -> impl Iterator<Item = &StepReport> {
        self.steps.iter().filter(|s| s.outcome.is_failed())
    }
}
