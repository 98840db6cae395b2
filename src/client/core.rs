use crate::client::builder::ProbeConfig;
use crate::transport::HttpTransport;
use crate::types::report::{RunReport, StepKind, StepOutcome, StepReport};
use std::io::Write;
use std::time::Instant;
use tracing::{debug, error, info};

/// Runs the fixed request sequence and echoes responses to `out`.
pub struct Probe<W> {
    pub(crate) transport: HttpTransport,
    pub(crate) config: ProbeConfig,
    pub(crate) out: W,
}

impl<W: Write> Probe<W> {
    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Run every step in order, pausing between them.
    ///
    /// Never fails: a step that errors is logged and recorded as
    /// [`StepOutcome::Failed`], and the next step still runs.
    pub async fn run(&mut self) -> RunReport {
        info!(base_url = %self.config.base_url, "Running client tests...");

        let mut report = RunReport::default();
        for (i, kind) in StepKind::ALL.into_iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(self.config.pause).await;
            }
            report.steps.push(self.run_step(kind).await);
        }

        info!(failed = report.failures().count(), "Tests complete.");
        report
    }

    /// Run a single step and record its outcome.
    pub async fn run_step(&mut self, kind: StepKind) -> StepReport {
        let start = Instant::now();
        let result = match kind {
            StepKind::HealthCheck => self.health_check().await,
            StepKind::ChatCompletion => self.chat_completion().await,
            StepKind::Stream => self.gemini_stream().await,
        };

        let outcome = result.unwrap_or_else(|e| {
            error!(step = %kind, "Error: {e}");
            StepOutcome::Failed {
                error: e.to_string(),
            }
        });

        let elapsed = start.elapsed();
        debug!(step = %kind, elapsed_ms = elapsed.as_millis() as u64, "step finished");
        StepReport {
            kind,
            outcome,
            elapsed,
        }
    }
}
