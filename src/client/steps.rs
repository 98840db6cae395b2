//! The three request templates.
//!
//! Each step prints its heading first, then either its full output or
//! nothing more once an error is returned.

use crate::client::core::Probe;
use crate::transport::{decode_lines, TransportError};
use crate::types::message::ChatRequest;
use crate::types::report::{StepKind, StepOutcome};
use crate::{Error, Result};
use futures::StreamExt;
use std::io::Write;
use tracing::error;

/// Printed after the status line, before the first streamed line.
pub const STREAM_HEADER: &str = "Streaming Response (Raw):";
/// Printed once the stream ends, cleanly or not.
pub const STREAM_COMPLETE: &str = "--- Stream Complete ---";

impl<W: Write> Probe<W> {
    /// `GET /health`, printed verbatim.
    pub async fn health_check(&mut self) -> Result<StepOutcome> {
        self.print_heading(StepKind::HealthCheck)?;
        let response = self.transport.get(StepKind::HealthCheck.path()).await?;
        self.print_buffered(response).await
    }

    /// `POST /chat-completion`, printed verbatim.
    pub async fn chat_completion(&mut self) -> Result<StepOutcome> {
        self.print_heading(StepKind::ChatCompletion)?;
        let response = self
            .transport
            .post_json(StepKind::ChatCompletion.path(), &ChatRequest::chat_completion())
            .await?;
        self.print_buffered(response).await
    }

    /// `POST /gemini-stream`, echoed one line at a time as the body arrives.
    ///
    /// A body that breaks off mid-stream is logged, not returned: the
    /// completion marker is printed either way and the error is kept in the
    /// outcome's `read_error`.
    pub async fn gemini_stream(&mut self) -> Result<StepOutcome> {
        self.print_heading(StepKind::Stream)?;
        let response = self
            .transport
            .post_json(StepKind::Stream.path(), &ChatRequest::gemini_stream())
            .await?;

        let status = response.status();
        writeln!(self.out, "Status: {status}")?;
        writeln!(self.out, "{STREAM_HEADER}")?;
        self.out.flush()?;

        let mut lines = decode_lines(response.bytes_stream());
        let mut count = 0usize;
        let mut read_error = None;
        while let Some(item) = lines.next().await {
            match item {
                Ok(line) => {
                    writeln!(self.out, "{line}")?;
                    self.out.flush()?;
                    count += 1;
                }
                Err(e) => {
                    error!(step = %StepKind::Stream, "Error: {e}");
                    read_error = Some(e.to_string());
                    break;
                }
            }
        }
        drop(lines);

        writeln!(self.out, "{STREAM_COMPLETE}")?;
        self.out.flush()?;

        Ok(StepOutcome::Streamed {
            status: status.as_u16(),
            lines: count,
            read_error,
        })
    }

    fn print_heading(&mut self, kind: StepKind) -> Result<()> {
        writeln!(self.out, "\n=== {} ===", kind.heading())?;
        self.out.flush()?;
        Ok(())
    }

    /// Read the whole body, then print status and body. Nothing is printed
    /// if the body cannot be read.
    async fn print_buffered(&mut self, response: reqwest::Response) -> Result<StepOutcome> {
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;

        writeln!(self.out, "Status: {status}")?;
        writeln!(self.out, "Response: {}", String::from_utf8_lossy(&body))?;
        self.out.flush()?;

        Ok(StepOutcome::Completed {
            status: status.as_u16(),
            bytes: body.len(),
        })
    }
}
