use thiserror::Error;

/// Where a bad setting came from, rendered after a configuration message.
///
/// Only the probe setup path produces these: `ProbeConfig::parsed_base_url`
/// names the rejected `base_url`, and `HttpTransport::new` names itself when
/// the reqwest client cannot be built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Name of the setting, e.g. `base_url`
    pub field_path: Option<String>,
    /// The rejected value or a short reason
    pub details: Option<String>,
    /// `probe_config` or `http_transport`
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Every way a probe step can be abandoned.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    /// Request payload could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Connection, send, or full-body read failure.
    #[error("Network transport error: {0}")]
    Transport(#[from] crate::transport::TransportError),

    /// The streamed body broke off after the response headers arrived.
    #[error("Stream read error: {message}")]
    StreamRead { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// ` (field: base_url, details: ftp://x, source: probe_config)`, or nothing
/// when no context was attached.
fn format_context(ctx: &ErrorContext) -> String {
    let parts: Vec<String> = [
        ("field", &ctx.field_path),
        ("details", &ctx.details),
        ("source", &ctx.source),
    ]
    .into_iter()
    .filter_map(|(label, value)| value.as_ref().map(|v| format!("{label}: {v}")))
    .collect();

    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    pub fn stream_read(msg: impl Into<String>) -> Self {
        Error::StreamRead {
            message: msg.into(),
        }
    }
}
