use crate::client::core::Probe;
use crate::transport::HttpTransport;
use crate::{Error, ErrorContext, Result};
use std::io::Write;
use std::time::Duration;
use url::Url;

/// Address of the server under test.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Gap between consecutive steps, for readable pacing.
pub const DEFAULT_PAUSE: Duration = Duration::from_secs(1);

/// Resolved probe settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    pub base_url: String,
    pub pause: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            pause: DEFAULT_PAUSE,
        }
    }
}

impl ProbeConfig {
    /// Parse `base_url`, accepting only absolute http(s) URLs.
    pub fn parsed_base_url(&self) -> Result<Url> {
        let context = || {
            ErrorContext::new()
                .with_field_path("base_url")
                .with_details(self.base_url.clone())
                .with_source("probe_config")
        };

        let url = Url::parse(&self.base_url).map_err(|e| {
            Error::configuration_with_context(format!("invalid base URL: {e}"), context())
        })?;

        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(Error::configuration_with_context(
                "base URL must be an absolute http or https URL",
                context(),
            ));
        }

        Ok(url)
    }
}

/// Builder for [`Probe`].
///
/// The defaults are the fixed target; the overrides exist for pointing the
/// probe at mock servers in tests.
#[derive(Debug, Default)]
pub struct ProbeBuilder {
    base_url_override: Option<String>,
    pause: Option<Duration>,
}

impl ProbeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the base URL (primarily for testing with mock servers).
    pub fn base_url_override(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into());
        self
    }

    /// Override the pause between steps.
    pub fn pause(mut self, pause: Duration) -> Self {
        self.pause = Some(pause);
        self
    }

    /// Resolve the settings this builder would use.
    pub fn config(&self) -> ProbeConfig {
        let defaults = ProbeConfig::default();
        ProbeConfig {
            base_url: self
                .base_url_override
                .clone()
                .unwrap_or(defaults.base_url),
            pause: self.pause.unwrap_or(defaults.pause),
        }
    }

    /// Build the probe, writing its human-readable output to `out`.
    pub fn build<W: Write>(self, out: W) -> Result<Probe<W>> {
        let config = self.config();
        let transport = HttpTransport::new(config.parsed_base_url()?)?;
        Ok(Probe {
            transport,
            config,
            out,
        })
    }
}
