//! Configuration module
//!
//! Host-supplied locations and lookup service settings. Everything the
//! render pipeline needs from its environment is carried here explicitly.

use std::path::PathBuf;
use std::time::Duration;

use crate::resolver::JobDefinitionSource;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Root that relative job definition paths are resolved against
    pub workspace_root: PathBuf,

    /// Directory the rendered job definition is written into
    pub temp_dir: PathBuf,

    /// Base URL of the job definition lookup service
    ///
    /// Requests are sent unsigned, so this must point at a service (or
    /// signing proxy) that accepts them. Only needed for lookups by name.
    pub batch_endpoint: Option<String>,

    /// File that step outputs are appended to, when the host provides one
    pub output_file: Option<PathBuf>,

    /// Timeout for each lookup request
    pub request_timeout: Duration,
}

impl Config {
    /// Creates a configuration with no endpoint, no output file and the default timeout
    pub fn new(workspace_root: PathBuf, temp_dir: PathBuf) -> Self {
        Self {
            workspace_root,
            temp_dir,
            batch_endpoint: None,
            output_file: None,
            request_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_batch_endpoint(mut self, endpoint: Option<String>) -> Self {
        self.batch_endpoint = endpoint.filter(|endpoint| !endpoint.is_empty());
        self
    }

    pub fn with_output_file(mut self, output_file: Option<PathBuf>) -> Self {
        self.output_file = output_file;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Validates the configuration for rendering from `source`
    pub fn validate(&self, source: &JobDefinitionSource) -> anyhow::Result<()> {
        if self.temp_dir.as_os_str().is_empty() {
            anyhow::bail!("temp_dir cannot be empty");
        }

        match (&self.batch_endpoint, source) {
            (None, JobDefinitionSource::Remote(_)) => anyhow::bail!(
                "batch_endpoint is required when job-definition-name is set \
                 (use --batch-endpoint or BATCH_ENDPOINT_URL)"
            ),
            (Some(endpoint), _)
                if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") =>
            {
                anyhow::bail!("batch_endpoint must start with http:// or https://")
            }
            _ => {}
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        Ok(())
    }
}
