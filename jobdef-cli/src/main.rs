//! Job definition renderer
//!
//! Takes a container job definition (looked up by name or read from a file),
//! swaps in a new image, optionally overrides the command and drops tags, and
//! writes the result to a fresh temp file for the deploy step.

mod actions;
mod config;
mod output;
mod render;
mod repository;
mod resolver;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use clap::builder::NonEmptyStringValueParser;
use jobdef_client::BatchClient;
use jobdef_core::MutationParams;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::render::{RenderRequest, render};
use crate::repository::HttpJobDefinitionRepository;
use crate::resolver::JobDefinitionSource;

/// Name of the step output carrying the rendered file path
const OUTPUT_NAME: &str = "job-definition";

#[derive(Parser)]
#[command(name = "render-job-definition", version)]
#[command(about = "Render a container job definition with a new image", long_about = None)]
struct Cli {
    /// Container image reference written into the job definition
    #[arg(long, env = "INPUT_IMAGE", value_parser = NonEmptyStringValueParser::new())]
    image: String,

    /// Name of a registered job definition; takes precedence over --job-definition
    #[arg(long, env = "INPUT_JOB-DEFINITION-NAME", default_value = "")]
    job_definition_name: String,

    /// Path to a job definition JSON file
    #[arg(long, env = "INPUT_JOB-DEFINITION", default_value = "")]
    job_definition: String,

    /// Space-delimited command replacing the container command
    #[arg(long, env = "INPUT_COMMAND-TO-OVERRIDE", default_value = "")]
    command_to_override: String,

    /// Comma-delimited tag keys to remove
    #[arg(long, env = "INPUT_EXCLUDE-TAGS", default_value = "")]
    exclude_tags: String,

    /// Root for relative job definition paths [default: current directory]
    #[arg(long, env = "GITHUB_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Directory the rendered file is written to [default: system temp dir]
    #[arg(long, env = "RUNNER_TEMP")]
    temp_dir: Option<PathBuf>,

    /// Job definition lookup endpoint; required with --job-definition-name
    #[arg(long, env = "BATCH_ENDPOINT_URL")]
    batch_endpoint: Option<String>,

    /// File step outputs are appended to
    #[arg(long, env = "GITHUB_OUTPUT")]
    output_file: Option<PathBuf>,

    /// Lookup request timeout in seconds
    #[arg(long, env = "BATCH_REQUEST_TIMEOUT", default_value_t = 30)]
    request_timeout: u64,
}

impl Cli {
    fn config(&self, source: &JobDefinitionSource) -> Result<Config> {
        let workspace_root = match non_empty_path(&self.workspace) {
            Some(path) => path,
            None => std::env::current_dir().context("Failed to read current directory")?,
        };
        let temp_dir = non_empty_path(&self.temp_dir).unwrap_or_else(std::env::temp_dir);

        let config = Config::new(workspace_root, temp_dir)
            .with_batch_endpoint(self.batch_endpoint.clone())
            .with_output_file(non_empty_path(&self.output_file))
            .with_request_timeout(Duration::from_secs(self.request_timeout));
        config.validate(source)?;
        Ok(config)
    }

    fn request(&self) -> Result<RenderRequest> {
        let source = JobDefinitionSource::from_inputs(&self.job_definition_name, &self.job_definition)?;
        let mutations = MutationParams::new(self.image.clone())
            .with_command_override(self.command_to_override.clone())
            .with_exclude_tags(self.exclude_tags.clone());
        Ok(RenderRequest { source, mutations })
    }
}

fn non_empty_path(path: &Option<PathBuf>) -> Option<PathBuf> {
    path.clone().filter(|path| !path.as_os_str().is_empty())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "render_job_definition=info,jobdef_core=info,jobdef_client=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            actions::set_failed(&format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let request = cli.request()?;
    let config = cli.config(&request.source)?;

    let http_client = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()
        .context("Failed to build HTTP client")?;
    // Empty only for file sources, which never reach the repository.
    let endpoint = config.batch_endpoint.clone().unwrap_or_default();
    let repository = HttpJobDefinitionRepository::new(BatchClient::with_client(endpoint, http_client));

    let path = render(&request, &repository, &config).await?;
    info!("Rendered job definition: {}", path.display());

    actions::set_output(
        OUTPUT_NAME,
        &path.display().to_string(),
        config.output_file.as_deref(),
    )
}
