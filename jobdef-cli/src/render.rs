//! Render pipeline
//!
//! Resolve, mutate, write. The output file is only allocated once every
//! mutation has succeeded, so a failed run leaves nothing behind.

use std::path::PathBuf;

use jobdef_core::{MutationParams, Result, apply_mutations};

use crate::config::Config;
use crate::output::write_job_definition;
use crate::repository::JobDefinitionRepository;
use crate::resolver::{JobDefinitionSource, resolve};

/// A single render invocation
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub source: JobDefinitionSource,
    pub mutations: MutationParams,
}

/// Runs the pipeline and returns the path of the rendered file
pub async fn render(
    request: &RenderRequest,
    repository: &dyn JobDefinitionRepository,
    config: &Config,
) -> Result<PathBuf> {
    let mut doc = resolve(&request.source, repository, &config.workspace_root).await?;
    apply_mutations(&mut doc, &request.mutations)?;
    write_job_definition(&doc, &config.temp_dir)
}
