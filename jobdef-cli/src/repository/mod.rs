//! Repository layer
//!
//! Repositories abstract the job definition lookup service behind a trait so
//! the render pipeline can be exercised without network access.

mod job_definitions;

pub use job_definitions::{HttpJobDefinitionRepository, JobDefinitionRepository};
