//! Jobdef Core
//!
//! Core types and transformations for rendering container job definitions.
//!
//! This crate contains:
//! - Document types: the job definition document and its key-path helpers
//! - Mutations: image substitution, command override and tag exclusion
//! - DTOs: wire shapes of the job definition lookup service

pub mod document;
pub mod dto;
pub mod error;
pub mod key_path;
pub mod mutation;
pub mod selection;

pub use document::JobDefinition;
pub use error::{RenderError, Result};
pub use mutation::{MutationParams, apply_mutations};
pub use selection::select_latest_revision;
