//! Revision selection among lookup results

use std::cmp::Reverse;

use crate::document::JobDefinition;
use crate::error::{RenderError, Result};

/// Picks the candidate with the highest revision
///
/// Candidates are sorted by descending revision (stable, so the service's
/// order breaks ties) and the first is taken. Candidates without a revision
/// sort last.
pub fn select_latest_revision(mut candidates: Vec<JobDefinition>) -> Result<JobDefinition> {
    candidates.sort_by_key(|candidate| Reverse(candidate.revision()));
    candidates.into_iter().next().ok_or(RenderError::NotFound)
}
