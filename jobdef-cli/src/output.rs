//! Rendered job definition output
//!
//! The rendered document is written to a fresh temp file that outlives the
//! process, so a later step can pick it up.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use jobdef_core::{JobDefinition, RenderError, Result};
use tempfile::NamedTempFile;
use tracing::info;

/// File name prefix of rendered job definitions
pub const FILE_PREFIX: &str = "job-definition-";

/// File name suffix of rendered job definitions
pub const FILE_SUFFIX: &str = ".json";

/// Writes `doc` as indented JSON to a new file in `temp_dir`
///
/// # Returns
/// The absolute path of the written file
pub fn write_job_definition(doc: &JobDefinition, temp_dir: &Path) -> Result<PathBuf> {
    let contents = doc.to_pretty_json()?;

    let file = tempfile::Builder::new()
        .prefix(FILE_PREFIX)
        .suffix(FILE_SUFFIX)
        .tempfile_in(temp_dir)
        .map_err(|e| {
            RenderError::io(
                format!("Failed to create output file in {}", temp_dir.display()),
                e,
            )
        })?;
    let path = write_and_keep(file, |handle| {
        handle.write_all(contents.as_bytes())?;
        handle.flush()
    })?;

    let path = std::path::absolute(&path)
        .map_err(|e| RenderError::io("Failed to resolve output file path", e))?;
    info!("Wrote rendered job definition to {}", path.display());
    Ok(path)
}

/// Runs `write` against the temp file and keeps it only if the write succeeded
///
/// On failure the temp file is dropped, which deletes it.
fn write_and_keep(
    mut file: NamedTempFile,
    write: impl FnOnce(&mut File) -> std::io::Result<()>,
) -> Result<PathBuf> {
    write(file.as_file_mut()).map_err(|e| {
        RenderError::io(
            format!("Failed to write output file {}", file.path().display()),
            e,
        )
    })?;

    let (_, path) = file
        .keep()
        .map_err(|e| RenderError::io("Failed to keep output file", e.error))?;
    Ok(path)
}
