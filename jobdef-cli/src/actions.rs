//! Workflow command reporting
//!
//! Step outputs are appended to the host's output file as `name=value`
//! lines; without one they go to stdout. Failures are reported with a single
//! `::error::` workflow command.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

/// Publishes a step output
pub fn set_output(name: &str, value: &str, output_file: Option<&Path>) -> Result<()> {
    match output_file {
        Some(path) => {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open output file {}", path.display()))?;
            write_output(&mut file, name, value)
                .with_context(|| format!("Failed to write output file {}", path.display()))
        }
        None => write_output(&mut std::io::stdout().lock(), name, value)
            .context("Failed to write output to stdout"),
    }
}

/// Reports a fatal error to the host
pub fn set_failed(message: &str) {
    println!("{}", error_command(message));
}

fn write_output(writer: &mut impl Write, name: &str, value: &str) -> std::io::Result<()> {
    writeln!(writer, "{}={}", name, value)
}

fn error_command(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}

/// Escapes characters that would break a single-line workflow command
fn escape_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
