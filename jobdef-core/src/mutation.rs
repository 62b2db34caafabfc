//! Field mutations applied to a resolved job definition

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::document::{JobDefinition, TAGS};
use crate::error::{RenderError, Result};

/// Caller-supplied mutation inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationParams {
    /// Image reference written into `containerProperties.image`
    pub image: String,
    /// Space-delimited command replacing `containerProperties.command`
    pub command_override: Option<String>,
    /// Comma-delimited tag keys to remove from `tags`
    pub exclude_tags: Option<String>,
}

impl MutationParams {
    /// Mutations that only replace the image
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            ..Self::default()
        }
    }

    pub fn with_command_override(mut self, command: impl Into<String>) -> Self {
        self.command_override = Some(command.into());
        self
    }

    pub fn with_exclude_tags(mut self, tags: impl Into<String>) -> Self {
        self.exclude_tags = Some(tags.into());
        self
    }
}

/// Applies image, command and tag mutations in place
///
/// Fails only when the document has no `containerProperties` object, and
/// that check runs before anything is changed.
pub fn apply_mutations(doc: &mut JobDefinition, params: &MutationParams) -> Result<()> {
    let container = doc
        .container_properties_mut()
        .ok_or_else(RenderError::missing_container_properties)?;

    container.insert("image".to_string(), Value::String(params.image.clone()));
    info!("Set container image to {}", params.image);

    match params.command_override.as_deref() {
        Some(command) if !command.is_empty() => {
            let tokens: Vec<Value> = command
                .split(' ')
                .map(|token| Value::String(token.to_string()))
                .collect();
            info!("Overriding container command with {} argument(s)", tokens.len());
            container.insert("command".to_string(), Value::Array(tokens));
        }
        _ => debug!("No command override supplied"),
    }

    match params.exclude_tags.as_deref() {
        Some(tags) if !tags.is_empty() => exclude_tags(doc, &parse_tag_keys(tags)),
        _ => debug!("No tags to exclude"),
    }

    Ok(())
}

/// Splits a comma-delimited list of tag keys, trimming each and dropping empties
pub fn parse_tag_keys(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .collect()
}

fn exclude_tags(doc: &mut JobDefinition, keys: &[String]) {
    let root = doc.as_map_mut();
    let Some(tags) = root.get_mut(TAGS) else {
        debug!("Job definition has no tags; nothing to exclude");
        return;
    };
    let Some(tags) = tags.as_object_mut() else {
        warn!("Ignoring tag exclusion: tags is not a mapping");
        return;
    };

    for key in keys {
        if tags.shift_remove(key.as_str()).is_some() {
            info!("Removed tag {}", key);
        } else {
            debug!("Tag {} not present", key);
        }
    }

    if tags.is_empty() {
        root.shift_remove(TAGS);
        info!("All tags removed; dropping tags from job definition");
    }
}
