//! Job definition document
//!
//! A job definition is kept as a schema-less JSON object so that fields this
//! tool does not know about pass through to the output untouched, in their
//! original order.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{RenderError, Result};
use crate::key_path::remove_object_path;

/// Key holding the container settings
pub const CONTAINER_PROPERTIES: &str = "containerProperties";

/// Key holding the string-to-string tag mapping
pub const TAGS: &str = "tags";

/// Fields assigned by the lookup service that must not be resubmitted
///
/// Hard-coded; extend this list if the service starts returning new
/// read-only fields.
pub const SERVICE_ONLY_FIELDS: [&str; 5] = [
    "containerOrchestrationType",
    "containerProperties.networkConfiguration.interfaceConfigurations",
    "status",
    "revision",
    "jobDefinitionArn",
];

/// Container job definition document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobDefinition(Map<String, Value>);

impl JobDefinition {
    /// Wraps a JSON value, which must be an object
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(RenderError::InvalidJobDefinition(
                "Expected a JSON object".to_string(),
            )),
        }
    }

    /// Parses a job definition from JSON text read from `path`
    ///
    /// `path` is only used for error reporting.
    pub fn from_json_str(text: &str, path: &Path) -> Result<Self> {
        let value: Value = serde_json::from_str(text).map_err(|source| RenderError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_value(value)
    }

    /// Revision number assigned by the lookup service, if any
    pub fn revision(&self) -> Option<i64> {
        self.0.get("revision").and_then(Value::as_i64)
    }

    /// Job definition name, if any
    pub fn name(&self) -> Option<&str> {
        self.0.get("jobDefinitionName").and_then(Value::as_str)
    }

    /// Mutable container properties, when present as an object
    pub fn container_properties_mut(&mut self) -> Option<&mut Map<String, Value>> {
        self.0
            .get_mut(CONTAINER_PROPERTIES)
            .and_then(Value::as_object_mut)
    }

    /// Removes every service-assigned field listed in [`SERVICE_ONLY_FIELDS`]
    pub fn strip_service_fields(&mut self) {
        for path in SERVICE_ONLY_FIELDS {
            if remove_object_path(&mut self.0, path).is_some() {
                tracing::debug!("Stripped service-only field {}", path);
            }
        }
    }

    /// Renders the document as 2-space indented JSON
    pub fn to_pretty_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.0).map_err(RenderError::Serialize)
    }

    /// Borrow the underlying object
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Mutably borrow the underlying object
    pub fn as_map_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.0
    }

    /// Consumes the document and returns it as a JSON value
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl TryFrom<Value> for JobDefinition {
    type Error = RenderError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}
