//! Wire types for the job definition lookup service

use serde::{Deserialize, Serialize};

use crate::document::JobDefinition;

/// Request body of a describe-job-definitions call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeJobDefinitionsRequest {
    pub job_definition_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl DescribeJobDefinitionsRequest {
    /// First-page request for every revision of `name`
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            job_definition_name: name.into(),
            next_token: None,
        }
    }
}

/// One page of describe-job-definitions results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeJobDefinitionsResponse {
    #[serde(default)]
    pub job_definitions: Vec<JobDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_wire_shape() {
        let first = serde_json::to_value(DescribeJobDefinitionsRequest::by_name("my-batch-job")).unwrap();
        assert_eq!(first, json!({"jobDefinitionName": "my-batch-job"}));

        let next = DescribeJobDefinitionsRequest {
            next_token: Some("abc".to_string()),
            ..DescribeJobDefinitionsRequest::by_name("my-batch-job")
        };
        assert_eq!(
            serde_json::to_value(next).unwrap(),
            json!({"jobDefinitionName": "my-batch-job", "nextToken": "abc"})
        );
    }

    #[test]
    fn test_response_defaults() {
        let page: DescribeJobDefinitionsResponse = serde_json::from_value(json!({})).unwrap();
        assert!(page.job_definitions.is_empty());
        assert!(page.next_token.is_none());

        let page: DescribeJobDefinitionsResponse = serde_json::from_value(json!({
            "jobDefinitions": [{"revision": 2, "containerProperties": {"image": "x"}}],
            "nextToken": "t"
        }))
        .unwrap();
        assert_eq!(page.job_definitions[0].revision(), Some(2));
        assert_eq!(page.next_token.as_deref(), Some("t"));
    }
}
