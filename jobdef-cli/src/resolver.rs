//! Input resolution
//!
//! Produces the base job definition either from the lookup service (latest
//! revision, service-only fields stripped) or from a local JSON file.

use std::path::{Path, PathBuf};

use jobdef_core::{JobDefinition, RenderError, Result, select_latest_revision};
use tracing::info;

use crate::repository::JobDefinitionRepository;

/// Where the base job definition comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobDefinitionSource {
    /// Look up the latest revision registered under this name
    Remote(String),
    /// Read this file, relative to the workspace root unless absolute
    File(String),
}

impl JobDefinitionSource {
    /// Picks the source from the raw inputs; a non-empty name wins
    pub fn from_inputs(name: &str, file: &str) -> Result<Self> {
        if !name.is_empty() {
            Ok(Self::Remote(name.to_string()))
        } else if !file.is_empty() {
            Ok(Self::File(file.to_string()))
        } else {
            Err(RenderError::MissingSource)
        }
    }
}

/// Resolves `source` into a job definition
pub async fn resolve(
    source: &JobDefinitionSource,
    repository: &dyn JobDefinitionRepository,
    workspace_root: &Path,
) -> Result<JobDefinition> {
    match source {
        JobDefinitionSource::Remote(name) => {
            info!("Job definition will be fetched from the lookup service");
            fetch_latest(repository, name).await
        }
        JobDefinitionSource::File(path) => {
            info!("Job definition will be read from the local file system");
            load_file(path, workspace_root)
        }
    }
}

async fn fetch_latest(repository: &dyn JobDefinitionRepository, name: &str) -> Result<JobDefinition> {
    let candidates = repository.find_by_name(name).await?;
    info!("Found {} revision(s) of {}", candidates.len(), name);

    let mut latest = select_latest_revision(candidates)?;
    if let Some(revision) = latest.revision() {
        info!("Using revision {} of {}", revision, name);
    }
    latest.strip_service_fields();
    Ok(latest)
}

/// Resolves `path` against `workspace_root` unless it is already absolute
pub fn resolve_path(path: &str, workspace_root: &Path) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        workspace_root.join(path)
    }
}

fn load_file(path: &str, workspace_root: &Path) -> Result<JobDefinition> {
    let resolved = resolve_path(path, workspace_root);
    if !resolved.exists() {
        return Err(RenderError::FileNotFound(path.to_string()));
    }

    let text = std::fs::read_to_string(&resolved).map_err(|e| {
        RenderError::io(
            format!("Failed to read job definition file {}", resolved.display()),
            e,
        )
    })?;
    JobDefinition::from_json_str(&text, &resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use tempfile::TempDir;

    struct FixedRepository(Vec<Value>);

    #[async_trait]
    impl JobDefinitionRepository for FixedRepository {
        async fn find_by_name(&self, _name: &str) -> Result<Vec<JobDefinition>> {
            self.0
                .iter()
                .cloned()
                .map(JobDefinition::from_value)
                .collect()
        }
    }

    #[test]
    fn test_source_precedence() {
        assert_eq!(
            JobDefinitionSource::from_inputs("my-batch-job", "job-definition.json").unwrap(),
            JobDefinitionSource::Remote("my-batch-job".to_string())
        );
        assert_eq!(
            JobDefinitionSource::from_inputs("", "job-definition.json").unwrap(),
            JobDefinitionSource::File("job-definition.json".to_string())
        );
        assert!(matches!(
            JobDefinitionSource::from_inputs("", ""),
            Err(RenderError::MissingSource)
        ));
    }

    #[test]
    fn test_resolve_path() {
        let root = Path::new("/workspace");
        assert_eq!(
            resolve_path("job-definition.json", root),
            PathBuf::from("/workspace/job-definition.json")
        );
        assert_eq!(
            resolve_path("/hello/job-definition.json", root),
            PathBuf::from("/hello/job-definition.json")
        );
    }

    #[tokio::test]
    async fn test_remote_picks_latest_and_strips() {
        let repository = FixedRepository(vec![
            json!({
                "jobDefinitionName": "my-batch-job",
                "revision": 1,
                "status": "ACTIVE",
                "containerProperties": {"image": "one"}
            }),
            json!({
                "jobDefinitionName": "my-batch-job",
                "jobDefinitionArn": "arn:aws:batch:region:account:job-definition/my-batch-job:3",
                "revision": 3,
                "status": "ACTIVE",
                "containerOrchestrationType": "ECS",
                "containerProperties": {"image": "three"}
            }),
        ]);
        let source = JobDefinitionSource::Remote("my-batch-job".to_string());

        let doc = resolve(&source, &repository, Path::new("/unused")).await.unwrap();
        assert_eq!(
            doc.into_value(),
            json!({
                "jobDefinitionName": "my-batch-job",
                "containerProperties": {"image": "three"}
            })
        );
    }

    #[tokio::test]
    async fn test_remote_empty_is_not_found() {
        let source = JobDefinitionSource::Remote("my-batch-job".to_string());
        let err = resolve(&source, &FixedRepository(Vec::new()), Path::new("/unused"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "No job definitions found");
    }

    #[tokio::test]
    async fn test_local_file_relative_to_workspace() {
        let workspace = TempDir::new().unwrap();
        std::fs::write(
            workspace.path().join("job-definition.json"),
            r#"{"status":"KEPT","containerProperties":{"image":"old"}}"#,
        )
        .unwrap();
        let source = JobDefinitionSource::File("job-definition.json".to_string());

        let doc = resolve(&source, &FixedRepository(Vec::new()), workspace.path())
            .await
            .unwrap();
        // Local documents are not stripped.
        assert_eq!(
            doc.into_value(),
            json!({"status": "KEPT", "containerProperties": {"image": "old"}})
        );
    }

    #[tokio::test]
    async fn test_local_file_absolute_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absolute.json");
        std::fs::write(&path, r#"{"containerProperties":{}}"#).unwrap();
        let source = JobDefinitionSource::File(path.display().to_string());

        let doc = resolve(&source, &FixedRepository(Vec::new()), Path::new("/elsewhere"))
            .await
            .unwrap();
        assert_eq!(doc.into_value(), json!({"containerProperties": {}}));
    }

    #[tokio::test]
    async fn test_missing_file_reports_given_path() {
        let workspace = TempDir::new().unwrap();
        let source = JobDefinitionSource::File("does-not-exist-job-definition.json".to_string());

        let err = resolve(&source, &FixedRepository(Vec::new()), workspace.path())
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Job definition file does not exist: does-not-exist-job-definition.json"
        );
    }

    #[tokio::test]
    async fn test_invalid_json_is_parse_error() {
        let workspace = TempDir::new().unwrap();
        std::fs::write(workspace.path().join("broken.json"), "{ not json").unwrap();
        let source = JobDefinitionSource::File("broken.json".to_string());

        let err = resolve(&source, &FixedRepository(Vec::new()), workspace.path())
            .await
            .unwrap_err();
        assert!(matches!(err, RenderError::Parse { .. }));
    }
}
