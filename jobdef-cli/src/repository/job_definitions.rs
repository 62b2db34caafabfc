//! Job definitions repository
//!
//! Looks up every registered revision of a job definition by name.

use async_trait::async_trait;
use jobdef_client::BatchClient;
use jobdef_core::{JobDefinition, RenderError, Result};

/// Repository trait for job definition lookups
#[async_trait]
pub trait JobDefinitionRepository: Send + Sync {
    /// Returns all candidate definitions registered under `name`
    ///
    /// An empty list is a valid answer; deciding what that means is left to
    /// the caller.
    async fn find_by_name(&self, name: &str) -> Result<Vec<JobDefinition>>;
}

/// HTTP implementation of JobDefinitionRepository
pub struct HttpJobDefinitionRepository {
    client: BatchClient,
}

impl HttpJobDefinitionRepository {
    /// Creates a repository backed by `client`
    pub fn new(client: BatchClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl JobDefinitionRepository for HttpJobDefinitionRepository {
    async fn find_by_name(&self, name: &str) -> Result<Vec<JobDefinition>> {
        self.client
            .describe_job_definitions_by_name(name)
            .await
            .map_err(|e| RenderError::Transport(e.service_message()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answers a single request with `status` and `body`
    async fn serve_once(status: u16, body: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            // Headers, then the JSON body; the request always ends with '}'.
            while !request.ends_with(b"}") {
                let n = stream.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
            }

            let reply = format!(
                "HTTP/1.1 {} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(reply.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
        });

        base_url
    }

    #[tokio::test]
    async fn test_service_error_message_is_surfaced_verbatim() {
        let body = r#"{"__type":"ClientException","message":"AWS Batch API Error"}"#;
        let base_url = serve_once(400, body.to_string()).await;
        let repository = HttpJobDefinitionRepository::new(BatchClient::new(base_url));

        let err = repository.find_by_name("my-batch-job").await.unwrap_err();
        assert!(matches!(err, RenderError::Transport(_)));
        assert_eq!(err.to_string(), "AWS Batch API Error");
    }

    #[tokio::test]
    async fn test_found_definitions_are_returned() {
        let body = r#"{"jobDefinitions":[{"revision":2,"containerProperties":{"image":"a"}}]}"#;
        let base_url = serve_once(200, body.to_string()).await;
        let repository = HttpJobDefinitionRepository::new(BatchClient::new(base_url));

        let found = repository.find_by_name("my-batch-job").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].revision(), Some(2));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = BatchClient::new(format!("http://127.0.0.1:{}", port));
        let repository = HttpJobDefinitionRepository::new(client);

        let err = repository.find_by_name("my-batch-job").await.unwrap_err();
        assert!(matches!(err, RenderError::Transport(_)));
    }
}
