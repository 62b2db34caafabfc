//! Job definition lookup endpoints

use jobdef_core::JobDefinition;
use jobdef_core::dto::{DescribeJobDefinitionsRequest, DescribeJobDefinitionsResponse};
use tracing::debug;

use crate::BatchClient;
use crate::error::Result;

impl BatchClient {
    /// Fetch one page of job definitions
    ///
    /// # Arguments
    /// * `req` - Name filter and optional continuation token
    ///
    /// # Returns
    /// The page of definitions plus the token for the next page, if any
    pub async fn describe_job_definitions(
        &self,
        req: &DescribeJobDefinitionsRequest,
    ) -> Result<DescribeJobDefinitionsResponse> {
        let url = format!("{}/v1/describejobdefinitions", self.base_url);
        let response = self.client.post(&url).json(req).send().await?;

        self.handle_response(response).await
    }

    /// Fetch every revision registered under `name`
    ///
    /// Follows continuation tokens until the service stops returning one and
    /// concatenates the pages in the order they were received.
    pub async fn describe_job_definitions_by_name(&self, name: &str) -> Result<Vec<JobDefinition>> {
        let mut request = DescribeJobDefinitionsRequest::by_name(name);
        let mut definitions = Vec::new();

        loop {
            let page = self.describe_job_definitions(&request).await?;
            debug!(
                "Received {} job definition(s) for {}",
                page.job_definitions.len(),
                name
            );
            definitions.extend(page.job_definitions);

            match page.next_token {
                Some(token) if !token.is_empty() => request.next_token = Some(token),
                _ => break,
            }
        }

        Ok(definitions)
    }
}
