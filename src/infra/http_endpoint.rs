use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::app::ports::LeadEndpointPort;
use crate::constants::IDEMPOTENCY_HEADER;
use crate::domain::LeadPayload;
use crate::error::Result;

/// Posts leads as JSON with reqwest
pub struct ReqwestLeadEndpoint {
    client: reqwest::Client,
}

impl Default for ReqwestLeadEndpoint {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqwestLeadEndpoint {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LeadEndpointPort for ReqwestLeadEndpoint {
    async fn post_lead(&self, url: &str, payload: &LeadPayload, timeout: Duration) -> Result<u16> {
        debug!(submission_id = %payload.submission_id(), url, "Posting lead");
        let resp = self
            .client
            .post(url)
            .timeout(timeout)
            .header(IDEMPOTENCY_HEADER, payload.submission_id().to_string())
            .json(payload)
            .send()
            .await?;
        Ok(resp.status().as_u16())
    }
}
