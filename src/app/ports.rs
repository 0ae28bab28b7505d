use async_trait::async_trait;
use std::time::Duration;
use uuid::Uuid;

use crate::domain::{LeadPayload, LeadSource, SubmissionKind};
use crate::error::Result;

/// Remote collection endpoint
#[async_trait]
pub trait LeadEndpointPort: Send + Sync {
    /// Issue one POST of `payload` to `url`. Returns the HTTP status; transport
    /// failures (including timeout) are errors.
    async fn post_lead(&self, url: &str, payload: &LeadPayload, timeout: Duration) -> Result<u16>;
}

/// Pending-lead storage, keyed by submission id
#[async_trait]
pub trait LeadStorePort: Send + Sync {
    async fn save(&self, payload: &LeadPayload) -> Result<()>;
    async fn load(&self, submission_id: Uuid) -> Result<Option<LeadPayload>>;
    async fn list(&self) -> Result<Vec<LeadPayload>>;
    /// Returns whether an entry was removed
    async fn remove(&self, submission_id: Uuid) -> Result<bool>;
}

/// Platform clipboard write capability
pub trait ClipboardPort: Send + Sync {
    fn write_text(&self, text: &str) -> Result<()>;
}

/// Fire-and-forget analytics hook. Receives the outcome kind only, never
/// payload contents, and must not block.
pub trait LeadEventNotifier: Send + Sync {
    fn lead_resolved(&self, kind: SubmissionKind, source: LeadSource);
}
