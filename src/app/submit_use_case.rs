use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::app::clipboard_use_case::copy_lead_to_clipboard;
use crate::app::ports::{ClipboardPort, LeadEndpointPort, LeadEventNotifier, LeadStorePort};
use crate::constants::DEFAULT_ENDPOINT_TIMEOUT_MS;
use crate::domain::{LeadPayload, LeadSubmissionResult, RawLeadForm};
use crate::error::{LeadError, Result};
use crate::metrics::LeadMetrics;
use crate::pipeline::{validate_lead_payload, LeadNormalizer, SpamFilter, TimingMeta};

/// Delivery settings, passed in for every submission so a changed
/// configuration applies on the next attempt.
#[derive(Debug, Clone)]
pub struct SubmissionConfig {
    pub endpoint_url: Option<String>,
    pub timeout: Duration,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            endpoint_url: None,
            timeout: Duration::from_millis(DEFAULT_ENDPOINT_TIMEOUT_MS),
        }
    }
}

impl SubmissionConfig {
    pub fn with_endpoint(url: impl Into<String>) -> Self {
        Self {
            endpoint_url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Configured endpoint; blank values count as unconfigured
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

enum Delivery {
    Sent,
    NotConfigured,
    Failed(String),
}

/// Routes a lead to the remote endpoint or the pending store.
///
/// ```text
/// Start -> [spam or invalid?] -> Rejected
///       -> [endpoint configured?]
///            yes -> POST -> 2xx -> Sent
///                        -> anything else -> StoredLocally
///            no  -> StoredLocally
/// ```
pub struct SubmitLeadUseCase {
    endpoint: Arc<dyn LeadEndpointPort>,
    store: Arc<dyn LeadStorePort>,
    notifier: Arc<dyn LeadEventNotifier>,
    spam_filter: SpamFilter,
    normalizer: LeadNormalizer,
}

impl SubmitLeadUseCase {
    pub fn new(
        endpoint: Arc<dyn LeadEndpointPort>,
        store: Arc<dyn LeadStorePort>,
        notifier: Arc<dyn LeadEventNotifier>,
    ) -> Self {
        Self {
            endpoint,
            store,
            notifier,
            spam_filter: SpamFilter::new(),
            normalizer: LeadNormalizer::default(),
        }
    }

    pub fn with_spam_filter(mut self, spam_filter: SpamFilter) -> Self {
        self.spam_filter = spam_filter;
        self
    }

    pub fn with_normalizer(mut self, normalizer: LeadNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Normalize raw form state and submit it
    pub async fn capture_lead(
        &self,
        raw: &RawLeadForm,
        page_query: &str,
        timing: &TimingMeta,
        config: &SubmissionConfig,
    ) -> LeadSubmissionResult {
        let payload = self.normalizer.normalize(raw, page_query);
        self.submit_lead(payload, timing, config).await
    }

    /// Submit a normalized lead. Never fails: transport problems fall back
    /// to local storage.
    pub async fn submit_lead(
        &self,
        payload: LeadPayload,
        timing: &TimingMeta,
        config: &SubmissionConfig,
    ) -> LeadSubmissionResult {
        let result = self.route(payload, timing, config).await;
        self.resolve(result)
    }

    /// Run the submission on its own task.
    ///
    /// Dropping the handle discards the outcome but does not cancel delivery,
    /// so a caller that goes away mid-request never loses the lead.
    pub fn spawn_submission(
        self: &Arc<Self>,
        payload: LeadPayload,
        timing: TimingMeta,
        config: SubmissionConfig,
    ) -> JoinHandle<LeadSubmissionResult> {
        let this = Arc::clone(self);
        tokio::spawn(async move { this.submit_lead(payload, &timing, &config).await })
    }

    /// Pending leads, oldest first
    pub async fn pending_leads(&self) -> Result<Vec<LeadPayload>> {
        self.store.list().await
    }

    /// Explicit retry of a stored lead. The payload is resent unchanged, so
    /// its submission id and timestamp survive the retry.
    pub async fn retry_pending(
        &self,
        submission_id: Uuid,
        config: &SubmissionConfig,
    ) -> Result<LeadSubmissionResult> {
        let payload = self
            .store
            .load(submission_id)
            .await?
            .ok_or(LeadError::PendingLeadNotFound(submission_id))?;

        let result = match self.deliver(&payload, config).await {
            Delivery::Sent => {
                if let Err(e) = self.store.remove(submission_id).await {
                    warn!(%submission_id, "Delivered lead could not be removed from pending store: {}", e);
                }
                LeadSubmissionResult::Sent {
                    payload,
                    diagnostic: None,
                }
            }
            Delivery::NotConfigured => LeadSubmissionResult::StoredLocally {
                payload,
                diagnostic: Some("no endpoint configured".to_string()),
            },
            Delivery::Failed(reason) => LeadSubmissionResult::StoredLocally {
                payload,
                diagnostic: Some(reason),
            },
        };

        Ok(self.resolve(result))
    }

    /// Copy a stored lead to the clipboard; a successful copy resolves it.
    ///
    /// Clipboard adapters may block on a child process, so the write runs on
    /// the blocking pool.
    pub async fn copy_pending(
        &self,
        submission_id: Uuid,
        clipboard: Arc<dyn ClipboardPort>,
    ) -> Result<LeadSubmissionResult> {
        let payload = self
            .store
            .load(submission_id)
            .await?
            .ok_or(LeadError::PendingLeadNotFound(submission_id))?;

        let to_copy = payload.clone();
        let copied = tokio::task::spawn_blocking(move || {
            copy_lead_to_clipboard(&to_copy, clipboard.as_ref())
        })
        .await
        .unwrap_or_else(|e| {
            warn!(%submission_id, "Clipboard task failed: {}", e);
            false
        });

        let result = if copied {
            if let Err(e) = self.store.remove(submission_id).await {
                warn!(%submission_id, "Copied lead could not be removed from pending store: {}", e);
            }
            LeadSubmissionResult::CopiedToClipboard {
                payload,
                diagnostic: None,
            }
        } else {
            LeadSubmissionResult::StoredLocally {
                payload,
                diagnostic: Some("clipboard unavailable; copy the lead manually".to_string()),
            }
        };

        Ok(self.resolve(result))
    }

    async fn route(
        &self,
        payload: LeadPayload,
        timing: &TimingMeta,
        config: &SubmissionConfig,
    ) -> LeadSubmissionResult {
        if let Some(reason) = self.spam_filter.classify(&payload, timing) {
            LeadMetrics::spam_rejected(reason);
            return LeadSubmissionResult::Rejected {
                payload,
                diagnostic: Some(format!("spam: {}", reason)),
            };
        }

        let validation = validate_lead_payload(&payload);
        if !validation.valid {
            for field in validation.errors.keys() {
                LeadMetrics::validation_failed(*field);
            }
            return LeadSubmissionResult::Rejected {
                payload,
                diagnostic: Some(format!("invalid: {}", validation.summary())),
            };
        }

        match self.deliver(&payload, config).await {
            Delivery::Sent => LeadSubmissionResult::Sent {
                payload,
                diagnostic: None,
            },
            Delivery::NotConfigured => {
                self.store_locally(payload, "no endpoint configured".to_string())
                    .await
            }
            Delivery::Failed(reason) => self.store_locally(payload, reason).await,
        }
    }

    /// One POST attempt, no retry loop
    async fn deliver(&self, payload: &LeadPayload, config: &SubmissionConfig) -> Delivery {
        let Some(url) = config.endpoint() else {
            return Delivery::NotConfigured;
        };

        match self.endpoint.post_lead(url, payload, config.timeout).await {
            Ok(status) if (200..300).contains(&status) => Delivery::Sent,
            Ok(status) => {
                LeadMetrics::endpoint_failed();
                warn!(submission_id = %payload.submission_id(), status, "Endpoint refused lead");
                Delivery::Failed(LeadError::EndpointStatus { status }.to_string())
            }
            Err(e) => {
                LeadMetrics::endpoint_failed();
                warn!(submission_id = %payload.submission_id(), "Lead delivery failed: {}", e);
                Delivery::Failed(e.to_string())
            }
        }
    }

    async fn store_locally(&self, payload: LeadPayload, reason: String) -> LeadSubmissionResult {
        let diagnostic = match self.store.save(&payload).await {
            Ok(()) => reason,
            Err(e) => {
                // The payload still travels back in the result for a manual copy
                error!(submission_id = %payload.submission_id(), "Pending store write failed: {}", e);
                format!("{}; local save failed: {}", reason, e)
            }
        };
        LeadSubmissionResult::StoredLocally {
            payload,
            diagnostic: Some(diagnostic),
        }
    }

    fn resolve(&self, result: LeadSubmissionResult) -> LeadSubmissionResult {
        let kind = result.kind();
        info!(
            submission_id = %result.payload().submission_id(),
            kind = kind.as_str(),
            diagnostic = result.diagnostic().unwrap_or(""),
            "Lead submission resolved"
        );
        LeadMetrics::submission_resolved(kind);
        self.notifier.lead_resolved(kind, result.payload().source());
        result
    }
}
