use tracing::info;

use crate::app::ports::LeadEventNotifier;
use crate::domain::{LeadSource, SubmissionKind};

/// Forwards outcomes to the tracing pipeline, where the analytics
/// collector picks up `lead_resolved` events.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl LeadEventNotifier for TracingNotifier {
    fn lead_resolved(&self, kind: SubmissionKind, source: LeadSource) {
        info!(
            target: "lead_capture::analytics",
            event = "lead_resolved",
            kind = kind.as_str(),
            source = source.as_str(),
            "Lead funnel event"
        );
    }
}

/// Discards every event
#[derive(Debug, Default)]
pub struct NoopNotifier;

impl LeadEventNotifier for NoopNotifier {
    fn lead_resolved(&self, _kind: SubmissionKind, _source: LeadSource) {}
}
