//! Funnel counters for the lead pipeline.
//!
//! Recorded through the `metrics` facade; with no recorder installed the
//! calls are no-ops, so library users opt in by installing their own.

use crate::domain::{LeadField, SubmissionKind};
use crate::pipeline::SpamReason;

pub const SUBMISSIONS_TOTAL: &str = "lead_capture_submissions_total";
pub const REJECTIONS_TOTAL: &str = "lead_capture_rejections_total";
pub const ENDPOINT_FAILURES_TOTAL: &str = "lead_capture_endpoint_failures_total";
pub const VALIDATION_FAILURES_TOTAL: &str = "lead_capture_validation_failures_total";

/// Metrics for the capture → delivery funnel
pub struct LeadMetrics;

impl LeadMetrics {
    /// Attach help text to every counter. Safe to call more than once.
    pub fn describe() {
        ::metrics::describe_counter!(SUBMISSIONS_TOTAL, "Lead submissions by final outcome kind");
        ::metrics::describe_counter!(REJECTIONS_TOTAL, "Lead submissions rejected as spam, by rule");
        ::metrics::describe_counter!(
            ENDPOINT_FAILURES_TOTAL,
            "Remote deliveries that fell back to local storage"
        );
        ::metrics::describe_counter!(
            VALIDATION_FAILURES_TOTAL,
            "Field-level validation failures, by field"
        );
    }

    pub fn submission_resolved(kind: SubmissionKind) {
        ::metrics::counter!(SUBMISSIONS_TOTAL, "kind" => kind.as_str()).increment(1);
    }

    pub fn spam_rejected(reason: SpamReason) {
        ::metrics::counter!(REJECTIONS_TOTAL, "reason" => reason.as_str()).increment(1);
    }

    pub fn endpoint_failed() {
        ::metrics::counter!(ENDPOINT_FAILURES_TOTAL).increment(1);
    }

    pub fn validation_failed(field: LeadField) {
        ::metrics::counter!(VALIDATION_FAILURES_TOTAL, "field" => field.as_str()).increment(1);
    }
}
