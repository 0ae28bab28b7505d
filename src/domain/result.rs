use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::payload::LeadPayload;

/// Validated form fields. Declaration order is validation order, and the
/// derived `Ord` keeps `ValidationResult::errors` in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LeadField {
    Name,
    Email,
    BusinessType,
    InvoiceVolume,
    Message,
}

impl LeadField {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadField::Name => "name",
            LeadField::Email => "email",
            LeadField::BusinessType => "businessType",
            LeadField::InvoiceVolume => "invoiceVolume",
            LeadField::Message => "message",
        }
    }
}

impl fmt::Display for LeadField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: BTreeMap<LeadField, String>,
}

impl ValidationResult {
    pub fn from_errors(errors: BTreeMap<LeadField, String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn error_for(&self, field: LeadField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// One-line summary suitable for logs and diagnostics
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Payload-free outcome tag, safe to hand to analytics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubmissionKind {
    Sent,
    StoredLocally,
    CopiedToClipboard,
    Rejected,
}

impl SubmissionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionKind::Sent => "sent",
            SubmissionKind::StoredLocally => "stored-locally",
            SubmissionKind::CopiedToClipboard => "copied-to-clipboard",
            SubmissionKind::Rejected => "rejected",
        }
    }
}

impl fmt::Display for SubmissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final outcome of one capture attempt
#[derive(Debug, Clone, PartialEq)]
pub enum LeadSubmissionResult {
    /// The remote endpoint accepted the lead
    Sent {
        payload: LeadPayload,
        diagnostic: Option<String>,
    },
    /// No endpoint configured, or delivery failed; the lead is held in the pending store
    StoredLocally {
        payload: LeadPayload,
        diagnostic: Option<String>,
    },
    /// The visitor copied the lead manually
    CopiedToClipboard {
        payload: LeadPayload,
        diagnostic: Option<String>,
    },
    /// Spam or invalid; never delivered
    Rejected {
        payload: LeadPayload,
        diagnostic: Option<String>,
    },
}

impl LeadSubmissionResult {
    pub fn kind(&self) -> SubmissionKind {
        match self {
            LeadSubmissionResult::Sent { .. } => SubmissionKind::Sent,
            LeadSubmissionResult::StoredLocally { .. } => SubmissionKind::StoredLocally,
            LeadSubmissionResult::CopiedToClipboard { .. } => SubmissionKind::CopiedToClipboard,
            LeadSubmissionResult::Rejected { .. } => SubmissionKind::Rejected,
        }
    }

    pub fn payload(&self) -> &LeadPayload {
        match self {
            LeadSubmissionResult::Sent { payload, .. }
            | LeadSubmissionResult::StoredLocally { payload, .. }
            | LeadSubmissionResult::CopiedToClipboard { payload, .. }
            | LeadSubmissionResult::Rejected { payload, .. } => payload,
        }
    }

    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            LeadSubmissionResult::Sent { diagnostic, .. }
            | LeadSubmissionResult::StoredLocally { diagnostic, .. }
            | LeadSubmissionResult::CopiedToClipboard { diagnostic, .. }
            | LeadSubmissionResult::Rejected { diagnostic, .. } => diagnostic.as_deref(),
        }
    }

    pub fn into_payload(self) -> LeadPayload {
        match self {
            LeadSubmissionResult::Sent { payload, .. }
            | LeadSubmissionResult::StoredLocally { payload, .. }
            | LeadSubmissionResult::CopiedToClipboard { payload, .. }
            | LeadSubmissionResult::Rejected { payload, .. } => payload,
        }
    }
}
