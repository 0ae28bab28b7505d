pub mod app;
pub mod config;
pub mod constants;
pub mod domain;
pub mod error;
pub mod infra;
pub mod logging;
pub mod metrics;
pub mod pipeline;

pub use app::{copy_lead_to_clipboard, SubmissionConfig, SubmitLeadUseCase};
pub use domain::{
    BusinessType, LeadField, LeadPayload, LeadSource, LeadSubmissionResult, PersonaType,
    RawLeadForm, SubmissionKind, UtmParams, ValidationResult,
};
pub use error::{LeadError, Result};
pub use pipeline::{
    build_url_with_utm, is_spam_submission, normalize_lead_payload, validate_lead_payload,
    TimingMeta,
};
