//! Lead data shapes shared across layers

pub mod payload;
pub mod result;

pub use payload::{BusinessType, LeadPayload, LeadSource, PersonaType, RawLeadForm, UtmParams};
pub use result::{LeadField, LeadSubmissionResult, SubmissionKind, ValidationResult};
