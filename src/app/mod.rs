pub mod clipboard_use_case;
pub mod ports;
pub mod submit_use_case;

pub use clipboard_use_case::copy_lead_to_clipboard;
pub use submit_use_case::{SubmissionConfig, SubmitLeadUseCase};
