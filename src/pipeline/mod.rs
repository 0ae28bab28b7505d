// Lead processing stages: normalize, validate, spam filter, plus the
// pure formatting helpers used by the fallbacks.

pub mod clipboard_text;
pub mod normalize;
pub mod spam;
pub mod utm;
pub mod validate;

pub use clipboard_text::format_lead_for_clipboard;
pub use normalize::{capture_utm, normalize_lead_payload, LeadNormalizer};
pub use spam::{is_spam_submission, SpamFilter, SpamFilterConfig, SpamReason, TimingMeta};
pub use utm::build_url_with_utm;
pub use validate::validate_lead_payload;
