use tracing::{info, warn};

use crate::app::ports::ClipboardPort;
use crate::domain::LeadPayload;
use crate::pipeline::format_lead_for_clipboard;

/// Copy a lead to the clipboard as text.
///
/// Returns `false` instead of an error when the clipboard is unavailable or
/// access is denied, so the caller can offer a manual select-and-copy.
pub fn copy_lead_to_clipboard(payload: &LeadPayload, clipboard: &dyn ClipboardPort) -> bool {
    let text = format_lead_for_clipboard(payload);
    match clipboard.write_text(&text) {
        Ok(()) => {
            info!(submission_id = %payload.submission_id(), "Lead copied to clipboard");
            true
        }
        Err(e) => {
            warn!(submission_id = %payload.submission_id(), "Clipboard copy failed: {}", e);
            false
        }
    }
}
