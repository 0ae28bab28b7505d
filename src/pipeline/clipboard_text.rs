use std::fmt::Write;

use crate::domain::LeadPayload;

/// Render a lead as `Field: value` lines for pasting into an email client.
/// Absent optional fields are omitted.
pub fn format_lead_for_clipboard(payload: &LeadPayload) -> String {
    let mut lines: Vec<(&str, String)> = vec![
        ("Name", payload.name().to_string()),
        ("Email", payload.email().to_string()),
        ("Business type", payload.business_type().to_string()),
        ("Persona", payload.persona().as_str().to_string()),
    ];
    if let Some(volume) = payload.invoice_volume() {
        lines.push(("Invoice volume", volume.to_string()));
    }
    if let Some(message) = payload.message() {
        // Keep the block line-oriented
        lines.push(("Message", message.replace(['\r', '\n'], " ")));
    }
    lines.push(("Source", payload.source().as_str().to_string()));
    for (key, value) in payload.utm().entries() {
        lines.push((key, value.to_string()));
    }
    lines.push(("Submitted at", payload.submitted_at().to_rfc3339()));
    lines.push(("Submission ID", payload.submission_id().to_string()));

    let mut text = String::new();
    for (label, value) in lines {
        let _ = writeln!(text, "{}: {}", label, value);
    }
    text
}
