use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

use crate::constants::{INVOICE_VOLUME_BUCKETS, MESSAGE_MAX_CHARS, NAME_MAX_CHARS, NAME_MIN_CHARS};
use crate::domain::{LeadField, LeadPayload, ValidationResult};

// Deliberately loose: one @, no whitespace, a dot in the domain part.
static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Check a payload field by field.
///
/// Pure: no I/O, and the same payload always yields the same result,
/// including error order.
pub fn validate_lead_payload(payload: &LeadPayload) -> ValidationResult {
    let mut errors = BTreeMap::new();

    if let Some(message) = check_name(payload.name()) {
        errors.insert(LeadField::Name, message);
    }
    if let Some(message) = check_email(payload.email()) {
        errors.insert(LeadField::Email, message);
    }
    if !payload.business_type().is_known() {
        let message = if payload.business_type().as_str().is_empty() {
            "Please select your business type".to_string()
        } else {
            format!(
                "Unknown business type '{}'",
                payload.business_type().as_str()
            )
        };
        errors.insert(LeadField::BusinessType, message);
    }
    if let Some(volume) = payload.invoice_volume() {
        if !INVOICE_VOLUME_BUCKETS.contains(&volume) {
            errors.insert(
                LeadField::InvoiceVolume,
                format!("Unknown invoice volume '{}'", volume),
            );
        }
    }
    if let Some(message) = payload.message() {
        if message.chars().count() > MESSAGE_MAX_CHARS {
            errors.insert(
                LeadField::Message,
                format!("Message must be at most {} characters", MESSAGE_MAX_CHARS),
            );
        }
    }

    ValidationResult::from_errors(errors)
}

fn check_name(name: &str) -> Option<String> {
    let len = name.trim().chars().count();
    if len == 0 {
        Some("Name is required".to_string())
    } else if len < NAME_MIN_CHARS {
        Some(format!("Name must be at least {} characters", NAME_MIN_CHARS))
    } else if len > NAME_MAX_CHARS {
        Some(format!("Name must be at most {} characters", NAME_MAX_CHARS))
    } else {
        None
    }
}

fn check_email(email: &str) -> Option<String> {
    if email.is_empty() {
        Some("Email is required".to_string())
    } else if !EMAIL_SHAPE.is_match(email) {
        Some("Please enter a valid email address".to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawLeadForm;
    use crate::pipeline::normalize::normalize_lead_payload;
    use serde_json::json;

    fn payload(name: &str, email: &str, business_type: &str) -> LeadPayload {
        let raw = RawLeadForm {
            name: name.to_string(),
            email: email.to_string(),
            business_type: business_type.to_string(),
            invoice_volume: Some("1-10".to_string()),
            source: "contact-form".to_string(),
            ..Default::default()
        };
        normalize_lead_payload(&raw, "")
    }

    #[test]
    fn test_valid_payload_has_no_errors() {
        let result = validate_lead_payload(&payload("Ana", "ana@example.com", "vat-obrt"));
        assert!(result.valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_short_name_and_bad_email_are_reported_in_order() {
        let result = validate_lead_payload(&payload("A", "bad", "doo"));

        assert!(!result.valid);
        let fields: Vec<_> = result.errors.keys().copied().collect();
        assert_eq!(fields, vec![LeadField::Name, LeadField::Email]);
        assert!(result.error_for(LeadField::Name).unwrap().contains("at least 2"));
        assert!(result.error_for(LeadField::BusinessType).is_none());
    }

    #[test]
    fn test_missing_fields_use_required_messages() {
        let result = validate_lead_payload(&payload("", "", ""));

        assert_eq!(result.error_for(LeadField::Name), Some("Name is required"));
        assert_eq!(result.error_for(LeadField::Email), Some("Email is required"));
        assert_eq!(
            result.error_for(LeadField::BusinessType),
            Some("Please select your business type")
        );
    }

    #[test]
    fn test_overlong_name_rejected() {
        let result = validate_lead_payload(&payload(&"x".repeat(101), "a@b.hr", "doo"));
        assert!(result.error_for(LeadField::Name).unwrap().contains("at most 100"));
    }

    #[test]
    fn test_length_limits_are_inclusive() {
        for name in ["Al".to_string(), "x".repeat(100)] {
            let result = validate_lead_payload(&payload(&name, "a@b.hr", "doo"));
            assert!(result.valid, "name of {} chars", name.chars().count());
        }

        let raw = RawLeadForm {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            business_type: "doo".to_string(),
            message: Some("ž".repeat(1000)),
            ..Default::default()
        };
        assert!(validate_lead_payload(&normalize_lead_payload(&raw, "")).valid);
    }

    #[test]
    fn test_unknown_invoice_volume_rejected() {
        let raw = RawLeadForm {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            business_type: "doo".to_string(),
            invoice_volume: Some("lots".to_string()),
            ..Default::default()
        };
        let result = validate_lead_payload(&normalize_lead_payload(&raw, ""));
        assert_eq!(result.errors.len(), 1);
        assert!(result.error_for(LeadField::InvoiceVolume).is_some());
    }

    #[test]
    fn test_unnormalized_long_message_still_caught() {
        // Stored payloads skip the normalizer, so the cap is enforced here too
        let stored: LeadPayload = serde_json::from_value(json!({
            "submissionId": "0b8a3c55-3f9e-4a57-8f53-0f3b5d7e2a10",
            "name": "Ana",
            "email": "ana@example.com",
            "businessType": "accountant",
            "message": "m".repeat(1001),
            "source": "pricing-cta",
            "submittedAt": "2026-03-01T10:00:00Z"
        }))
        .unwrap();

        let result = validate_lead_payload(&stored);
        assert!(!result.valid);
        assert!(result.error_for(LeadField::Message).is_some());
    }

    #[test]
    fn test_validation_is_deterministic() {
        let p = payload("A", "no-at-sign", "sole-trader");
        assert_eq!(validate_lead_payload(&p), validate_lead_payload(&p));
    }
}
