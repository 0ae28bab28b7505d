use chrono::{DateTime, Utc};
use tracing::debug;

use crate::constants::{
    MESSAGE_MAX_CHARS, UTM_CAMPAIGN, UTM_CONTENT, UTM_MEDIUM, UTM_SOURCE, UTM_TERM,
};
use crate::domain::payload::LeadFields;
use crate::domain::{BusinessType, LeadPayload, LeadSource, RawLeadForm, UtmParams};

/// Turns raw form state into a canonical `LeadPayload`.
///
/// Normalization never fails: missing or illegal values are carried through
/// and left for the validator to report.
#[derive(Debug, Clone)]
pub struct LeadNormalizer {
    /// Truncation length for `message`; never above the validator's cap
    pub message_max_chars: usize,
}

impl Default for LeadNormalizer {
    fn default() -> Self {
        Self {
            message_max_chars: MESSAGE_MAX_CHARS,
        }
    }
}

impl LeadNormalizer {
    pub fn new(message_max_chars: usize) -> Self {
        Self {
            message_max_chars: message_max_chars.min(MESSAGE_MAX_CHARS),
        }
    }

    /// Normalize using the current time as `submittedAt`
    pub fn normalize(&self, raw: &RawLeadForm, page_query: &str) -> LeadPayload {
        self.normalize_at(raw, page_query, Utc::now())
    }

    pub fn normalize_at(
        &self,
        raw: &RawLeadForm,
        page_query: &str,
        now: DateTime<Utc>,
    ) -> LeadPayload {
        let message = optional_trimmed(raw.message.as_deref())
            .map(|m| truncate_chars(&m, self.message_max_chars.min(MESSAGE_MAX_CHARS)));

        let fields = LeadFields {
            name: raw.name.trim().to_string(),
            email: raw.email.trim().to_lowercase(),
            business_type: BusinessType::parse(raw.business_type.trim()),
            invoice_volume: optional_trimmed(raw.invoice_volume.as_deref()),
            message,
            source: LeadSource::parse(raw.source.trim()),
            utm: capture_utm(page_query),
            honeypot: raw.honeypot.trim().to_string(),
        };

        let payload = LeadPayload::new(fields, now);
        debug!(
            submission_id = %payload.submission_id(),
            persona = payload.persona().as_str(),
            source = payload.source().as_str(),
            "Normalized lead payload"
        );
        payload
    }
}

/// Normalize with default limits at the current time
pub fn normalize_lead_payload(raw: &RawLeadForm, page_query: &str) -> LeadPayload {
    LeadNormalizer::default().normalize(raw, page_query)
}

/// Extract `utm_*` parameters from a page URL or query string.
///
/// Accepts a full URL, `?query`, or a bare `a=b&c=d` query. The first
/// occurrence of each key wins.
pub fn capture_utm(page_query: &str) -> UtmParams {
    let query = extract_query(page_query);
    let mut utm = UtmParams::default();

    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        let slot = match key.as_ref() {
            UTM_SOURCE => &mut utm.source,
            UTM_MEDIUM => &mut utm.medium,
            UTM_CAMPAIGN => &mut utm.campaign,
            UTM_TERM => &mut utm.term,
            UTM_CONTENT => &mut utm.content,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value.trim().to_string());
        }
    }

    utm
}

fn extract_query(input: &str) -> &str {
    let input = input.trim();
    let without_fragment = input.split('#').next().unwrap_or_default();
    match without_fragment.split_once('?') {
        Some((_, query)) => query,
        // A URL without a query string carries no parameters
        None if without_fragment.contains("://") => "",
        None => without_fragment,
    }
}

fn optional_trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn truncate_chars(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((cut, _)) => value[..cut].to_string(),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PersonaType;
    use chrono::TimeZone;

    fn raw_form() -> RawLeadForm {
        RawLeadForm {
            name: "  Ana Horvat ".to_string(),
            email: " Ana.Horvat@Example.COM ".to_string(),
            business_type: " doo ".to_string(),
            invoice_volume: Some(" 1-10 ".to_string()),
            message: Some("  Zanima me demo. ".to_string()),
            source: "contact-form".to_string(),
            honeypot: String::new(),
        }
    }

    #[test]
    fn test_normalize_trims_and_lowercases() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap();
        let payload = LeadNormalizer::default().normalize_at(&raw_form(), "", now);

        assert_eq!(payload.name(), "Ana Horvat");
        assert_eq!(payload.email(), "ana.horvat@example.com");
        assert_eq!(payload.business_type(), &BusinessType::Doo);
        assert_eq!(payload.persona(), PersonaType::Company);
        assert_eq!(payload.invoice_volume(), Some("1-10"));
        assert_eq!(payload.message(), Some("Zanima me demo."));
        assert_eq!(payload.source(), LeadSource::ContactForm);
        assert_eq!(payload.submitted_at(), now);
    }

    #[test]
    fn test_unknown_business_type_fails_closed_to_generic_persona() {
        let mut raw = raw_form();
        raw.business_type = "d.o.o.".to_string();
        let payload = normalize_lead_payload(&raw, "");

        assert!(!payload.business_type().is_known());
        assert_eq!(payload.persona(), PersonaType::Generic);
    }

    #[test]
    fn test_empty_form_still_produces_payload() {
        let payload = normalize_lead_payload(&RawLeadForm::default(), "");

        assert_eq!(payload.name(), "");
        assert_eq!(payload.persona(), PersonaType::Generic);
        assert_eq!(payload.source(), LeadSource::Unknown);
        assert!(payload.message().is_none());
        assert!(payload.utm().is_empty());
    }

    #[test]
    fn test_message_truncated_on_char_boundary() {
        let mut raw = raw_form();
        raw.message = Some("čćžšđ".repeat(300));
        let payload = LeadNormalizer::new(1000).normalize(&raw, "");

        assert_eq!(payload.message().unwrap().chars().count(), 1000);
    }

    #[test]
    fn test_truncation_never_exceeds_validator_cap() {
        let mut raw = raw_form();
        raw.message = Some("m".repeat(1200));

        let payload = LeadNormalizer::new(1500).normalize(&raw, "");
        assert_eq!(payload.message().unwrap().chars().count(), MESSAGE_MAX_CHARS);

        let widened = LeadNormalizer {
            message_max_chars: 5000,
        };
        assert_eq!(
            widened.normalize(&raw, "").message().unwrap().chars().count(),
            MESSAGE_MAX_CHARS
        );
    }

    #[test]
    fn test_capture_utm_distinguishes_empty_from_absent() {
        let utm = capture_utm("https://site.test/cijene?utm_source=news&utm_medium=&ref=x#top");

        assert_eq!(utm.source.as_deref(), Some("news"));
        assert_eq!(utm.medium.as_deref(), Some(""));
        assert_eq!(utm.campaign, None);
        assert_eq!(utm.term, None);
    }

    #[test]
    fn test_capture_utm_decodes_bare_query() {
        let utm = capture_utm("utm_campaign=spring%20sale&utm_campaign=second&utm_term=a+b");

        assert_eq!(utm.campaign.as_deref(), Some("spring sale"));
        assert_eq!(utm.term.as_deref(), Some("a b"));
    }

    #[test]
    fn test_url_without_query_has_no_utm() {
        assert!(capture_utm("https://site.test/utm_source=fake").is_empty());
    }

    #[test]
    fn test_each_normalization_gets_its_own_submission_id() {
        let a = normalize_lead_payload(&raw_form(), "");
        let b = normalize_lead_payload(&raw_form(), "");
        assert_ne!(a.submission_id(), b.submission_id());
    }
}
