use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use uuid::Uuid;

/// Declared business type, as offered by the form's select control.
///
/// Anything the form did not offer is carried verbatim in `Unknown` so that
/// normalization never fails; the validator reports it instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BusinessType {
    PausalniObrt,
    VatObrt,
    Doo,
    Accountant,
    Unknown(String),
}

impl BusinessType {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "pausalni-obrt" => BusinessType::PausalniObrt,
            "vat-obrt" => BusinessType::VatObrt,
            "doo" => BusinessType::Doo,
            "accountant" => BusinessType::Accountant,
            other => BusinessType::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BusinessType::PausalniObrt => "pausalni-obrt",
            BusinessType::VatObrt => "vat-obrt",
            BusinessType::Doo => "doo",
            BusinessType::Accountant => "accountant",
            BusinessType::Unknown(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, BusinessType::Unknown(_))
    }

    /// Fixed persona mapping; unknown business types fall back to `Generic`.
    pub fn persona(&self) -> PersonaType {
        match self {
            BusinessType::PausalniObrt => PersonaType::SoleTrader,
            BusinessType::VatObrt => PersonaType::VatTrader,
            BusinessType::Doo => PersonaType::Company,
            BusinessType::Accountant => PersonaType::Accountant,
            BusinessType::Unknown(_) => PersonaType::Generic,
        }
    }
}

impl From<String> for BusinessType {
    fn from(raw: String) -> Self {
        BusinessType::parse(&raw)
    }
}

impl From<BusinessType> for String {
    fn from(value: BusinessType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for BusinessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse visitor segment derived from `BusinessType`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PersonaType {
    SoleTrader,
    VatTrader,
    Company,
    Accountant,
    Generic,
}

impl PersonaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonaType::SoleTrader => "sole-trader",
            PersonaType::VatTrader => "vat-trader",
            PersonaType::Company => "company",
            PersonaType::Accountant => "accountant",
            PersonaType::Generic => "generic",
        }
    }
}

/// UI surface that produced the lead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeadSource {
    GuidanceCard,
    ContactForm,
    PricingCta,
    Unknown,
}

impl LeadSource {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "guidance-card" => LeadSource::GuidanceCard,
            "contact-form" => LeadSource::ContactForm,
            "pricing-cta" => LeadSource::PricingCta,
            _ => LeadSource::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadSource::GuidanceCard => "guidance-card",
            LeadSource::ContactForm => "contact-form",
            LeadSource::PricingCta => "pricing-cta",
            LeadSource::Unknown => "unknown",
        }
    }
}

/// Marketing tags captured from the landing URL.
///
/// `None` means the parameter was absent; `Some("")` means it was present
/// with an empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtmParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl UtmParams {
    /// Present parameters paired with their query-string keys, in canonical order.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        use crate::constants::{UTM_CAMPAIGN, UTM_CONTENT, UTM_MEDIUM, UTM_SOURCE, UTM_TERM};

        [
            (UTM_SOURCE, &self.source),
            (UTM_MEDIUM, &self.medium),
            (UTM_CAMPAIGN, &self.campaign),
            (UTM_TERM, &self.term),
            (UTM_CONTENT, &self.content),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

/// Form state exactly as the UI hands it over, before any cleanup
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawLeadForm {
    pub name: String,
    pub email: String,
    pub business_type: String,
    pub invoice_volume: Option<String>,
    pub message: Option<String>,
    pub source: String,
    pub honeypot: String,
}

/// Canonical, normalized lead.
///
/// Only the normalizer builds one from form input; everything downstream
/// reads it through accessors. Stored payloads deserialize through
/// `LeadPayloadRecord`, which recomputes the persona from the business type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadPayload {
    submission_id: Uuid,
    name: String,
    email: String,
    business_type: BusinessType,
    persona: PersonaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    invoice_volume: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    source: LeadSource,
    utm: UtmParams,
    submitted_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    honeypot: String,
}

/// Wire shape accepted when reading a payload back from storage
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LeadPayloadRecord {
    submission_id: Uuid,
    name: String,
    email: String,
    business_type: BusinessType,
    #[serde(default)]
    invoice_volume: Option<String>,
    #[serde(default)]
    message: Option<String>,
    source: LeadSource,
    #[serde(default)]
    utm: UtmParams,
    submitted_at: DateTime<Utc>,
    #[serde(default)]
    honeypot: String,
}

impl<'de> Deserialize<'de> for LeadPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        LeadPayloadRecord::deserialize(deserializer).map(LeadPayloadRecord::into_payload)
    }
}

impl LeadPayloadRecord {
    fn into_payload(self) -> LeadPayload {
        let persona = self.business_type.persona();
        LeadPayload {
            submission_id: self.submission_id,
            name: self.name,
            email: self.email,
            business_type: self.business_type,
            persona,
            invoice_volume: self.invoice_volume,
            message: self.message,
            source: self.source,
            utm: self.utm,
            submitted_at: self.submitted_at,
            honeypot: self.honeypot,
        }
    }
}

/// Cleaned field values handed from the normalizer to `LeadPayload::new`
pub(crate) struct LeadFields {
    pub name: String,
    pub email: String,
    pub business_type: BusinessType,
    pub invoice_volume: Option<String>,
    pub message: Option<String>,
    pub source: LeadSource,
    pub utm: UtmParams,
    pub honeypot: String,
}

impl LeadPayload {
    pub(crate) fn new(fields: LeadFields, submitted_at: DateTime<Utc>) -> Self {
        let persona = fields.business_type.persona();
        Self {
            submission_id: Uuid::new_v4(),
            name: fields.name,
            email: fields.email,
            business_type: fields.business_type,
            persona,
            invoice_volume: fields.invoice_volume,
            message: fields.message,
            source: fields.source,
            utm: fields.utm,
            submitted_at,
            honeypot: fields.honeypot,
        }
    }

    pub fn submission_id(&self) -> Uuid {
        self.submission_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn business_type(&self) -> &BusinessType {
        &self.business_type
    }

    pub fn persona(&self) -> PersonaType {
        self.persona
    }

    pub fn invoice_volume(&self) -> Option<&str> {
        self.invoice_volume.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn source(&self) -> LeadSource {
        self.source
    }

    pub fn utm(&self) -> &UtmParams {
        &self.utm
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    pub fn honeypot(&self) -> &str {
        &self.honeypot
    }
}
