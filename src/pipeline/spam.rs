use chrono::{DateTime, Duration, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::constants::{DEFAULT_MAX_LINKS, DEFAULT_MIN_FILL_MS};
use crate::domain::LeadPayload;

static URL_LIKE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:https?://|\bwww\.)\S+").expect("url pattern is valid"));

/// Timing information collected by the form around submission
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingMeta {
    /// When the form was first rendered to the visitor
    pub rendered_at: Option<DateTime<Utc>>,
}

impl TimingMeta {
    pub fn rendered_at(rendered_at: DateTime<Utc>) -> Self {
        Self {
            rendered_at: Some(rendered_at),
        }
    }

    /// No timing information; the timing rule will not fire
    pub fn unknown() -> Self {
        Self::default()
    }
}

/// Which rule flagged a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpamReason {
    Honeypot,
    TooFast,
    LinkInjection,
}

impl SpamReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpamReason::Honeypot => "honeypot",
            SpamReason::TooFast => "too-fast",
            SpamReason::LinkInjection => "link-injection",
        }
    }
}

impl fmt::Display for SpamReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct SpamFilterConfig {
    /// Submissions faster than this after render are treated as automated
    pub min_fill_time: Duration,
    /// Messages with more URL-like substrings than this are treated as link injection
    pub max_links: usize,
}

impl Default for SpamFilterConfig {
    fn default() -> Self {
        Self {
            min_fill_time: Duration::milliseconds(DEFAULT_MIN_FILL_MS as i64),
            max_links: DEFAULT_MAX_LINKS,
        }
    }
}

/// Advisory classifier. Flags only on affirmative matches; missing
/// information never counts against a submission.
#[derive(Debug, Clone, Default)]
pub struct SpamFilter {
    pub config: SpamFilterConfig,
}

impl SpamFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SpamFilterConfig) -> Self {
        Self { config }
    }

    /// First matching rule, if any, in order honeypot → timing → links
    pub fn classify(&self, payload: &LeadPayload, timing: &TimingMeta) -> Option<SpamReason> {
        if !payload.honeypot().is_empty() {
            debug!(submission_id = %payload.submission_id(), "Honeypot field populated");
            return Some(SpamReason::Honeypot);
        }

        if let Some(rendered_at) = timing.rendered_at {
            let elapsed = payload.submitted_at() - rendered_at;
            // Negative elapsed means clock skew, which proves nothing
            if elapsed >= Duration::zero() && elapsed < self.config.min_fill_time {
                debug!(
                    submission_id = %payload.submission_id(),
                    elapsed_ms = elapsed.num_milliseconds(),
                    "Form submitted faster than a human could fill it"
                );
                return Some(SpamReason::TooFast);
            }
        }

        if let Some(message) = payload.message() {
            let links = count_links(message);
            if links > self.config.max_links {
                debug!(submission_id = %payload.submission_id(), links, "Message carries too many links");
                return Some(SpamReason::LinkInjection);
            }
        }

        None
    }

    pub fn is_spam(&self, payload: &LeadPayload, timing: &TimingMeta) -> bool {
        self.classify(payload, timing).is_some()
    }
}

/// Classify with default thresholds
pub fn is_spam_submission(payload: &LeadPayload, timing: &TimingMeta) -> bool {
    SpamFilter::new().is_spam(payload, timing)
}

fn count_links(text: &str) -> usize {
    URL_LIKE.find_iter(text).count()
}
