/// Limits and defaults shared across the lead pipeline

// Field limits (characters, not bytes)
pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 100;
pub const MESSAGE_MAX_CHARS: usize = 1000;

// Spam heuristics
pub const DEFAULT_MIN_FILL_MS: u64 = 1000;
pub const DEFAULT_MAX_LINKS: usize = 2;

// Remote delivery
pub const DEFAULT_ENDPOINT_TIMEOUT_MS: u64 = 10_000;
pub const IDEMPOTENCY_HEADER: &str = "Idempotency-Key";

// Local fallback storage
pub const DEFAULT_PENDING_DIR: &str = ".lead_capture/pending";

// Configuration sources
pub const DEFAULT_CONFIG_PATH: &str = "lead_capture.toml";
pub const CONFIG_PATH_ENV: &str = "LEAD_CAPTURE_CONFIG";
pub const ENDPOINT_URL_ENV: &str = "LEAD_ENDPOINT_URL";
pub const PENDING_DIR_ENV: &str = "LEAD_PENDING_DIR";

/// Query-string keys captured into `UtmParams`, in canonical order
pub const UTM_SOURCE: &str = "utm_source";
pub const UTM_MEDIUM: &str = "utm_medium";
pub const UTM_CAMPAIGN: &str = "utm_campaign";
pub const UTM_TERM: &str = "utm_term";
pub const UTM_CONTENT: &str = "utm_content";

/// Invoice volume buckets offered by the form
pub const INVOICE_VOLUME_BUCKETS: [&str; 4] = ["1-10", "11-50", "51-200", "200+"];
