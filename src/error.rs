use thiserror::Error;

#[derive(Error, Debug)]
pub enum LeadError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("Endpoint responded with status {status}")]
    EndpointStatus { status: u16 },

    #[error("Pending lead not found: {0}")]
    PendingLeadNotFound(uuid::Uuid),
}

pub type Result<T> = std::result::Result<T, LeadError>;
