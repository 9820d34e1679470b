use thiserror::Error;

/// Every way a single notifier invocation can fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// Required configuration is missing or invalid. Raised before any network call.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// The schedule provider could not be reached or answered with a non-2xx status.
    #[error("schedule provider unavailable: {0}")]
    UpstreamUnavailable(String),
    /// The schedule provider answered but the payload could not be interpreted.
    #[error("schedule payload malformed: {0}")]
    UpstreamMalformed(String),
    /// The messaging provider rejected the message or could not be reached.
    #[error("message delivery failed: {0}")]
    DeliveryFailed(String),
}

impl NotifyError {
    /// Process exit code reported to the invoking scheduler.
    pub fn exit_code(&self) -> u8 {
        match self {
            NotifyError::Configuration(_) => 2,
            NotifyError::UpstreamUnavailable(_) => 3,
            NotifyError::UpstreamMalformed(_) => 4,
            NotifyError::DeliveryFailed(_) => 5,
        }
    }

    /// Short stable name used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            NotifyError::Configuration(_) => "configuration",
            NotifyError::UpstreamUnavailable(_) => "upstream_unavailable",
            NotifyError::UpstreamMalformed(_) => "upstream_malformed",
            NotifyError::DeliveryFailed(_) => "delivery_failed",
        }
    }
}

pub type Result<T> = std::result::Result<T, NotifyError>;
