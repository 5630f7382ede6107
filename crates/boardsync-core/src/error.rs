use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    /// Rejected locally before any request was sent.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Transport error{}: {message}", fmt_status(.status))]
    Transport {
        status: Option<u16>,
        message: String,
    },

    #[error("Not authorized: {0}")]
    Authorization(String),

    /// The addressed column or card is not present in local state.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

fn fmt_status(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

impl SyncError {
    pub fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Transport {
            status,
            message: message.into(),
        }
    }

    /// Whether the HTTP layer may retry the request that produced this error.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { status: None, .. } => true,
            Self::Transport {
                status: Some(status),
                ..
            } => *status >= 500 || *status == 408 || *status == 429,
            _ => false,
        }
    }

    /// Errors the presentation layer should not show to the user.
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_statuses() {
        assert!(SyncError::transport(None, "connection reset").is_retryable());
        assert!(SyncError::transport(Some(503), "unavailable").is_retryable());
        assert!(SyncError::transport(Some(408), "timeout").is_retryable());
        assert!(SyncError::transport(Some(429), "slow down").is_retryable());

        assert!(!SyncError::transport(Some(400), "bad request").is_retryable());
        assert!(!SyncError::Authorization("forbidden".to_string()).is_retryable());
        assert!(!SyncError::Validation("empty title".to_string()).is_retryable());
    }

    #[test]
    fn test_transport_display_includes_status() {
        let err = SyncError::transport(Some(502), "bad gateway");
        assert_eq!(err.to_string(), "Transport error (HTTP 502): bad gateway");

        let err = SyncError::transport(None, "dns failure");
        assert_eq!(err.to_string(), "Transport error: dns failure");
    }

    #[test]
    fn test_only_not_found_is_silent() {
        assert!(SyncError::NotFound("card".to_string()).is_silent());
        assert!(!SyncError::Internal("boom".to_string()).is_silent());
    }
}
