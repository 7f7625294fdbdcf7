use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailError {
    #[error("Request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {reason} (got '{value}')")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid submission transition: {from} -> {to}")]
    StateError { from: String, to: String },
}

impl MailError {
    /// 逾時與其他網路錯誤要分開處理
    pub fn is_timeout(&self) -> bool {
        match self {
            MailError::Timeout { .. } => true,
            MailError::NetworkError(e) => e.is_timeout(),
            _ => false,
        }
    }

    /// The single message shown to the person who submitted the form.
    pub fn user_friendly_message(&self) -> String {
        match self {
            MailError::Timeout { .. } => "Network timeout. Please try again.".to_string(),
            e if e.is_timeout() => "Network timeout. Please try again.".to_string(),
            MailError::NetworkError(_) => "Network error. Please try again later.".to_string(),
            MailError::ServerError { message, .. } => message.clone(),
            MailError::MalformedResponse { .. } => "Something went wrong".to_string(),
            MailError::ValidationError { message } => message.clone(),
            MailError::ConfigError { message } => format!("Configuration problem: {}", message),
            MailError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            MailError::IoError(e) => format!("File access failed: {}", e),
            MailError::SerializationError(e) => format!("Could not encode data: {}", e),
            MailError::StateError { .. } => "Internal submission error".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            MailError::Timeout { .. } => "The mail relay did not answer in time, retry in a moment",
            e if e.is_timeout() => "The mail relay did not answer in time, retry in a moment",
            MailError::NetworkError(_) => "Check the network connection and the endpoint URL",
            MailError::ServerError { .. } | MailError::MalformedResponse { .. } => {
                "The mail relay rejected the enquiry, check its logs"
            }
            MailError::ValidationError { .. } => "Fill in name, email and message",
            MailError::ConfigError { .. } | MailError::InvalidConfigValueError { .. } => {
                "Fix the configuration file and run again"
            }
            MailError::IoError(_) => "Check that the settings directory is writable",
            MailError::SerializationError(_) | MailError::StateError { .. } => {
                "Run with --verbose and report the log output"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, MailError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_is_distinct_from_other_failures() {
        let timeout = MailError::Timeout { timeout_ms: 12000 };
        assert!(timeout.is_timeout());
        assert_eq!(
            timeout.user_friendly_message(),
            "Network timeout. Please try again."
        );
        assert_eq!(
            timeout.recovery_suggestion(),
            "The mail relay did not answer in time, retry in a moment"
        );

        let server = MailError::ServerError {
            status: 500,
            message: "db down".to_string(),
        };
        assert!(!server.is_timeout());
        assert_eq!(server.user_friendly_message(), "db down");
        assert_eq!(
            server.recovery_suggestion(),
            "The mail relay rejected the enquiry, check its logs"
        );
    }
}
