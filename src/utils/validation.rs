use crate::utils::error::{MailError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(MailError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(MailError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(MailError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(MailError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(MailError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Required enquiry fields: empty or whitespace-only values are rejected.
pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(MailError::ValidationError {
            message: format!("'{}' cannot be empty or whitespace-only", field_name),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(MailError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("endpoints.production", "https://example.com/send-mail").is_ok());
        assert!(validate_url("endpoints.local", "http://localhost:5000/send-mail").is_ok());
        assert!(validate_url("endpoints.local", "").is_err());
        assert!(validate_url("endpoints.local", "send-mail").is_err());
        assert!(validate_url("endpoints.local", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("name", "Ada").is_ok());
        assert!(validate_non_empty_string("name", "").is_err());

        let err = validate_non_empty_string("message", "  \n\t").unwrap_err();
        assert!(matches!(err, MailError::ValidationError { .. }));
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("timeouts.form_ms", 12_000u64, 1, 300_000).is_ok());
        assert!(validate_range("timeouts.form_ms", 0u64, 1, 300_000).is_err());
        assert!(validate_range("timeouts.form_ms", 300_001u64, 1, 300_000).is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("settings.path", ".enquiry-mailer").is_ok());
        assert!(validate_path("settings.path", "").is_err());
        assert!(validate_path("settings.path", "bad\0path").is_err());
    }
}
