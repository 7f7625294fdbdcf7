use crate::domain::model::{MailResponse, MailResult};
use crate::utils::error::{MailError, Result};

/// Caller-specific wording for failures the relay did not explain itself.
#[derive(Debug, Clone)]
pub struct FailureMessages {
    pub status_message: fn(u16) -> String,
    pub unknown: &'static str,
}

impl FailureMessages {
    pub fn hero() -> Self {
        Self {
            status_message: |status| format!("Status {}", status),
            unknown: "Unknown error",
        }
    }

    pub fn contact() -> Self {
        Self {
            status_message: |status| format!("Server error ({})", status),
            unknown: "Something went wrong",
        }
    }
}

type Extractor = fn(&MailResponse, &FailureMessages) -> Option<String>;

/// Tried in order; the first non-empty message wins.
const EXTRACTORS: [Extractor; 5] = [
    server_error_field,
    status_text,
    status_code_message,
    raw_text,
    unknown_fallback,
];

// A falsy `error` (null, false, 0) means the relay reported no error.
fn server_error_field(response: &MailResponse, _: &FailureMessages) -> Option<String> {
    match response.data.as_ref()?.get("error")? {
        serde_json::Value::Null | serde_json::Value::Bool(false) => None,
        serde_json::Value::Number(n) if n.as_f64() == Some(0.0) => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

// The two status tiers only describe failed statuses. A 2xx without the
// success flag falls through to the body text.
fn status_text(response: &MailResponse, _: &FailureMessages) -> Option<String> {
    if response.ok {
        return None;
    }
    response.status_text.clone()
}

fn status_code_message(response: &MailResponse, messages: &FailureMessages) -> Option<String> {
    if response.ok || response.status == 0 {
        return None;
    }
    Some((messages.status_message)(response.status))
}

fn raw_text(response: &MailResponse, _: &FailureMessages) -> Option<String> {
    Some(response.text.clone())
}

fn unknown_fallback(_: &MailResponse, messages: &FailureMessages) -> Option<String> {
    Some(messages.unknown.to_string())
}

/// The message for an undelivered reply: the relay's `error` field, then
/// the status text, then the status-code message, then the raw body, then
/// the caller's unknown-error text.
///
/// Both status tiers are skipped for 2xx replies, so a 2xx without
/// `success: true` is reported by its body text (or the unknown-error
/// text when the body is empty), never as "OK" or "Status 200".
pub fn failure_reason(response: &MailResponse, messages: &FailureMessages) -> String {
    EXTRACTORS
        .iter()
        .filter_map(|extract| extract(response, messages))
        .find(|message| !message.trim().is_empty())
        .unwrap_or_else(|| messages.unknown.to_string())
}

/// `Ok` only for a delivered enquiry, otherwise a [`MailError::ServerError`]
/// carrying the extracted reason.
pub fn ensure_delivered(response: &MailResponse, messages: &FailureMessages) -> Result<()> {
    if response.is_delivered() {
        return Ok(());
    }
    Err(MailError::ServerError {
        status: response.status,
        message: failure_reason(response, messages),
    })
}

pub fn classify(response: &MailResponse, messages: &FailureMessages) -> MailResult {
    match ensure_delivered(response, messages) {
        Ok(()) => MailResult::Success,
        Err(MailError::ServerError { message, .. }) => MailResult::Failure(message),
        Err(e) => MailResult::Failure(e.user_friendly_message()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::client::parse_json_body;

    fn response(status: u16, status_text: Option<&str>, body: &str) -> MailResponse {
        MailResponse {
            status,
            ok: (200..300).contains(&status),
            status_text: status_text.map(str::to_string),
            data: parse_json_body(body).unwrap_or(None),
            text: body.to_string(),
        }
    }

    #[test]
    fn test_success() {
        let r = response(200, Some("OK"), r#"{"success":true}"#);
        assert_eq!(classify(&r, &FailureMessages::contact()), MailResult::Success);
    }

    #[test]
    fn test_server_error_field_wins() {
        let r = response(500, Some("Internal Server Error"), r#"{"error":"db down"}"#);
        assert_eq!(
            classify(&r, &FailureMessages::hero()),
            MailResult::Failure("db down".to_string())
        );

        // 即使狀態碼成功，伺服器回報的錯誤仍優先
        let r = response(200, Some("OK"), r#"{"success":false,"error":"quota exceeded"}"#);
        assert_eq!(failure_reason(&r, &FailureMessages::hero()), "quota exceeded");
    }

    #[test]
    fn test_status_text_then_status_code() {
        let r = response(502, Some("Bad Gateway"), "");
        assert_eq!(failure_reason(&r, &FailureMessages::contact()), "Bad Gateway");

        let r = response(599, None, "");
        assert_eq!(failure_reason(&r, &FailureMessages::contact()), "Server error (599)");
        assert_eq!(failure_reason(&r, &FailureMessages::hero()), "Status 599");
    }

    #[test]
    fn test_empty_error_field_is_skipped() {
        let r = response(503, Some("Service Unavailable"), r#"{"error":""}"#);
        assert_eq!(
            failure_reason(&r, &FailureMessages::hero()),
            "Service Unavailable"
        );
    }

    #[test]
    fn test_falsy_error_field_is_skipped() {
        let r = response(500, Some("Internal Server Error"), r#"{"error":false}"#);
        assert_eq!(
            failure_reason(&r, &FailureMessages::contact()),
            "Internal Server Error"
        );

        let r = response(500, None, r#"{"error":0}"#);
        assert_eq!(failure_reason(&r, &FailureMessages::hero()), "Status 500");

        let r = response(500, None, r#"{"error":42}"#);
        assert_eq!(failure_reason(&r, &FailureMessages::hero()), "42");
    }

    #[test]
    fn test_success_status_skips_status_tiers() {
        let r = response(200, Some("OK"), r#"{"success":false}"#);
        assert_eq!(
            failure_reason(&r, &FailureMessages::hero()),
            r#"{"success":false}"#
        );
    }

    #[test]
    fn test_non_json_body_uses_raw_text() {
        let r = response(200, Some("OK"), "mail queued maybe");
        assert_eq!(
            classify(&r, &FailureMessages::contact()),
            MailResult::Failure("mail queued maybe".to_string())
        );
    }

    #[test]
    fn test_unknown_fallback() {
        let r = response(200, Some("OK"), "");
        assert_eq!(failure_reason(&r, &FailureMessages::hero()), "Unknown error");
        assert_eq!(
            failure_reason(&r, &FailureMessages::contact()),
            "Something went wrong"
        );
    }
}
