use crate::config::MailConfig;
use crate::core::endpoint::{Endpoints, ExecutionContext};
use crate::domain::model::{EnquiryPayload, MailResponse};
use crate::domain::ports::MailSender;
use crate::utils::error::{MailError, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, ORIGIN};
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// JSON-over-HTTP client for the mail relay.
#[derive(Debug, Clone)]
pub struct MailClient {
    client: Client,
    endpoints: Endpoints,
    default_timeout: Duration,
}

impl MailClient {
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            client: Client::new(),
            endpoints,
            default_timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn from_config(config: &MailConfig) -> Self {
        Self::new(config.endpoints.clone()).with_default_timeout(config.default_timeout())
    }

    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    /// Send with the client's default timeout.
    pub async fn send(
        &self,
        context: &ExecutionContext,
        payload: &EnquiryPayload,
    ) -> Result<MailResponse> {
        self.send_mail(context, payload, self.default_timeout).await
    }

    /// POST `payload` as JSON to `url`.
    ///
    /// Any HTTP status is returned as a [`MailResponse`]; only transport
    /// failures and the timeout are errors. When `timeout` elapses the
    /// request future is dropped, which cancels the request.
    pub async fn post_json(
        &self,
        url: &str,
        payload: &EnquiryPayload,
        timeout: Duration,
        origin: Option<&str>,
    ) -> Result<MailResponse> {
        let timeout_ms = timeout.as_millis() as u64;

        match tokio::time::timeout(timeout, self.exchange(url, payload, origin)).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(e)) if e.is_timeout() => {
                tracing::warn!("⏱️ Request to {} timed out", url);
                Err(MailError::Timeout { timeout_ms })
            }
            Ok(Err(e)) => {
                tracing::error!("❌ Request to {} failed: {}", url, e);
                Err(e)
            }
            Err(_) => {
                tracing::warn!("⏱️ Aborted request to {} after {}ms", url, timeout_ms);
                Err(MailError::Timeout { timeout_ms })
            }
        }
    }

    async fn exchange(
        &self,
        url: &str,
        payload: &EnquiryPayload,
        origin: Option<&str>,
    ) -> Result<MailResponse> {
        // 構建請求
        let mut request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(payload);

        if let Some(origin) = origin {
            request = request.header(ORIGIN, origin);
        }

        tracing::debug!("📡 POST {} (source: {})", url, payload.source);
        let response = request.send().await?;

        let status = response.status();
        tracing::debug!("📡 Mail relay response status: {}", status);

        let text = response.text().await?;
        let data = parse_json_body(&text).unwrap_or_else(|e| {
            tracing::warn!("⚠️ {}", e);
            None
        });

        Ok(MailResponse {
            status: status.as_u16(),
            ok: status.is_success(),
            status_text: status.canonical_reason().map(str::to_string),
            data,
            text,
        })
    }
}

#[async_trait]
impl MailSender for MailClient {
    async fn send_mail(
        &self,
        context: &ExecutionContext,
        payload: &EnquiryPayload,
        timeout: Duration,
    ) -> Result<MailResponse> {
        let endpoint = self.endpoints.select(context);
        self.post_json(endpoint, payload, timeout, context.origin())
            .await
    }
}

/// Empty body parses to `None`; a non-JSON body is reported as malformed.
pub fn parse_json_body(text: &str) -> Result<Option<serde_json::Value>> {
    if text.is_empty() {
        return Ok(None);
    }

    serde_json::from_str(text)
        .map(Some)
        .map_err(|e| MailError::MalformedResponse {
            message: format!("body is not JSON ({}): {:.80}", e, text),
        })
}
