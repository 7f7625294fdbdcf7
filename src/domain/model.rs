use crate::domain::ports::SettingsStore;
use crate::utils::error::{MailError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which form produced an enquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnquirySource {
    Contact,
    Index,
}

impl EnquirySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnquirySource::Contact => "contact",
            EnquirySource::Index => "index",
        }
    }
}

impl fmt::Display for EnquirySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON body posted to the mail relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnquiryPayload {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub message: String,
    pub source: EnquirySource,
}

impl EnquiryPayload {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
        source: EnquirySource,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: None,
            message: message.into(),
            source,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

impl Validate for EnquiryPayload {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("name", &self.name)?;
        validate_non_empty_string("email", &self.email)?;
        validate_non_empty_string("message", &self.message)?;
        Ok(())
    }
}

/// What came back from the relay, before any success classification.
#[derive(Debug, Clone)]
pub struct MailResponse {
    pub status: u16,
    pub ok: bool,
    pub status_text: Option<String>,
    /// Parsed body, `None` when the body was empty or not JSON.
    pub data: Option<serde_json::Value>,
    pub text: String,
}

impl MailResponse {
    /// Delivered means a 2xx status and `"success": true` in the body.
    pub fn is_delivered(&self) -> bool {
        self.ok
            && self
                .data
                .as_ref()
                .and_then(|d| d.get("success"))
                .and_then(|v| v.as_bool())
                .unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailResult {
    Success,
    Failure(String),
}

impl MailResult {
    pub fn is_success(&self) -> bool {
        matches!(self, MailResult::Success)
    }
}

/// Lifecycle of one submission attempt. A new attempt starts a new machine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Sending,
    Succeeded,
    Failed(String),
    Aborted,
}

impl SubmissionState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SubmissionState::Succeeded | SubmissionState::Failed(_) | SubmissionState::Aborted
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Sending => "sending",
            SubmissionState::Succeeded => "succeeded",
            SubmissionState::Failed(_) => "failed",
            SubmissionState::Aborted => "aborted",
        }
    }

    /// Idle -> Sending, Sending -> terminal. Validation failures may go
    /// straight from Idle to Failed since no request was ever made.
    pub fn transition(self, next: SubmissionState) -> Result<SubmissionState> {
        let allowed = match (&self, &next) {
            (SubmissionState::Idle, SubmissionState::Sending) => true,
            (SubmissionState::Idle, SubmissionState::Failed(_)) => true,
            (SubmissionState::Sending, n) => n.is_terminal(),
            _ => false,
        };

        if allowed {
            Ok(next)
        } else {
            Err(MailError::StateError {
                from: self.name().to_string(),
                to: next.name().to_string(),
            })
        }
    }

    /// `None` until the attempt has finished.
    pub fn result(&self) -> Option<MailResult> {
        match self {
            SubmissionState::Succeeded => Some(MailResult::Success),
            SubmissionState::Failed(reason) => Some(MailResult::Failure(reason.clone())),
            SubmissionState::Aborted => Some(MailResult::Failure(
                "Network timeout. Please try again.".to_string(),
            )),
            SubmissionState::Idle | SubmissionState::Sending => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = MailError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(MailError::InvalidConfigValueError {
                field: "theme".to_string(),
                value: other.to_string(),
                reason: "expected 'light' or 'dark'".to_string(),
            }),
        }
    }
}

/// The only persisted state: the theme flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Settings {
    pub theme: Theme,
}

impl Settings {
    pub const THEME_KEY: &'static str = "theme";

    /// Only a stored `light` selects the light theme; anything else is dark.
    pub async fn load<S: SettingsStore>(store: &S) -> Result<Self> {
        let stored = store.get_item(Self::THEME_KEY).await?;
        let theme = match stored.as_deref() {
            Some("light") => Theme::Light,
            _ => Theme::Dark,
        };
        Ok(Self { theme })
    }

    pub async fn save<S: SettingsStore>(&self, store: &S) -> Result<()> {
        store.set_item(Self::THEME_KEY, self.theme.as_str()).await
    }

    /// Flip the theme and persist it.
    pub async fn toggle<S: SettingsStore>(&mut self, store: &S) -> Result<Theme> {
        self.theme = self.theme.toggled();
        self.save(store).await?;
        Ok(self.theme)
    }
}
