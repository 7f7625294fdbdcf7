use crate::core::endpoint::ExecutionContext;
use crate::domain::model::{EnquiryPayload, MailResponse};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Delivers an enquiry to the relay and hands back the raw response.
#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send_mail(
        &self,
        context: &ExecutionContext,
        payload: &EnquiryPayload,
        timeout: Duration,
    ) -> Result<MailResponse>;
}

/// The form a submission reads its fields from.
pub trait EnquiryForm: Send + Sync {
    fn id(&self) -> Option<String>;
    /// `None` when the form has no such field.
    fn field(&self, name: &str) -> Option<String>;
    fn reset(&self);
    /// Disable or re-enable the submit control.
    fn set_busy(&self, busy: bool);
}

/// Shows one human-readable message to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

pub trait SettingsStore: Send + Sync {
    fn get_item(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
    fn set_item(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
