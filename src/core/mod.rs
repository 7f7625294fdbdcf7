pub mod client;
pub mod endpoint;
pub mod outcome;
pub mod registry;
pub mod submission;

pub use crate::domain::model::{EnquiryPayload, MailResponse, MailResult, SubmissionState};
pub use crate::domain::ports::{EnquiryForm, MailSender, Notifier, SettingsStore};
pub use crate::utils::error::Result;
