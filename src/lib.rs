pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{LocalSettingsStore, MemoryForm, StdoutNotifier};
pub use config::MailConfig;
pub use crate::core::client::MailClient;
pub use crate::core::endpoint::{Endpoints, ExecutionContext};
pub use crate::core::registry::{wire_form, wire_forms, HandlerRegistry, UiEvent};
pub use crate::core::submission::{EnquiryHandler, FormKind, SubmissionPolicy};
pub use domain::model::{
    EnquiryPayload, EnquirySource, MailResponse, MailResult, Settings, SubmissionState, Theme,
};
pub use utils::error::{MailError, Result};
