use crate::core::endpoint::ExecutionContext;
use crate::core::outcome::{self, FailureMessages};
use crate::domain::model::{EnquiryPayload, EnquirySource, SubmissionState};
use crate::domain::ports::{EnquiryForm, MailSender, Notifier};
use crate::utils::error::MailError;
use crate::utils::validation::Validate;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_FORM_TIMEOUT: Duration = Duration::from_millis(12_000);
pub const CONTACT_FORM_ID: &str = "contactForm";

pub const VALIDATION_MESSAGE: &str = "Please fill in your name, email, and message.";
pub const TIMEOUT_MESSAGE: &str = "Network timeout. Please try again.";
pub const NETWORK_MESSAGE: &str = "Network error. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum FormKind {
    Hero,
    Contact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShaping {
    /// Every field trimmed; phone always sent, possibly empty.
    Trimmed,
    /// Values forwarded as entered; a missing phone is omitted.
    AsEntered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceRule {
    Fixed(EnquirySource),
    /// `contact` for the contact form id or a contact page, else `index`.
    FromForm,
}

/// How one form collects, checks and reports a submission.
#[derive(Debug, Clone)]
pub struct SubmissionPolicy {
    pub kind: FormKind,
    pub shaping: FieldShaping,
    pub source: SourceRule,
    pub require_fields: bool,
    pub single_flight: bool,
    pub timeout: Duration,
    pub success_message: &'static str,
    pub failure_prefix: Option<&'static str>,
    pub failure_messages: FailureMessages,
}

impl SubmissionPolicy {
    pub fn hero(timeout: Duration) -> Self {
        Self {
            kind: FormKind::Hero,
            shaping: FieldShaping::AsEntered,
            source: SourceRule::FromForm,
            require_fields: false,
            single_flight: false,
            timeout,
            success_message: "Enquiry sent successfully",
            failure_prefix: Some("Failed to send enquiry: "),
            failure_messages: FailureMessages::hero(),
        }
    }

    pub fn contact(timeout: Duration) -> Self {
        Self {
            kind: FormKind::Contact,
            shaping: FieldShaping::Trimmed,
            source: SourceRule::Fixed(EnquirySource::Contact),
            require_fields: true,
            single_flight: true,
            timeout,
            success_message: "Message sent successfully",
            failure_prefix: None,
            failure_messages: FailureMessages::contact(),
        }
    }

    pub fn for_kind(kind: FormKind, timeout: Duration) -> Self {
        match kind {
            FormKind::Hero => Self::hero(timeout),
            FormKind::Contact => Self::contact(timeout),
        }
    }

    fn failure_text(&self, reason: &str) -> String {
        match self.failure_prefix {
            Some(prefix) => format!("{}{}", prefix, reason),
            None => reason.to_string(),
        }
    }
}

pub fn derive_source(form_id: Option<&str>, pathname: &str) -> EnquirySource {
    if form_id == Some(CONTACT_FORM_ID) || pathname.contains("contact") {
        EnquirySource::Contact
    } else {
        EnquirySource::Index
    }
}

/// Marks a form as sending; released on every exit path.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
    form: &'a dyn EnquiryForm,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool, form: &'a dyn EnquiryForm) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        form.set_busy(true);
        Some(Self { flag, form })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.form.set_busy(false);
        self.flag.store(false, Ordering::Release);
    }
}

/// Submit handler shared by the hero and contact forms. One instance per form.
pub struct EnquiryHandler {
    sender: Arc<dyn MailSender>,
    policy: SubmissionPolicy,
    in_flight: AtomicBool,
}

impl EnquiryHandler {
    pub fn new(sender: Arc<dyn MailSender>, policy: SubmissionPolicy) -> Self {
        Self {
            sender,
            policy,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn policy(&self) -> &SubmissionPolicy {
        &self.policy
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Build the payload from the form the way this policy shapes fields.
    pub fn collect(&self, form: &dyn EnquiryForm, context: &ExecutionContext) -> EnquiryPayload {
        let read = |name: &str| match self.policy.shaping {
            FieldShaping::Trimmed => Some(form.field(name).unwrap_or_default().trim().to_string()),
            FieldShaping::AsEntered => form.field(name),
        };

        let source = match self.policy.source {
            SourceRule::Fixed(source) => source,
            SourceRule::FromForm => derive_source(form.id().as_deref(), &context.pathname),
        };

        EnquiryPayload {
            name: read("name").unwrap_or_default(),
            email: read("email").unwrap_or_default(),
            phone: read("phone"),
            message: read("message").unwrap_or_default(),
            source,
        }
    }

    /// Run one submission attempt to a terminal state.
    ///
    /// Returns [`SubmissionState::Idle`] without touching the network when a
    /// single-flight form already has a request outstanding.
    pub async fn submit(
        &self,
        form: &dyn EnquiryForm,
        notifier: &dyn Notifier,
        context: &ExecutionContext,
    ) -> SubmissionState {
        let _guard = if self.policy.single_flight {
            match InFlightGuard::acquire(&self.in_flight, form) {
                Some(guard) => Some(guard),
                None => {
                    tracing::debug!("⏳ {:?} form is already sending, ignoring submit", self.policy.kind);
                    return SubmissionState::Idle;
                }
            }
        } else {
            None
        };

        let payload = self.collect(form, context);
        let state = SubmissionState::Idle;

        if self.policy.require_fields {
            if let Err(e) = payload.validate() {
                tracing::info!("📝 Enquiry rejected before sending: {}", e);
                notifier.notify(VALIDATION_MESSAGE);
                return advance(state, SubmissionState::Failed(VALIDATION_MESSAGE.to_string()));
            }
        }

        let state = advance(state, SubmissionState::Sending);

        let next = match self
            .sender
            .send_mail(context, &payload, self.policy.timeout)
            .await
        {
            Ok(response) => match outcome::ensure_delivered(&response, &self.policy.failure_messages) {
                Ok(()) => {
                    tracing::info!("✅ Enquiry from '{}' form delivered", payload.source);
                    notifier.notify(self.policy.success_message);
                    form.reset();
                    SubmissionState::Succeeded
                }
                Err(MailError::ServerError { status, message }) => {
                    tracing::warn!("❌ Send-mail failed (status {}): {}", status, message);
                    notifier.notify(&self.policy.failure_text(&message));
                    SubmissionState::Failed(message)
                }
                Err(e) => {
                    tracing::warn!("❌ Send-mail failed: {}", e);
                    let message = e.user_friendly_message();
                    notifier.notify(&self.policy.failure_text(&message));
                    SubmissionState::Failed(message)
                }
            },
            Err(e) if e.is_timeout() => {
                tracing::error!("⏱️ Send-mail network timeout: {}", e);
                notifier.notify(TIMEOUT_MESSAGE);
                SubmissionState::Aborted
            }
            Err(e) => {
                tracing::error!("❌ Send-mail network error: {}", e);
                notifier.notify(NETWORK_MESSAGE);
                SubmissionState::Failed(NETWORK_MESSAGE.to_string())
            }
        };

        advance(state, next)
    }
}

fn advance(state: SubmissionState, next: SubmissionState) -> SubmissionState {
    let from = state.name();
    match state.transition(next.clone()) {
        Ok(state) => {
            tracing::debug!("🔁 Submission {} -> {}", from, state.name());
            state
        }
        Err(e) => {
            tracing::error!("❌ {}", e);
            next
        }
    }
}
