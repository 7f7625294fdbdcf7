use crate::core::endpoint::ExecutionContext;
use crate::core::submission::{EnquiryHandler, FormKind, SubmissionPolicy, CONTACT_FORM_ID};
use crate::domain::model::SubmissionState;
use crate::domain::ports::{EnquiryForm, MailSender, Notifier};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiEvent {
    Submit,
}

/// (element, event) -> handler table built once at start-up.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<(String, UiEvent), Arc<EnquiryHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `handler` to an element. A second attach to the same element
    /// and event is ignored and returns `false`.
    pub fn attach(&mut self, element_id: &str, event: UiEvent, handler: Arc<EnquiryHandler>) -> bool {
        let key = (element_id.to_string(), event);
        if self.handlers.contains_key(&key) {
            tracing::debug!("🔗 Handler already attached to '{}' ({:?})", element_id, event);
            return false;
        }

        tracing::debug!(
            "🔗 Attached {:?} handler to '{}' ({:?})",
            handler.policy().kind,
            element_id,
            event
        );
        self.handlers.insert(key, handler);
        true
    }

    pub fn is_attached(&self, element_id: &str, event: UiEvent) -> bool {
        self.handlers.contains_key(&(element_id.to_string(), event))
    }

    pub fn handler(&self, element_id: &str, event: UiEvent) -> Option<Arc<EnquiryHandler>> {
        self.handlers.get(&(element_id.to_string(), event)).cloned()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Route a submit of `element_id` to its handler. `None` when nothing is
    /// attached there.
    pub async fn dispatch_submit(
        &self,
        element_id: &str,
        form: &dyn EnquiryForm,
        notifier: &dyn Notifier,
        context: &ExecutionContext,
    ) -> Option<SubmissionState> {
        let Some(handler) = self.handler(element_id, UiEvent::Submit) else {
            tracing::warn!("⚠️ No submit handler attached to '{}'", element_id);
            return None;
        };
        Some(handler.submit(form, notifier, context).await)
    }
}

/// Wire the contact form and every hero form onto one shared sender.
/// Each form gets its own handler so single-flight is per form.
pub fn wire_forms(
    sender: Arc<dyn MailSender>,
    hero_form_ids: &[&str],
    timeout: Duration,
) -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();

    registry.attach(
        CONTACT_FORM_ID,
        UiEvent::Submit,
        Arc::new(EnquiryHandler::new(
            sender.clone(),
            SubmissionPolicy::for_kind(FormKind::Contact, timeout),
        )),
    );

    for id in hero_form_ids {
        registry.attach(
            id,
            UiEvent::Submit,
            Arc::new(EnquiryHandler::new(
                sender.clone(),
                SubmissionPolicy::for_kind(FormKind::Hero, timeout),
            )),
        );
    }

    tracing::debug!("🔗 {} form handler(s) registered", registry.len());
    registry
}

/// Attach one form of the given kind under `form_id`. The kind alone picks
/// the policy, so a hero form keeps hero behaviour whatever its id is.
pub fn wire_form(
    sender: Arc<dyn MailSender>,
    form_id: &str,
    kind: FormKind,
    timeout: Duration,
) -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    registry.attach(
        form_id,
        UiEvent::Submit,
        Arc::new(EnquiryHandler::new(sender, SubmissionPolicy::for_kind(kind, timeout))),
    );
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::client::MailClient;
    use crate::core::endpoint::Endpoints;

    fn sender() -> Arc<dyn MailSender> {
        Arc::new(MailClient::new(Endpoints::default()))
    }

    #[test]
    fn test_attach_once() {
        let mut registry = HandlerRegistry::new();
        let handler = Arc::new(EnquiryHandler::new(
            sender(),
            SubmissionPolicy::hero(Duration::from_secs(12)),
        ));

        assert!(registry.attach("heroForm", UiEvent::Submit, handler.clone()));
        assert!(!registry.attach("heroForm", UiEvent::Submit, handler));
        assert_eq!(registry.len(), 1);
        assert!(registry.is_attached("heroForm", UiEvent::Submit));
        assert!(!registry.is_attached("other", UiEvent::Submit));
    }

    #[test]
    fn test_wire_forms() {
        let registry = wire_forms(sender(), &["hero-1", "hero-2", "hero-1"], Duration::from_secs(12));

        assert_eq!(registry.len(), 3);
        let contact = registry.handler(CONTACT_FORM_ID, UiEvent::Submit).unwrap();
        assert_eq!(contact.policy().kind, FormKind::Contact);
        let hero = registry.handler("hero-2", UiEvent::Submit).unwrap();
        assert_eq!(hero.policy().kind, FormKind::Hero);
        assert_eq!(hero.policy().timeout, Duration::from_secs(12));
    }

    #[test]
    fn test_wire_form_keeps_kind_for_any_id() {
        let registry = wire_form(sender(), CONTACT_FORM_ID, FormKind::Hero, Duration::from_secs(5));
        assert_eq!(registry.len(), 1);
        let handler = registry.handler(CONTACT_FORM_ID, UiEvent::Submit).unwrap();
        assert_eq!(handler.policy().kind, FormKind::Hero);
        assert!(!handler.policy().require_fields);

        let registry = wire_form(sender(), "hero-2", FormKind::Hero, Duration::from_secs(5));
        assert!(registry.is_attached("hero-2", UiEvent::Submit));
    }
}
