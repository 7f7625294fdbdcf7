// Adapters layer: concrete collaborators for the form, notification and settings ports.

pub mod form;
pub mod notifier;
pub mod settings;

pub use form::MemoryForm;
pub use notifier::StdoutNotifier;
pub use settings::LocalSettingsStore;
