use crate::domain::ports::Notifier;

/// Prints each message on its own line.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn notify(&self, message: &str) {
        tracing::debug!("💬 Notify: {}", message);
        println!("{}", message);
    }
}
