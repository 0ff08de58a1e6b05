//! User-facing error notification.

/// Blocking error message the host shows to the user (a modal message box
/// in a desktop editor).
pub trait Notifier {
    fn error(&mut self, message: &str);
}

/// Forwards notifications to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn error(&mut self, message: &str) {
        log::error!("{message}");
    }
}

/// Keeps every message, for hosts that surface them later and for tests.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    pub messages: Vec<String>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn last(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }
}

impl Notifier for RecordingNotifier {
    fn error(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

impl<N: Notifier + ?Sized> Notifier for &mut N {
    fn error(&mut self, message: &str) {
        (**self).error(message);
    }
}
