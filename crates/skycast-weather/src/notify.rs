//! Short-lived user-facing messages.
//!
//! Fire-and-forget: nothing is queued for replay or de-duplicated.

use std::sync::mpsc::Sender;

pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Writes notifications to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        tracing::info!(target: "skycast::notify", "{}", message);
    }
}

/// Pushes notifications into a channel drained by the UI loop
#[derive(Debug)]
pub struct ChannelNotifier {
    tx: parking_lot::Mutex<Sender<String>>,
}

impl ChannelNotifier {
    pub fn new(tx: Sender<String>) -> Self {
        Self {
            tx: parking_lot::Mutex::new(tx),
        }
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, message: &str) {
        tracing::debug!("notify: {}", message);
        // A dropped receiver just means nobody is watching anymore
        let _ = self.tx.lock().send(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_notifier_delivers_in_order() {
        let (tx, rx) = std::sync::mpsc::channel();
        let notifier = ChannelNotifier::new(tx);
        notifier.notify("first");
        notifier.notify("first");
        notifier.notify("second");

        let received: Vec<String> = rx.try_iter().collect();
        assert_eq!(received, vec!["first", "first", "second"]);
    }

    #[test]
    fn test_channel_notifier_survives_dropped_receiver() {
        let (tx, rx) = std::sync::mpsc::channel();
        drop(rx);
        ChannelNotifier::new(tx).notify("nobody listens");
    }

    #[test]
    fn test_log_notifier_is_usable_as_trait_object() {
        let notifiers: Vec<Box<dyn Notifier>> = vec![Box::new(LogNotifier), Box::new(LogNotifier)];
        for notifier in &notifiers {
            notifier.notify("City not found");
        }
    }
}
