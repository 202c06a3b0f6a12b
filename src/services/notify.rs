//! Terminal notification surface

use super::Notifier;
use log::{info, warn};
use std::time::Duration;

/// Prints alerts to stderr and notifications to stdout
///
/// A terminal line never needs dismissing, so the display duration only
/// shows up in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }
}

fn alert_line(message: &str) -> String {
    format!("⚠️  {}", message)
}

fn notification_line(message: &str) -> String {
    format!("🕒 {}", message)
}

impl Notifier for ConsoleNotifier {
    fn alert(&self, message: &str, display_for: Duration) {
        warn!("Alert ({}s): {}", display_for.as_secs(), message);
        eprintln!("{}", alert_line(message));
    }

    fn notify(&self, message: &str, display_for: Duration) {
        info!("Notification ({}s): {}", display_for.as_secs(), message);
        println!("{}", notification_line(message));
    }
}
