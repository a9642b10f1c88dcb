//! Transient error notice with a fixed auto-hide window
//!
//! A single message slot: showing a new message replaces the old one and
//! restarts the 5 second clock, it never stacks.

use std::time::Instant;

use crate::constants::NOTICE_TTL;

/// Timed, user-visible error channel.
#[derive(Debug, Default)]
pub struct Notice {
    message: Option<String>,
    expires_at: Option<Instant>,
}

impl Notice {
    pub fn new() -> Self {
        Notice::default()
    }

    /// Show a message, restarting the auto-hide deadline from `now`.
    pub fn show_at(&mut self, message: impl Into<String>, now: Instant) {
        self.message = Some(message.into());
        self.expires_at = Some(now + NOTICE_TTL);
    }

    /// Show a message with the deadline anchored at the current time.
    pub fn show(&mut self, message: impl Into<String>) {
        self.show_at(message, Instant::now());
    }

    /// Clear the message and cancel any pending deadline.
    pub fn hide(&mut self) {
        self.message = None;
        self.expires_at = None;
    }

    /// Clear the message once its deadline has passed.
    /// Returns true if anything changed.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.expires_at {
            Some(deadline) if now >= deadline => {
                self.hide();
                true
            }
            _ => false,
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
