//! Transient status line
//!
//! Each message gets a ticket. A delayed clear only takes effect if its
//! ticket still belongs to the newest message, so an old timer never wipes
//! a message shown after it started.

use std::time::Duration;

/// How long a status message stays up
pub const STATUS_CLEAR_DELAY: Duration = Duration::from_secs(3);

/// Identifies one shown message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTicket(u64);

impl StatusTicket {
    /// The ticket the `n`th message of a fresh status line receives
    #[cfg(test)]
    pub(crate) fn for_test(n: u64) -> Self {
        Self(n)
    }
}

#[derive(Debug, Default)]
pub struct StatusLine {
    text: String,
    generation: u64,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the current message
    pub fn show(&mut self, text: impl Into<String>) -> StatusTicket {
        self.text = text.into();
        self.generation += 1;
        log::debug!("status: {}", self.text);
        StatusTicket(self.generation)
    }

    /// Clear the line if `ticket` is still current. Returns whether it cleared.
    pub fn expire(&mut self, ticket: StatusTicket) -> bool {
        if ticket.0 == self.generation {
            self.text.clear();
            true
        } else {
            false
        }
    }
}
