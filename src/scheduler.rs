//! Deferred completion of accepted submissions
//!
//! Submitting simulates latency: once the engine accepts a submit, the ticket
//! is handed to a [`SubmitScheduler`] which hands it back after a delay. The
//! event loop then calls `FormEngine::complete_submit`. Nothing can cancel a
//! scheduled ticket.

use crate::state::SubmitTicket;
use std::time::Duration;
use tokio::sync::mpsc;

/// Submit latency used when the config does not set one
pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(2000);

/// Seam for the simulated submit latency, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
pub trait SubmitScheduler: Send {
    /// Arrange for `ticket` to be delivered back once the delay has elapsed
    fn schedule(&self, ticket: SubmitTicket);
}

/// Scheduler backed by a tokio timer task per ticket
pub struct TokioScheduler {
    delay: Duration,
    tx: mpsc::UnboundedSender<SubmitTicket>,
}

impl TokioScheduler {
    /// Create a scheduler and the receiver its tickets arrive on
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<SubmitTicket>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { delay, tx }, rx)
    }
}

impl SubmitScheduler for TokioScheduler {
    fn schedule(&self, ticket: SubmitTicket) {
        let tx = self.tx.clone();
        let delay = self.delay;
        tracing::debug!(ticket = ticket.value(), ?delay, "Scheduling submit completion");
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(ticket).is_err() {
                tracing::warn!(
                    ticket = ticket.value(),
                    "Submit completion dropped, receiver closed"
                );
            }
        });
    }
}
