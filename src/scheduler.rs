//! # Reply Scheduler
//!
//! Executes `Effect::ScheduleReply`: a one-shot tokio task sleeps for the
//! reply delay, then sends `Action::ReplyDue` back to the event loop over the
//! same channel background work always uses.
//!
//! Replies are never cancelled. Each valid send gets exactly one delivery.

use std::sync::mpsc;

use log::{debug, warn};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::core::action::{Action, PendingReply};

pub struct ReplyScheduler {
    tx: mpsc::Sender<Action>,
    handle: Handle,
}

impl ReplyScheduler {
    pub fn new(tx: mpsc::Sender<Action>, handle: Handle) -> Self {
        Self { tx, handle }
    }

    /// Scheduler bound to the runtime the caller is running inside.
    ///
    /// Panics outside a tokio runtime, like `tokio::spawn`.
    pub fn current(tx: mpsc::Sender<Action>) -> Self {
        Self::new(tx, Handle::current())
    }

    pub fn schedule(&self, reply: PendingReply) -> JoinHandle<()> {
        debug!(
            "Scheduling reply to {} in {}ms",
            reply.contact,
            reply.delay.as_millis()
        );
        let tx = self.tx.clone();
        self.handle.spawn(async move {
            tokio::time::sleep(reply.delay).await;
            let contact = reply.contact;
            if tx.send(reply.into_action()).is_err() {
                warn!("Failed to deliver reply to {}: receiver dropped", contact);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ContactId;
    use std::time::Duration;

    #[tokio::test]
    async fn test_schedule_delivers_once() {
        let (tx, rx) = mpsc::channel();
        let scheduler = ReplyScheduler::current(tx);
        scheduler
            .schedule(PendingReply {
                contact: ContactId(3),
                text: "ping".into(),
                delay: Duration::from_millis(5),
            })
            .await
            .unwrap();

        assert_eq!(
            rx.try_recv().unwrap(),
            Action::ReplyDue {
                contact: ContactId(3),
                text: "ping".into()
            }
        );
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_dropped_receiver_does_not_panic() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let scheduler = ReplyScheduler::current(tx);
        let result = scheduler
            .schedule(PendingReply {
                contact: ContactId(1),
                text: "lost".into(),
                delay: Duration::ZERO,
            })
            .await;
        assert!(result.is_ok());
    }
}
