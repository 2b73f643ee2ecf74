//! # State shared between a group and its worker handles.
//!
//! ```text
//! WorkerHandle ──notify──► tx ──► [ queue ] ──► rx (Group::wait / drain)
//!      ▲                                               │
//!      └──────────────── oneshot ack ◄─────────────────┘
//! ```
//!
//! Every report travels with a oneshot ack; the sender returns only once the
//! consumer has dequeued it, so reporting is a rendezvous regardless of the
//! queue capacity.
//!
//! ## Done accounting
//! `notify_done` removes the worker and bumps `done_in_flight` in the same
//! critical section; the consumer settles it when it dequeues the report. A
//! group is drained only when the registry is empty *and* nothing is in
//! flight, so no worker is left parked in `notify_done` after a clean wait.

use std::borrow::Cow;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::{Mutex, Notify, mpsc, oneshot};
use tokio_util::sync::CancellationToken;

use super::registry::Registry;
use crate::error::GroupError;
use crate::report::{Report, ReportKind};

/// A report in transit plus the ack that releases its sender.
pub(crate) struct Envelope {
    report: Report,
    ack: oneshot::Sender<()>,
    counted: bool,
}

impl Envelope {
    /// Kind of the report inside, without consuming it.
    pub(crate) fn kind(&self) -> ReportKind {
        self.report.kind()
    }
}

pub(crate) struct Shared {
    pub(crate) name: Cow<'static, str>,
    pub(crate) registry: Mutex<Registry>,
    pub(crate) token: CancellationToken,
    closed: CancellationToken,
    tx: mpsc::Sender<Envelope>,
    done_in_flight: AtomicUsize,
    settled: Notify,
}

impl Shared {
    pub(crate) fn new(
        name: Cow<'static, str>,
        registry: Registry,
        tx: mpsc::Sender<Envelope>,
    ) -> Self {
        Self {
            name,
            registry: Mutex::new(registry),
            token: CancellationToken::new(),
            closed: CancellationToken::new(),
            tx,
            done_in_flight: AtomicUsize::new(0),
            settled: Notify::new(),
        }
    }

    /// Stops accepting reports: pending and future handoffs fail with `Closed`.
    pub(crate) fn close(&self) {
        self.closed.cancel();
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed.is_cancelled()
    }

    /// Records a Done report about to be sent. Call under the registry lock,
    /// together with the removal.
    pub(crate) fn count_done(&self) {
        self.done_in_flight.fetch_add(1, Ordering::AcqRel);
    }

    fn settle_done(&self) {
        let _ = self
            .done_in_flight
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1));
    }

    /// True when nobody is registered and no Done report is still in flight.
    pub(crate) async fn is_drained(&self) -> bool {
        let registry = self.registry.lock().await;
        registry.is_empty() && self.done_in_flight.load(Ordering::Acquire) == 0
    }

    /// Resolves when an in-flight Done report was abandoned by its sender.
    pub(crate) async fn settled(&self) {
        self.settled.notified().await;
    }

    /// Sends `report` and waits until a consumer dequeues it.
    ///
    /// `ticket` marks a counted Done report; if the report never makes it
    /// into the queue the ticket settles the count on drop.
    ///
    /// Closing the group releases the sender with `Closed` at either stage.
    /// A report already queued at that point stays queued for `wait`/`drain`.
    pub(crate) async fn handoff(
        &self,
        report: Report,
        ticket: Option<DoneTicket<'_>>,
    ) -> Result<(), GroupError> {
        let (ack, acked) = oneshot::channel();
        let envelope = Envelope {
            report,
            ack,
            counted: ticket.is_some(),
        };
        tokio::select! {
            biased;
            _ = self.closed.cancelled() => return Err(GroupError::Closed),
            sent = self.tx.send(envelope) => {
                if sent.is_err() {
                    return Err(GroupError::Closed);
                }
            }
        }
        if let Some(ticket) = ticket {
            ticket.disarm();
        }
        tokio::select! {
            biased;
            _ = self.closed.cancelled() => Err(GroupError::Closed),
            acked = acked => acked.map_err(|_| GroupError::Closed),
        }
    }

    /// Consumer side: settles accounting, releases the sender, yields the report.
    pub(crate) fn accept(&self, envelope: Envelope) -> Report {
        let Envelope {
            report,
            ack,
            counted,
        } = envelope;
        if counted {
            self.settle_done();
        }
        let _ = ack.send(());
        report
    }
}

/// Guard for a counted Done report that has not reached the queue yet.
pub(crate) struct DoneTicket<'a> {
    shared: &'a Shared,
    armed: bool,
}

impl<'a> DoneTicket<'a> {
    pub(crate) fn new(shared: &'a Shared) -> Self {
        Self {
            shared,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for DoneTicket<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.shared.settle_done();
            self.shared.settled.notify_one();
        }
    }
}
