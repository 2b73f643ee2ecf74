//! # Group: registration, wait/escalation and interrupt delivery.
//!
//! ## Wait loop
//! ```text
//! wait()
//!   loop {
//!     ├─ registry empty && no Done in flight ─► Completed
//!     ├─ recv report
//!     │     ├─ Done   ─► ack ─► continue
//!     │     └─ other  ─► lock registry ─► ack
//!     │                   ├─ policy[kind] = Some(i) ─► interrupt_all(i)
//!     │                   └─ unlock ─► Escalated(report)
//!     └─ abandoned Done settled ─► continue
//!   }
//! ```
//!
//! ## Rules
//! - Registry and policy are touched only under the group lock; every guard
//!   is scoped, so no exit path of `wait` leaves the lock held.
//! - Only the first non-done report is returned. Reports sent after `wait`
//!   returned stay queued (their senders parked) until the next `wait` or
//!   [`Group::drain`].
//! - Interrupt delivery never waits on a worker.

use std::fmt;
use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};
use tracing::{debug, trace};

use super::builder::GroupBuilder;
use super::id::WorkerId;
use super::outcome::WaitOutcome;
use super::policy::AutoInterruptPolicy;
use super::registry::Registry;
use super::shared::{Envelope, Shared};
use crate::config::GroupConfig;
use crate::report::{Interrupt, InterruptKind, Report, ReportKind};
use crate::worker::WorkerHandle;

/// Escalating wait group.
///
/// Register workers with [`add`](Group::add), hand each one its
/// [`WorkerHandle`], then [`wait`](Group::wait) once.
///
/// Dropping the group fails every pending and future report with
/// [`GroupError::Closed`](crate::GroupError::Closed) and cancels every
/// worker's [`cancellation`](WorkerHandle::cancellation) token.
pub struct Group {
    shared: Arc<Shared>,
    rx: Mutex<mpsc::Receiver<Envelope>>,
}

impl Group {
    /// Creates a group with default configuration.
    pub fn new() -> Self {
        Self::with_config(GroupConfig::default())
    }

    /// Returns a builder with default configuration.
    pub fn builder() -> GroupBuilder {
        GroupBuilder::default()
    }

    /// Creates a group from an explicit configuration.
    pub fn with_config(cfg: GroupConfig) -> Self {
        let (tx, rx) = mpsc::channel(cfg.queue_capacity_clamped());
        let registry = Registry::new(AutoInterruptPolicy::from_rules(cfg.auto_interrupts));
        Self {
            shared: Arc::new(Shared::new(cfg.name, registry, tx)),
            rx: Mutex::new(rx),
        }
    }

    /// Group label.
    pub fn name(&self) -> &str {
        &self.shared.name
    }

    /// Registers a new worker and returns its handle.
    pub async fn add(&self) -> WorkerHandle {
        let (id, mailbox) = {
            let mut registry = self.shared.registry.lock().await;
            registry.register(&self.shared.token)
        };
        debug!(group = %self.shared.name, worker = %id, "worker added");
        WorkerHandle::new(id, mailbox, Arc::clone(&self.shared))
    }

    /// Broadcasts `interrupt` whenever `wait` escalates on a `report` of this kind.
    ///
    /// Returns the rule it replaced. Takes effect for the next escalation,
    /// including one inside an in-flight `wait`.
    pub async fn set_auto_interrupt(
        &self,
        report: ReportKind,
        interrupt: InterruptKind,
    ) -> Option<InterruptKind> {
        self.shared.registry.lock().await.policy.set(report, interrupt)
    }

    /// Drops the auto-interrupt rule for `report`, returning it.
    pub async fn remove_auto_interrupt(&self, report: ReportKind) -> Option<InterruptKind> {
        self.shared.registry.lock().await.policy.remove(report)
    }

    /// Current auto-interrupt rule for `report`.
    pub async fn auto_interrupt(&self, report: ReportKind) -> Option<InterruptKind> {
        self.shared.registry.lock().await.policy.get(report)
    }

    /// Waits until every registered worker is done, or until the first
    /// non-done report arrives.
    ///
    /// On escalation the auto-interrupt policy is consulted and, if the
    /// report kind has a rule, that interrupt is placed in every registered
    /// worker's mailbox before this returns.
    ///
    /// Returns [`WaitOutcome::Completed`] immediately if nobody is registered.
    /// Concurrent calls are serialized.
    pub async fn wait(&self) -> WaitOutcome {
        let mut rx = self.rx.lock().await;
        loop {
            if self.shared.is_drained().await {
                debug!(group = %self.shared.name, "all workers done");
                return WaitOutcome::Completed;
            }

            let envelope = tokio::select! {
                received = rx.recv() => match received {
                    Some(envelope) => envelope,
                    // Unreachable while `shared` holds a sender.
                    None => return WaitOutcome::Completed,
                },
                _ = self.shared.settled() => continue,
            };

            if envelope.kind().is_done() {
                let report = self.shared.accept(envelope);
                trace!(group = %self.shared.name, worker = %report.worker(), "done received");
                continue;
            }
            return self.escalate(envelope).await;
        }
    }

    /// Holds the registry lock before acking, so a `wait` dropped while
    /// waiting for the lock drops the envelope and the sender sees `Closed`.
    async fn escalate(&self, envelope: Envelope) -> WaitOutcome {
        let registry = self.shared.registry.lock().await;
        let report = self.shared.accept(envelope);
        if let Some(kind) = registry.policy.on_escalation(report.kind()) {
            let delivered = registry.broadcast(&Interrupt::new(kind));
            debug!(
                group = %self.shared.name,
                report = %report.kind(),
                interrupt = %kind,
                delivered,
                "auto-interrupt broadcast"
            );
        }
        debug!(
            group = %self.shared.name,
            worker = %report.worker(),
            kind = %report.kind(),
            "wait escalated"
        );
        WaitOutcome::Escalated(report)
    }

    /// Stops accepting reports.
    ///
    /// Every pending and future `notify*` returns [`GroupError::Closed`](crate::GroupError::Closed).
    /// `add`, interrupts and policy updates keep working, and worker
    /// cancellation tokens are left alone. Reports already queued stay
    /// visible to [`drain`](Group::drain). An in-flight `wait` is not ended;
    /// close after waiting.
    pub fn close(&self) {
        if !self.shared.is_closed() {
            debug!(group = %self.shared.name, "group closed");
        }
        self.shared.close();
    }

    /// True once [`close`](Group::close) was called or the group began dropping.
    pub fn is_closed(&self) -> bool {
        self.shared.is_closed()
    }

    /// Places `interrupt` in every registered worker's mailbox.
    ///
    /// Returns how many workers received it.
    pub async fn interrupt_all(&self, interrupt: Interrupt) -> usize {
        let delivered = self.shared.registry.lock().await.broadcast(&interrupt);
        trace!(group = %self.shared.name, kind = %interrupt.kind(), delivered, "interrupt broadcast");
        delivered
    }

    /// Places `interrupt` in one worker's mailbox.
    ///
    /// Unknown or already-done workers are ignored; returns whether it was delivered.
    pub async fn interrupt(&self, id: WorkerId, interrupt: Interrupt) -> bool {
        let delivered = self.shared.registry.lock().await.deliver(id, interrupt);
        trace!(group = %self.shared.name, worker = %id, delivered, "interrupt");
        delivered
    }

    /// Dequeues every report already sitting in the notification queue,
    /// releasing their senders. FIFO order.
    ///
    /// Use it to clear stale reports after an escalation before waiting
    /// again. Workers still on their way into the queue are not waited for.
    pub async fn drain(&self) -> Vec<Report> {
        let mut rx = self.rx.lock().await;
        let mut drained = Vec::new();
        while let Ok(envelope) = rx.try_recv() {
            drained.push(self.shared.accept(envelope));
        }
        if !drained.is_empty() {
            debug!(group = %self.shared.name, count = drained.len(), "stale reports drained");
        }
        drained
    }

    /// Number of registered workers.
    pub async fn len(&self) -> usize {
        self.shared.registry.lock().await.len()
    }

    /// True if no worker is registered.
    pub async fn is_empty(&self) -> bool {
        self.shared.registry.lock().await.is_empty()
    }

    /// True if `id` is registered.
    pub async fn contains(&self, id: WorkerId) -> bool {
        self.shared.registry.lock().await.contains(id)
    }
}

impl Default for Group {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Group {
    fn drop(&mut self) {
        self.shared.close();
        self.shared.token.cancel();
    }
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("name", &self.shared.name)
            .finish_non_exhaustive()
    }
}
