//! # Worker handle.
//!
//! Returned by [`Group::add`](crate::Group::add); a worker keeps it for its
//! whole life.
//!
//! ## Contract
//! - call [`notify_done`](WorkerHandle::notify_done) exactly once when finished
//!   (also after having reported errors);
//! - call [`notify_error`](WorkerHandle::notify_error) zero or more times on failures;
//! - poll [`poll_interrupt`](WorkerHandle::poll_interrupt) (or await
//!   [`interrupted`](WorkerHandle::interrupted)) to honor cancellation.
//!
//! A registered worker that never calls `notify_done` keeps `wait` blocked.
//!
//! ## Example
//! ```rust
//! use escalator::{Group, InterruptKind, WaitOutcome};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let group = Group::new();
//!     let worker = group.add().await;
//!
//!     let job = tokio::spawn(async move {
//!         for step in 0..1_000u32 {
//!             if let Some(i) = worker.poll_interrupt() {
//!                 assert_eq!(i.kind(), InterruptKind::Stop);
//!                 break;
//!             }
//!             if step == 3 {
//!                 worker.notify_error("step 3 failed").await?;
//!             }
//!             tokio::task::yield_now().await;
//!         }
//!         worker.notify_done().await
//!     });
//!
//!     let outcome = group.wait().await;
//!     assert!(!outcome.is_all_done());
//!     group.interrupt_all(escalator::Interrupt::stop()).await;
//!     assert_eq!(group.wait().await, WaitOutcome::Completed);
//!     job.await.unwrap().unwrap();
//! }
//! ```

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use super::mailbox::Mailbox;
use crate::error::GroupError;
use crate::group::{DoneTicket, Shared, WorkerId};
use crate::report::{Interrupt, Payload, Report, ReportError, ReportKind};

/// Per-worker reporting and interrupt surface.
pub struct WorkerHandle {
    id: WorkerId,
    mailbox: Mailbox,
    shared: Arc<Shared>,
}

impl WorkerHandle {
    pub(crate) fn new(id: WorkerId, mailbox: Mailbox, shared: Arc<Shared>) -> Self {
        Self {
            id,
            mailbox,
            shared,
        }
    }

    /// Id assigned by the group.
    #[inline]
    pub fn id(&self) -> WorkerId {
        self.id
    }

    /// Takes the pending interrupt, if any. Never suspends.
    ///
    /// Each interrupt is returned at most once; if several arrived since the
    /// last poll only the newest is kept.
    pub fn poll_interrupt(&self) -> Option<Interrupt> {
        self.mailbox.take()
    }

    /// True if an interrupt is waiting, without consuming it.
    pub fn has_interrupt(&self) -> bool {
        self.mailbox.has_pending()
    }

    /// Waits for the next interrupt and takes it.
    ///
    /// Handy inside `tokio::select!` next to the actual work.
    pub async fn interrupted(&self) -> Interrupt {
        self.mailbox.recv().await
    }

    /// Token cancelled when this worker receives a `Kill` interrupt or the
    /// group is dropped. Pass it down to sub-tasks that only understand tokens.
    pub fn cancellation(&self) -> CancellationToken {
        self.mailbox.token()
    }

    /// True while the group still tracks this worker (until `notify_done`).
    pub async fn is_registered(&self) -> bool {
        self.shared.registry.lock().await.contains(self.id)
    }

    /// Sends a report and waits until the group receives it.
    ///
    /// Does not deregister, even for [`ReportKind::Done`]; use
    /// [`notify_done`](WorkerHandle::notify_done) to finish.
    pub async fn notify(
        &self,
        kind: ReportKind,
        payload: Option<Payload>,
        error: Option<ReportError>,
    ) -> Result<(), GroupError> {
        let report = Report::new(self.id, kind, payload, error);
        self.send(report, None).await
    }

    /// Reports a failure. The worker stays registered.
    pub async fn notify_error<E>(&self, error: E) -> Result<(), GroupError>
    where
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        let error: ReportError = Arc::from(error.into());
        self.notify(ReportKind::Error, None, Some(error)).await
    }

    /// Leaves the group, then reports normal completion.
    ///
    /// From the moment this is called the worker is out of every future
    /// broadcast; an interrupt already in its mailbox stays pollable.
    pub async fn notify_done(&self) -> Result<(), GroupError> {
        let removed = {
            let mut registry = self.shared.registry.lock().await;
            let removed = registry.deregister(self.id);
            if removed {
                self.shared.count_done();
            }
            removed
        };
        if removed {
            debug!(group = %self.shared.name, worker = %self.id, "worker done");
        }
        let ticket = removed.then(|| DoneTicket::new(&self.shared));
        let report = Report::new(self.id, ReportKind::Done, None, None);
        self.send(report, ticket).await
    }

    async fn send(&self, report: Report, ticket: Option<DoneTicket<'_>>) -> Result<(), GroupError> {
        trace!(group = %self.shared.name, worker = %self.id, kind = %report.kind(), "sending report");
        let kind = report.kind();
        let res = self.shared.handoff(report, ticket).await;
        if let Err(err) = &res {
            warn!(
                group = %self.shared.name,
                worker = %self.id,
                kind = %kind,
                error = err.as_label(),
                "report not delivered"
            );
        }
        res
    }
}

impl fmt::Debug for WorkerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerHandle")
            .field("id", &self.id)
            .field("group", &self.shared.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Group, WaitOutcome, WorkerError};
    use futures::future::join_all;
    use std::time::Duration;

    const LIMIT: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn test_poll_never_suspends_and_consumes() {
        let group = Group::new();
        let worker = group.add().await;
        assert_eq!(worker.poll_interrupt(), None);
        assert!(!worker.has_interrupt());

        group.interrupt(worker.id(), Interrupt::stop()).await;
        assert!(worker.has_interrupt());
        assert_eq!(worker.poll_interrupt(), Some(Interrupt::stop()));
        assert_eq!(worker.poll_interrupt(), None);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_interrupted_wakes_worker() {
        let group = Group::new();
        let worker = group.add().await;
        let id = worker.id();

        let job = tokio::spawn(async move {
            let mut ticks = 0u64;
            let interrupt = loop {
                tokio::select! {
                    i = worker.interrupted() => break i,
                    _ = tokio::time::sleep(Duration::from_millis(5)) => ticks += 1,
                }
            };
            worker.notify_done().await.map(|()| (interrupt, ticks))
        });

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(group.interrupt(id, Interrupt::stop()).await);

        let outcome = tokio::time::timeout(LIMIT, group.wait()).await.expect("wait");
        assert_eq!(outcome, WaitOutcome::Completed);
        let (interrupt, _ticks) = job.await.expect("join").expect("delivered");
        assert_eq!(interrupt, Interrupt::stop());
    }

    #[tokio::test]
    async fn test_registration_follows_done() {
        let group = Group::new();
        let worker = group.add().await;
        assert!(worker.is_registered().await);

        let (res, outcome) = tokio::join!(worker.notify_done(), group.wait());
        assert_eq!(res, Ok(()));
        assert_eq!(outcome, WaitOutcome::Completed);
        assert!(!worker.is_registered().await);
    }

    #[tokio::test]
    async fn test_notify_error_accepts_typed_and_string_errors() {
        let group = Group::new();
        let worker = group.add().await;

        let (res, outcome) = tokio::join!(worker.notify_error(WorkerError::Canceled), group.wait());
        assert_eq!(res, Ok(()));
        let report = outcome.report().cloned().expect("escalated");
        assert_eq!(report.error().map(|e| e.to_string()).as_deref(), Some("worker interrupted"));

        let (res, outcome) = tokio::join!(worker.notify_error("plain text"), group.wait());
        assert_eq!(res, Ok(()));
        assert_eq!(
            outcome.report().and_then(|r| r.error()).map(|e| e.to_string()).as_deref(),
            Some("plain text")
        );
        assert!(worker.is_registered().await);
    }

    #[tokio::test]
    async fn test_notify_blocks_until_received() {
        let group = Group::new();
        let worker = group.add().await;

        let pending = tokio::time::timeout(
            Duration::from_millis(50),
            worker.notify(ReportKind::Custom(1), None, None),
        )
        .await;
        assert!(pending.is_err(), "notify returned without a consumer");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_ids_distinct_under_concurrent_add() {
        let group = Arc::new(Group::new());
        let handles = join_all((0..64).map(|_| {
            let group = Arc::clone(&group);
            async move { group.add().await }
        }))
        .await;

        let mut ids: Vec<_> = handles.iter().map(WorkerHandle::id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 64);
        assert_eq!(group.len().await, 64);
    }

    #[tokio::test]
    async fn test_debug_shows_id() {
        let group = Group::new();
        let worker = group.add().await;
        assert!(format!("{worker:?}").contains("WorkerHandle"));
    }
}
