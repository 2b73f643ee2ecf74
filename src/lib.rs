//! # escalator
//!
//! **escalator** is an escalating wait group for tokio.
//!
//! A supervisor registers workers one at a time, then waits for all of them
//! to finish. Unlike a plain wait group it wakes up on the **first abnormal
//! report** from any worker, can broadcast cooperative **interrupts** into
//! per-worker mailboxes, and can do so automatically depending on the kind of
//! report that woke it.
//!
//! The crate does not run work: workers are whatever tasks you spawn, they
//! just hold a [`WorkerHandle`].
//!
//! ## Architecture
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │ WorkerHandle │   │ WorkerHandle │   │ WorkerHandle │
//!     │     #1       │   │     #2       │   │     #3       │
//!     └──┬───────▲───┘   └──┬───────▲───┘   └──┬───────▲───┘
//!        │notify │poll      │       │          │       │
//!        ▼       │          ▼       │          ▼       │
//! ┌──────────────┴──────────────────┴──────────────────┴──────────────┐
//! │  Group                                                            │
//! │  - notification queue (rendezvous: sender waits for the ack)      │
//! │  - Registry under one lock:                                       │
//! │      id allocator · live workers (id → mailbox) · auto-interrupts │
//! └─────────────────────────────────┬─────────────────────────────────┘
//!                                   ▼
//!                             Group::wait()
//!                ├─ Done  ─► registry drained? ─► Completed
//!                └─ other ─► policy[kind] ─► interrupt_all ─► Escalated(report)
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types                              |
//! |-------------------|--------------------------------------------------------------|----------------------------------------|
//! | **Group**         | Register workers, wait with escalation, deliver interrupts.  | [`Group`], [`WaitOutcome`]             |
//! | **Workers**       | Report outcomes, poll or await interrupts.                   | [`WorkerHandle`], [`WorkerId`]         |
//! | **Messages**      | Reports up, interrupts down, open kind sets.                 | [`Report`], [`Interrupt`]              |
//! | **Errors**        | Typed errors for the group and for workers.                  | [`GroupError`], [`WorkerError`]        |
//! | **Configuration** | Name, queue capacity, initial auto-interrupt policy.         | [`GroupConfig`], [`GroupBuilder`]      |
//!
//! ## Logging
//! The crate emits [`tracing`] events (`debug` for lifecycle, `trace` per
//! report/interrupt, `warn` for undeliverable reports) and installs no subscriber.
//!
//! ## Example
//! ```rust
//! use escalator::{Group, InterruptKind, ReportKind, WaitOutcome};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let group = Group::new();
//!     group.set_auto_interrupt(ReportKind::Error, InterruptKind::Stop).await;
//!
//!     let mut jobs = Vec::new();
//!     for n in 0..3u32 {
//!         let worker = group.add().await;
//!         jobs.push(tokio::spawn(async move {
//!             if n == 1 {
//!                 worker.notify_error(format!("job {n} failed")).await?;
//!             }
//!             while worker.poll_interrupt().is_none() && n != 1 {
//!                 tokio::task::yield_now().await;
//!             }
//!             worker.notify_done().await
//!         }));
//!     }
//!
//!     match group.wait().await {
//!         WaitOutcome::Completed => unreachable!("job 1 always fails"),
//!         WaitOutcome::Escalated(report) => {
//!             assert_eq!(report.kind(), ReportKind::Error);
//!         }
//!     }
//!
//!     // Everyone got `Stop`; collect their Done reports.
//!     assert_eq!(group.wait().await, WaitOutcome::Completed);
//!     for job in jobs {
//!         job.await.unwrap().unwrap();
//!     }
//! }
//! ```

mod config;
mod error;
mod group;
mod report;
mod worker;

// ---- Public re-exports ----

pub use config::GroupConfig;
pub use error::{GroupError, WorkerError};
pub use group::{Group, GroupBuilder, WaitOutcome, WorkerId};
pub use report::{Interrupt, InterruptKind, Payload, Report, ReportError, ReportKind};
pub use worker::WorkerHandle;
