//! # Worker reports.
//!
//! A [`Report`] is the only thing a worker ever sends to its group. The
//! [`ReportKind`] decides how [`Group::wait`](crate::Group::wait) reacts:
//! - [`ReportKind::Done`]: normal completion, wait keeps draining;
//! - anything else: escalation, wait returns this report.
//!
//! ## Example
//! ```rust
//! use escalator::{Report, ReportKind};
//!
//! let zero = Report::default();
//! assert!(zero.is_zero());
//! assert_eq!(zero.kind(), ReportKind::Done);
//! assert!(ReportKind::Custom(7).is_escalation());
//! ```

use std::fmt;

use super::{Payload, ReportError, same_arc};
use crate::group::WorkerId;

/// Classification of a report.
///
/// `Done` and `Error` are reserved; `Custom` codes are free for applications
/// (progress, partial failure, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReportKind {
    /// Worker finished normally. Only [`WorkerHandle::notify_done`](crate::WorkerHandle::notify_done)
    /// also removes the worker from the group.
    #[default]
    Done,
    /// Worker hit a failure. Does not remove the worker.
    Error,
    /// Application-defined event. Does not remove the worker.
    Custom(u32),
}

impl ReportKind {
    /// True for the normal completion kind.
    #[inline]
    pub fn is_done(self) -> bool {
        matches!(self, ReportKind::Done)
    }

    /// True for every kind that makes `wait` return early.
    #[inline]
    pub fn is_escalation(self) -> bool {
        !self.is_done()
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(self) -> &'static str {
        match self {
            ReportKind::Done => "done",
            ReportKind::Error => "error",
            ReportKind::Custom(_) => "custom",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportKind::Custom(code) => write!(f, "custom({code})"),
            other => f.write_str(other.as_label()),
        }
    }
}

/// Outcome or event sent by one worker.
///
/// `Report::default()` is the zero report: worker id 0 (never issued), kind
/// `Done`, no payload, no error. It is what a clean drain hands back.
///
/// Equality compares worker id and kind by value and payload/error by
/// identity (same `Arc`), so a supervisor can check it got *the* report a
/// worker sent.
#[derive(Clone, Default)]
pub struct Report {
    worker: WorkerId,
    kind: ReportKind,
    payload: Option<Payload>,
    error: Option<ReportError>,
}

impl Report {
    pub(crate) fn new(
        worker: WorkerId,
        kind: ReportKind,
        payload: Option<Payload>,
        error: Option<ReportError>,
    ) -> Self {
        Self {
            worker,
            kind,
            payload,
            error,
        }
    }

    /// Id of the worker that sent the report.
    #[inline]
    pub fn worker(&self) -> WorkerId {
        self.worker
    }

    /// Report classification.
    #[inline]
    pub fn kind(&self) -> ReportKind {
        self.kind
    }

    /// Opaque payload, if any.
    #[inline]
    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    /// Payload downcast to a concrete type.
    pub fn payload_as<T: 'static>(&self) -> Option<&T> {
        self.payload.as_deref().and_then(|p| p.downcast_ref::<T>())
    }

    /// Attached error, if any.
    #[inline]
    pub fn error(&self) -> Option<&ReportError> {
        self.error.as_ref()
    }

    /// True for the zero report returned on a clean drain.
    pub fn is_zero(&self) -> bool {
        *self == Report::default()
    }
}

impl PartialEq for Report {
    fn eq(&self, other: &Self) -> bool {
        self.worker == other.worker
            && self.kind == other.kind
            && same_arc(&self.payload, &other.payload)
            && same_arc(&self.error, &other.error)
    }
}

impl Eq for Report {}

impl fmt::Debug for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Report")
            .field("worker", &self.worker)
            .field("kind", &self.kind)
            .field("payload", &self.payload.as_ref().map(|_| ".."))
            .field("error", &self.error.as_ref().map(|e| e.to_string()))
            .finish()
    }
}
