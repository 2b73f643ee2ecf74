//! Error types used by the group and by workers.
//!
//! This module defines two error enums:
//!
//! - [`GroupError`] — errors raised by the coordination primitive itself.
//! - [`WorkerError`] — a ready-made failure type workers can attach to a report.
//!
//! Both provide `as_label` / `as_message` helpers for logs and metrics.

use thiserror::Error;

/// # Errors produced by the group.
///
/// Reporting is a rendezvous with [`Group::wait`](crate::Group::wait); the only
/// way it can fail is that the consumer side is gone.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupError {
    /// The group was dropped; no consumer will ever receive the report.
    #[error("group closed; report not delivered")]
    Closed,
}

impl GroupError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use escalator::GroupError;
    ///
    /// assert_eq!(GroupError::Closed.as_label(), "group_closed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            GroupError::Closed => "group_closed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            GroupError::Closed => "group closed before the report was received".to_string(),
        }
    }
}

/// # Failures a worker can report.
///
/// Any `std::error::Error + Send + Sync` can travel in a [`Report`](crate::Report);
/// this enum covers the common cases so simple workers don't need their own type.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkerError {
    /// Work failed; the worker may keep running.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Work failed and the worker cannot continue.
    #[error("fatal error: {error}")]
    Fatal {
        /// The underlying error message.
        error: String,
    },

    /// Worker gave up after observing an interrupt.
    #[error("worker interrupted")]
    Canceled,
}

impl WorkerError {
    /// Shorthand for [`WorkerError::Fail`].
    pub fn fail(error: impl Into<String>) -> Self {
        WorkerError::Fail {
            error: error.into(),
        }
    }

    /// Shorthand for [`WorkerError::Fatal`].
    pub fn fatal(error: impl Into<String>) -> Self {
        WorkerError::Fatal {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use escalator::WorkerError;
    ///
    /// assert_eq!(WorkerError::fail("boom").as_label(), "worker_failed");
    /// assert_eq!(WorkerError::Canceled.as_label(), "worker_canceled");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            WorkerError::Fail { .. } => "worker_failed",
            WorkerError::Fatal { .. } => "worker_fatal",
            WorkerError::Canceled => "worker_canceled",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            WorkerError::Fail { error } => format!("error: {error}"),
            WorkerError::Fatal { error } => format!("fatal: {error}"),
            WorkerError::Canceled => "interrupted".to_string(),
        }
    }

    /// Indicates whether the worker cannot continue after this error.
    ///
    /// Returns `true` only for [`WorkerError::Fatal`].
    ///
    /// # Example
    /// ```
    /// use escalator::WorkerError;
    ///
    /// assert!(WorkerError::fatal("corrupt index").is_fatal());
    /// assert!(!WorkerError::fail("retry later").is_fatal());
    /// ```
    pub fn is_fatal(&self) -> bool {
        matches!(self, WorkerError::Fatal { .. })
    }
}
