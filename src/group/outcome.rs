use crate::report::Report;

/// Result of [`Group::wait`](crate::Group::wait).
///
/// - `Completed`: every registered worker reported done (or none was registered).
/// - `Escalated`: the first non-done report, returned as sent.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum WaitOutcome {
    Completed,
    Escalated(Report),
}

impl WaitOutcome {
    /// True for a clean drain.
    #[inline]
    pub fn is_all_done(&self) -> bool {
        matches!(self, WaitOutcome::Completed)
    }

    /// The escalating report, if any.
    pub fn report(&self) -> Option<&Report> {
        match self {
            WaitOutcome::Completed => None,
            WaitOutcome::Escalated(report) => Some(report),
        }
    }

    /// Splits into `(report, all_done)`; a clean drain yields the zero report.
    ///
    /// ```
    /// use escalator::{Report, WaitOutcome};
    ///
    /// let (report, all_done) = WaitOutcome::Completed.into_parts();
    /// assert!(all_done);
    /// assert_eq!(report, Report::default());
    /// ```
    pub fn into_parts(self) -> (Report, bool) {
        match self {
            WaitOutcome::Completed => (Report::default(), true),
            WaitOutcome::Escalated(report) => (report, false),
        }
    }
}
