//! # Auto-interrupt policy.
//!
//! Maps a [`ReportKind`] to the [`InterruptKind`] broadcast to every registered
//! worker when `wait` escalates on a report of that kind.
//!
//! ```text
//! Custom(7) ──► Stop      wait sees Custom(7) ─► interrupt_all(Stop) ─► return
//! Error     ──► Kill      wait sees Error     ─► interrupt_all(Kill) ─► return
//! ```
//!
//! Entries for [`ReportKind::Done`] are accepted but never fire: normal
//! completion does not escalate.

use std::collections::HashMap;

use crate::report::{InterruptKind, ReportKind};

/// Report kind → interrupt kind table. Lives inside the registry lock.
#[derive(Debug, Clone, Default)]
pub(crate) struct AutoInterruptPolicy {
    rules: HashMap<ReportKind, InterruptKind>,
}

impl AutoInterruptPolicy {
    pub(crate) fn from_rules(rules: HashMap<ReportKind, InterruptKind>) -> Self {
        Self { rules }
    }

    /// Installs a rule, returning the one it replaced.
    pub(crate) fn set(&mut self, report: ReportKind, interrupt: InterruptKind) -> Option<InterruptKind> {
        self.rules.insert(report, interrupt)
    }

    /// Removes a rule, returning it.
    pub(crate) fn remove(&mut self, report: ReportKind) -> Option<InterruptKind> {
        self.rules.remove(&report)
    }

    pub(crate) fn get(&self, report: ReportKind) -> Option<InterruptKind> {
        self.rules.get(&report).copied()
    }

    /// Interrupt to broadcast when `wait` escalates on `report`.
    pub(crate) fn on_escalation(&self, report: ReportKind) -> Option<InterruptKind> {
        if report.is_done() {
            return None;
        }
        self.get(report)
    }
}
