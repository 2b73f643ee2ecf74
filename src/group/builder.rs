use std::borrow::Cow;

use super::group::Group;
use crate::config::GroupConfig;
use crate::report::{InterruptKind, ReportKind};

/// Builder for a [`Group`] with a name and a preset auto-interrupt policy.
///
/// ```
/// use escalator::{Group, InterruptKind, ReportKind};
///
/// let group = Group::builder()
///     .name("ingest")
///     .with_auto_interrupt(ReportKind::Error, InterruptKind::Stop)
///     .build();
/// assert_eq!(group.name(), "ingest");
/// ```
#[derive(Debug, Default)]
pub struct GroupBuilder {
    cfg: GroupConfig,
}

impl GroupBuilder {
    /// Creates a builder starting from the given configuration.
    pub fn new(cfg: GroupConfig) -> Self {
        Self { cfg }
    }

    /// Replaces the whole configuration, dropping earlier setter calls.
    pub fn with_config(mut self, cfg: GroupConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Sets the group label used in logs.
    pub fn name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.cfg.name = name.into();
        self
    }

    /// Sets the notification queue capacity (min 1).
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.cfg.queue_capacity = capacity;
        self
    }

    /// Adds an auto-interrupt rule.
    pub fn with_auto_interrupt(mut self, report: ReportKind, interrupt: InterruptKind) -> Self {
        self.cfg.auto_interrupts.insert(report, interrupt);
        self
    }

    /// Builds the group.
    pub fn build(self) -> Group {
        Group::with_config(self.cfg)
    }
}
