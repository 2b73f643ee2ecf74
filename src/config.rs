//! # Group configuration.
//!
//! Provides [`GroupConfig`], the settings a [`Group`](crate::Group) is built from.
//!
//! ## Sentinel values
//! - `queue_capacity = 0` → clamped to 1

use std::borrow::Cow;
use std::collections::HashMap;

use crate::report::{InterruptKind, ReportKind};

/// Settings for one group.
///
/// ## Field semantics
/// - `name`: label attached to every log event of the group
/// - `queue_capacity`: how many reports may sit in the notification queue
///   (min 1). Reporting is a rendezvous either way; the capacity only decides
///   how many reports [`Group::drain`](crate::Group::drain) can pick up at once.
/// - `auto_interrupts`: initial auto-interrupt policy
#[derive(Clone, Debug)]
pub struct GroupConfig {
    /// Group label for logs.
    pub name: Cow<'static, str>,

    /// Capacity of the notification queue.
    pub queue_capacity: usize,

    /// Report kind → interrupt kind broadcast when `wait` escalates.
    ///
    /// Can be changed later with [`Group::set_auto_interrupt`](crate::Group::set_auto_interrupt).
    pub auto_interrupts: HashMap<ReportKind, InterruptKind>,
}

impl GroupConfig {
    /// Returns the queue capacity clamped to a minimum of 1.
    #[inline]
    pub fn queue_capacity_clamped(&self) -> usize {
        self.queue_capacity.max(1)
    }
}

impl Default for GroupConfig {
    /// Default configuration:
    ///
    /// - `name = "group"`
    /// - `queue_capacity = 64`
    /// - `auto_interrupts` empty
    fn default() -> Self {
        Self {
            name: Cow::Borrowed("group"),
            queue_capacity: 64,
            auto_interrupts: HashMap::new(),
        }
    }
}
