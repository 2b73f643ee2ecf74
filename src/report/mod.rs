//! Messages exchanged between workers and the group.
//!
//! - [`Report`] / [`ReportKind`]: what a worker tells the group (worker → group).
//! - [`Interrupt`] / [`InterruptKind`]: what the group tells a worker (group → worker).
//!
//! Both carry an optional opaque [`Payload`]; reports may also carry a [`ReportError`].

mod interrupt;
#[allow(clippy::module_inception)]
mod report;

use std::any::Any;
use std::sync::Arc;

pub use interrupt::{Interrupt, InterruptKind};
pub use report::{Report, ReportKind};

/// Opaque, shareable payload attached to a report or an interrupt.
pub type Payload = Arc<dyn Any + Send + Sync>;

/// Error attached to a report. Shared so reports stay cheap to clone.
pub type ReportError = Arc<dyn std::error::Error + Send + Sync>;

/// Compares two optional `Arc`s by identity.
pub(crate) fn same_arc<T: ?Sized>(a: &Option<Arc<T>>, b: &Option<Arc<T>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        _ => false,
    }
}
