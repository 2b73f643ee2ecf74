//! Group core: registration, waiting/escalation, interrupt delivery.
//!
//! The only public types from this module are [`Group`], [`GroupBuilder`],
//! [`WaitOutcome`] and [`WorkerId`].
//!
//! Internal modules:
//! - [`id`]: per-group monotonic worker ids;
//! - [`policy`]: report kind → interrupt kind table;
//! - [`registry`]: live workers + policy, behind the single group lock;
//! - [`shared`]: notification queue and done accounting shared with handles;
//! - [`group`]: the public `Group` API and the wait loop.

mod builder;
#[allow(clippy::module_inception)]
mod group;
mod id;
mod outcome;
mod policy;
mod registry;
mod shared;

pub use builder::GroupBuilder;
pub use group::Group;
pub use id::WorkerId;
pub use outcome::WaitOutcome;

pub(crate) use shared::{DoneTicket, Shared};
