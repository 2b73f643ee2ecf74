//! # Worker side of a group.
//!
//! - [`WorkerHandle`] - what a worker holds: reports outcomes, polls interrupts
//! - `Mailbox` - single-slot, newest-wins interrupt box behind each handle

mod handle;
mod mailbox;

pub use handle::WorkerHandle;
pub(crate) use mailbox::Mailbox;
