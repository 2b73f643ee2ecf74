//! # Registry of live workers.
//!
//! Holds everything guarded by the group's single exclusion lock:
//! - the id allocator;
//! - the live worker set (`WorkerId → Mailbox`);
//! - the auto-interrupt policy.
//!
//! ## Rules
//! - A worker enters on `add` and leaves only through `notify_done`.
//! - Error and custom reports never remove a worker.
//! - Interrupt delivery only touches mailboxes, which never block.

use std::collections::HashMap;

use tokio_util::sync::CancellationToken;

use super::id::{IdAllocator, WorkerId};
use super::policy::AutoInterruptPolicy;
use crate::report::Interrupt;
use crate::worker::Mailbox;

pub(crate) struct Registry {
    ids: IdAllocator,
    workers: HashMap<WorkerId, Mailbox>,
    pub(crate) policy: AutoInterruptPolicy,
}

impl Registry {
    pub(crate) fn new(policy: AutoInterruptPolicy) -> Self {
        Self {
            ids: IdAllocator::new(),
            workers: HashMap::new(),
            policy,
        }
    }

    /// Allocates an id and registers a fresh, empty mailbox under it.
    pub(crate) fn register(&mut self, parent: &CancellationToken) -> (WorkerId, Mailbox) {
        let id = self.ids.next();
        let mailbox = Mailbox::new(parent);
        self.workers.insert(id, mailbox.clone());
        (id, mailbox)
    }

    /// Removes a worker. Returns `false` if it was not registered.
    pub(crate) fn deregister(&mut self, id: WorkerId) -> bool {
        self.workers.remove(&id).is_some()
    }

    pub(crate) fn contains(&self, id: WorkerId) -> bool {
        self.workers.contains_key(&id)
    }

    pub(crate) fn len(&self) -> usize {
        self.workers.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// Puts `interrupt` into one worker's mailbox. No-op for unknown ids.
    pub(crate) fn deliver(&self, id: WorkerId, interrupt: Interrupt) -> bool {
        match self.workers.get(&id) {
            Some(mailbox) => {
                mailbox.put(interrupt);
                true
            }
            None => false,
        }
    }

    /// Puts `interrupt` into every registered mailbox. Returns how many got it.
    pub(crate) fn broadcast(&self, interrupt: &Interrupt) -> usize {
        for mailbox in self.workers.values() {
            mailbox.put(interrupt.clone());
        }
        self.workers.len()
    }
}
