//! # Per-worker interrupt mailbox.
//!
//! A single slot, newest interrupt wins. Producers (the group, holding its
//! registry lock) never wait on the worker; the worker takes the pending
//! interrupt when it polls.
//!
//! ```text
//! interrupt_all ──put(Stop)──► [ slot: Stop ] ──put(Kill)──► [ slot: Kill ] ──take()──► Some(Kill)
//!                                                                            ──take()──► None
//! ```
//!
//! A `Kill` additionally cancels the mailbox token. The token is a child of
//! the group token, so dropping the group cancels it as well.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;

use crate::report::{Interrupt, InterruptKind};

struct Slot {
    pending: Mutex<Option<Interrupt>>,
    ready: Notify,
    token: CancellationToken,
}

/// Shared between the registry (producer) and the worker handle (consumer).
#[derive(Clone)]
pub(crate) struct Mailbox {
    slot: Arc<Slot>,
}

impl Mailbox {
    pub(crate) fn new(parent: &CancellationToken) -> Self {
        Self {
            slot: Arc::new(Slot {
                pending: Mutex::new(None),
                ready: Notify::new(),
                token: parent.child_token(),
            }),
        }
    }

    fn pending(&self) -> MutexGuard<'_, Option<Interrupt>> {
        // A bare Option has no invariant a poisoning panic could break.
        self.slot
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores `interrupt`, overwriting (and returning) any unread one. Never blocks.
    pub(crate) fn put(&self, interrupt: Interrupt) -> Option<Interrupt> {
        let kill = interrupt.kind() == InterruptKind::Kill;
        let replaced = self.pending().replace(interrupt);
        if kill {
            self.slot.token.cancel();
        }
        self.slot.ready.notify_one();
        replaced
    }

    /// Takes the pending interrupt, if any.
    pub(crate) fn take(&self) -> Option<Interrupt> {
        self.pending().take()
    }

    pub(crate) fn has_pending(&self) -> bool {
        self.pending().is_some()
    }

    /// Waits until an interrupt is pending, then takes it.
    pub(crate) async fn recv(&self) -> Interrupt {
        loop {
            if let Some(interrupt) = self.take() {
                return interrupt;
            }
            // A stale permit only costs one extra loop.
            self.slot.ready.notified().await;
        }
    }

    pub(crate) fn token(&self) -> CancellationToken {
        self.slot.token.clone()
    }
}
