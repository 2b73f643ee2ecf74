//! # Interrupts delivered to workers.
//!
//! Interrupts are advisory: the group drops one into a worker's mailbox and
//! the worker decides when (and whether) to look at it.

use std::fmt;

use super::{Payload, same_arc};

/// Classification of an interrupt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InterruptKind {
    /// Finish up and stop.
    #[default]
    Stop,
    /// Stop now. Also cancels the worker's [`cancellation`](crate::WorkerHandle::cancellation) token.
    Kill,
    /// Application-defined signal.
    Custom(u32),
}

impl InterruptKind {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(self) -> &'static str {
        match self {
            InterruptKind::Stop => "stop",
            InterruptKind::Kill => "kill",
            InterruptKind::Custom(_) => "custom",
        }
    }
}

impl fmt::Display for InterruptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterruptKind::Custom(code) => write!(f, "custom({code})"),
            other => f.write_str(other.as_label()),
        }
    }
}

/// Cooperative control signal with an optional payload.
///
/// ## Example
/// ```rust
/// use std::sync::Arc;
/// use escalator::{Interrupt, InterruptKind};
///
/// let i = Interrupt::new(InterruptKind::Custom(3)).with_payload(Arc::new("drain"));
/// assert_eq!(i.kind(), InterruptKind::Custom(3));
/// assert_eq!(i.payload_as::<&str>(), Some(&"drain"));
/// ```
#[derive(Clone, Default)]
pub struct Interrupt {
    kind: InterruptKind,
    payload: Option<Payload>,
}

impl Interrupt {
    /// Creates an interrupt without payload.
    pub fn new(kind: InterruptKind) -> Self {
        Self {
            kind,
            payload: None,
        }
    }

    /// Shorthand for `Interrupt::new(InterruptKind::Stop)`.
    pub fn stop() -> Self {
        Self::new(InterruptKind::Stop)
    }

    /// Shorthand for `Interrupt::new(InterruptKind::Kill)`.
    pub fn kill() -> Self {
        Self::new(InterruptKind::Kill)
    }

    /// Attaches a payload.
    #[inline]
    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }

    #[inline]
    pub fn kind(&self) -> InterruptKind {
        self.kind
    }

    #[inline]
    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    /// Payload downcast to a concrete type.
    pub fn payload_as<T: 'static>(&self) -> Option<&T> {
        self.payload.as_deref().and_then(|p| p.downcast_ref::<T>())
    }
}

impl PartialEq for Interrupt {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && same_arc(&self.payload, &other.payload)
    }
}

impl Eq for Interrupt {}

impl fmt::Debug for Interrupt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interrupt")
            .field("kind", &self.kind)
            .field("payload", &self.payload.as_ref().map(|_| ".."))
            .finish()
    }
}
