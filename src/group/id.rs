//! # Worker identities.
//!
//! Every [`Group`](crate::Group) owns its own [`IdAllocator`]; ids are unique
//! and strictly increasing per group and are never reused. Id `0` is reserved
//! for the zero [`Report`](crate::Report).

use std::fmt;

/// Opaque identity of a registered worker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkerId(u64);

impl WorkerId {
    #[inline]
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value (1-based; `0` only for the zero report).
    #[inline]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic id source. Callers serialize access (the registry lock).
#[derive(Debug, Default)]
pub(crate) struct IdAllocator {
    last: u64,
}

impl IdAllocator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns an id strictly greater than every id issued before.
    pub(crate) fn next(&mut self) -> WorkerId {
        self.last += 1;
        WorkerId::new(self.last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_id_is_one() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.next().as_u64(), 1);
    }

    #[test]
    fn test_ids_strictly_increase() {
        let mut ids = IdAllocator::new();
        let mut prev = WorkerId::default();
        for _ in 0..1000 {
            let id = ids.next();
            assert!(id > prev, "{id} should be greater than {prev}");
            prev = id;
        }
    }

    #[test]
    fn test_allocators_are_independent() {
        let mut a = IdAllocator::new();
        let mut b = IdAllocator::new();
        a.next();
        a.next();
        assert_eq!(b.next(), WorkerId::new(1));
    }

    #[test]
    fn test_display() {
        assert_eq!(WorkerId::new(2).to_string(), "#2");
    }
}
