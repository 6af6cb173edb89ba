//! Atomic counter for invocation ids.
//!
//! Every outbound [`CommandFrame`](crate::protocol::frames::CommandFrame)
//! carries a channel-unique `id` that the wrapper echoes back in its
//! response's `to` field.  Correlation therefore depends on ids never
//! repeating within a channel lifetime and never being allocated twice, even
//! when invocations are issued concurrently.

use std::sync::atomic::{AtomicU64, Ordering};

/// A thread-safe, monotonically increasing allocator for invocation ids.
///
/// Ids start at 1 — the wrapper convention reserves 0 for frames that expect
/// no response.
///
/// # Examples
///
/// ```rust
/// use zf_core::protocol::InvokeSequence;
///
/// let seq = InvokeSequence::new();
/// assert_eq!(seq.next(), 1);
/// assert_eq!(seq.next(), 2);
/// ```
pub struct InvokeSequence {
    inner: AtomicU64,
}

impl InvokeSequence {
    /// Creates a new allocator whose first id is 1.
    pub fn new() -> Self {
        Self {
            inner: AtomicU64::new(1),
        }
    }

    /// Returns the next id and atomically advances the counter.
    ///
    /// `Ordering::Relaxed` suffices: ids only need uniqueness, not memory
    /// synchronisation with other data.
    pub fn next(&self) -> u64 {
        self.inner.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for InvokeSequence {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_first_id_is_one() {
        let seq = InvokeSequence::new();
        assert_eq!(seq.next(), 1);
    }

    #[test]
    fn test_ids_are_sequential() {
        let seq = InvokeSequence::new();
        assert_eq!(seq.next(), 1);
        assert_eq!(seq.next(), 2);
        assert_eq!(seq.next(), 3);
    }

    #[test]
    fn test_concurrent_allocation_yields_unique_ids() {
        let seq = Arc::new(InvokeSequence::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let seq = Arc::clone(&seq);
            handles.push(std::thread::spawn(move || {
                (0..100).map(|_| seq.next()).collect::<Vec<u64>>()
            }));
        }

        let mut all: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 800, "no id may be allocated twice");
    }
}
