use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic counter labelling processed text frames.
///
/// Shared through `Arc` when the scope is process-wide; owned by the session
/// otherwise. Values start at 1.
#[derive(Debug, Default)]
pub struct SequenceCounter {
    value: AtomicU64,
}

impl SequenceCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment and return the new value.
    pub fn next(&self) -> u64 {
        self.value.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Last value handed out (0 before the first frame).
    pub fn current(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }
}
