use std::sync::atomic::{AtomicBool, Ordering};

/// Coalescing "directory changed" signal.
///
/// Any number of `mark` calls between two `take` calls collapse into one
/// dirty state.
#[derive(Debug, Default)]
pub struct ChangeFlag {
    dirty: AtomicBool,
}

impl ChangeFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&self) {
        self.dirty.store(true, Ordering::Release);
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    /// Clear the flag, returning whether it was set
    pub fn take(&self) -> bool {
        self.dirty.swap(false, Ordering::AcqRel)
    }
}
