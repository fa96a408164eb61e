use parking_lot::Mutex;

/// Cumulative count of bytes moved through a reader or writer.
///
/// This is the only piece of stream state meant to be touched from more
/// than one thread. The reader/writer holds an `Arc<ByteCounter>` and
/// bumps it after every physical transfer; another thread can clone the
/// handle via `counter()` and observe or reset it at any time. Every
/// access takes the lock, so an observer never sees a half-applied
/// update.
///
/// The count is informational: nothing in this crate branches on it.
#[derive(Debug, Default)]
pub struct ByteCounter {
    count: Mutex<u64>,
}

impl ByteCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `n` bytes to the running total.
    pub fn add(&self, n: usize) {
        *self.count.lock() += n as u64;
    }

    /// Bytes counted since creation or the last [`reset`](Self::reset).
    #[must_use]
    pub fn get(&self) -> u64 {
        *self.count.lock()
    }

    /// Zero the total. Does not touch any stream position.
    pub fn reset(&self) {
        *self.count.lock() = 0;
    }
}
