//! Bounded object reuse.
//!
//! Producers that need short-lived scratch objects every frame (sort keys,
//! staging vectors, visibility lists) borrow them from an [`ObjectPool`]
//! instead of allocating, breaking per-frame allocation pressure. The pool is
//! the one component in this crate built for concurrent access: background
//! workers may borrow and recycle from any thread.

use crossbeam_queue::ArrayQueue;

/// Objects that can re-enter an [`ObjectPool`] after use.
pub trait Reusable {
    /// Restores the object to a clean state before it re-enters the pool.
    ///
    /// The default is a no-op for objects with no state to clear.
    fn reset(&mut self) {}
}

impl<T> Reusable for Vec<T> {
    fn reset(&mut self) {
        self.clear();
    }
}

impl Reusable for String {
    fn reset(&mut self) {
        self.clear();
    }
}

/// Bounded lock-free reuse pool.
///
/// [`borrow`](Self::borrow) never fails and never blocks: an empty pool falls
/// back to the configured factory. [`recycle`](Self::recycle) resets the
/// object and re-enqueues it unless the pool is at its maximum, in which case
/// the object is discarded to bound memory (defined behavior, not an error).
///
/// # Thread safety
///
/// Borrow and recycle are safe from multiple threads; the underlying queue is
/// lock-free. [`size`](Self::size) is an approximate statistic; a small
/// amount of slack between observed and true size under races is acceptable.
///
/// # Example
///
/// ```
/// use frameloom::pool::ObjectPool;
///
/// let pool: ObjectPool<Vec<u32>> = ObjectPool::new(16, Vec::new);
///
/// let mut scratch = pool.borrow();
/// scratch.extend([1, 2, 3]);
/// pool.recycle(scratch);
///
/// // The recycled vector comes back cleared, with its allocation intact.
/// assert!(pool.borrow().is_empty());
/// ```
pub struct ObjectPool<T> {
    queue: ArrayQueue<T>,
    factory: Box<dyn Fn() -> T + Send + Sync>,
}

impl<T: Reusable> ObjectPool<T> {
    /// Creates a pool holding at most `max_size` idle instances.
    ///
    /// # Panics
    ///
    /// Panics if `max_size` is zero.
    #[must_use]
    pub fn new(max_size: usize, factory: impl Fn() -> T + Send + Sync + 'static) -> Self {
        assert!(max_size > 0, "pool capacity must be non-zero");
        Self {
            queue: ArrayQueue::new(max_size),
            factory: Box::new(factory),
        }
    }

    /// Takes an instance from the pool, constructing a fresh one when the
    /// pool is empty.
    #[must_use]
    pub fn borrow(&self) -> T {
        self.queue.pop().unwrap_or_else(|| (self.factory)())
    }

    /// Resets `object` and returns it to the pool. A full pool discards the
    /// object instead.
    pub fn recycle(&self, mut object: T) {
        object.reset();
        // Push fails only when the queue is at capacity; drop the object.
        let _ = self.queue.push(object);
    }

    /// Drops every pooled instance.
    pub fn clear(&self) {
        while self.queue.pop().is_some() {}
    }

    /// Approximate number of idle instances (statistics only).
    #[must_use]
    pub fn size(&self) -> usize {
        self.queue.len()
    }

    /// Maximum number of idle instances the pool retains.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.queue.capacity()
    }
}
