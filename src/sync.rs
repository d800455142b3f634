//! Single lock type used for all engine state, on `std` and `no_std` alike.

#[cfg(feature = "std")]
pub type MutexGuard<'a, T> = std::sync::MutexGuard<'a, T>;

#[cfg(all(not(feature = "std"), feature = "alloc"))]
pub type MutexGuard<'a, T> = spin::MutexGuard<'a, T>;

pub struct Mutex<T> {
    #[cfg(feature = "std")]
    inner: std::sync::Mutex<T>,
    #[cfg(all(not(feature = "std"), feature = "alloc"))]
    inner: spin::Mutex<T>,
}

impl<T> Mutex<T> {
    #[cfg(feature = "std")]
    pub const fn new(value: T) -> Self {
        Self {
            inner: std::sync::Mutex::new(value),
        }
    }

    #[cfg(all(not(feature = "std"), feature = "alloc"))]
    pub const fn new(value: T) -> Self {
        Self {
            inner: spin::Mutex::new(value),
        }
    }

    /// Locks the state. A poisoned lock is recovered: every engine mutation
    /// leaves the state consistent before it can panic.
    #[cfg(feature = "std")]
    pub fn lock(&self) -> MutexGuard<'_, T> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    #[cfg(all(not(feature = "std"), feature = "alloc"))]
    pub fn lock(&self) -> MutexGuard<'_, T> {
        self.inner.lock()
    }
}
