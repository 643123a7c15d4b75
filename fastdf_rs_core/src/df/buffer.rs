use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, TryLockError};

use ndarray::Array2;

/// Handle to a row-major buffer shared by every View derived from one owner.
///
/// Readers take the read lock; the owner's in-place writes use `try_write`
/// and never wait, so no reader can queue behind a pending writer.
#[derive(Debug)]
pub(crate) struct Buffer<T>(Arc<RwLock<Array2<T>>>);

impl<T> Clone for Buffer<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> Buffer<T> {
    pub fn new(values: Array2<T>) -> Self {
        Self(Arc::new(RwLock::new(values)))
    }

    // every write leaves the buffer consistent, so a poisoned lock is still readable
    pub fn read(&self) -> RwLockReadGuard<'_, Array2<T>> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn try_write(&self) -> Option<RwLockWriteGuard<'_, Array2<T>>> {
        match self.0.try_write() {
            Ok(guard) => Some(guard),
            Err(TryLockError::Poisoned(poisoned)) => Some(poisoned.into_inner()),
            Err(TryLockError::WouldBlock) => None,
        }
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
