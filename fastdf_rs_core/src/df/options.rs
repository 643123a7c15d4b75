use std::sync::Arc;

use rayon::{ThreadPool, ThreadPoolBuilder};

use super::error::Result;

pub const DEFAULT_PREVIEW_ROWS: usize = 5;
pub const DEFAULT_PRECISION: usize = 6;
pub const DEFAULT_CACHE_CAPACITY: usize = 64;
pub const DEFAULT_PARALLEL_MIN_LANES: usize = 4096;

/// Runtime options of a frame, shared by every View derived from it.
///
/// - `preview_rows`: how many rows the text rendering shows before `...`
/// - `precision`: decimals used by the text rendering
/// - `cache_capacity`: max number of column offsets an `Indexer` memoizes
/// - `parallel_min_lanes`: reductions over fewer lanes stay on the caller's thread
///
/// The thread pool is only created through [`FrameOptions::with_num_threads`].
#[derive(Debug, Clone)]
pub struct FrameOptions {
    pub preview_rows: usize,
    pub precision: usize,
    pub cache_capacity: usize,
    pub parallel_min_lanes: usize,
    pool: Option<Arc<ThreadPool>>,
}

impl Default for FrameOptions {
    fn default() -> Self {
        Self {
            preview_rows: DEFAULT_PREVIEW_ROWS,
            precision: DEFAULT_PRECISION,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            parallel_min_lanes: DEFAULT_PARALLEL_MIN_LANES,
            pool: None,
        }
    }
}

impl FrameOptions {
    pub fn with_preview_rows(mut self, preview_rows: usize) -> Self {
        self.preview_rows = preview_rows;
        self
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_cache_capacity(mut self, cache_capacity: usize) -> Self {
        self.cache_capacity = cache_capacity;
        self
    }

    pub fn with_parallel_min_lanes(mut self, parallel_min_lanes: usize) -> Self {
        self.parallel_min_lanes = parallel_min_lanes;
        self
    }

    /// `num_threads <= 1` disables the pool.
    pub fn with_num_threads(mut self, num_threads: usize) -> Result<Self> {
        self.pool = if num_threads <= 1 {
            None
        } else {
            let pool = ThreadPoolBuilder::new().num_threads(num_threads).build()?;
            Some(Arc::new(pool))
        };
        Ok(self)
    }

    pub fn num_threads(&self) -> usize {
        self.pool
            .as_ref()
            .map_or(1, |pool| pool.current_num_threads())
    }

    pub(crate) fn pool_for(&self, num_lanes: usize) -> Option<&ThreadPool> {
        if num_lanes < self.parallel_min_lanes {
            return None;
        }
        self.pool.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = FrameOptions::default();
        assert_eq!(options.preview_rows, 5);
        assert_eq!(options.precision, 6);
        assert_eq!(options.num_threads(), 1);
        assert!(options.pool_for(usize::MAX).is_none());
    }

    #[test]
    fn test_pool_threshold() {
        let options = FrameOptions::default()
            .with_parallel_min_lanes(10)
            .with_num_threads(2)
            .unwrap();
        assert_eq!(options.num_threads(), 2);
        assert!(options.pool_for(9).is_none());
        assert!(options.pool_for(10).is_some());
        let options = options.with_num_threads(1).unwrap();
        assert!(options.pool_for(10).is_none());
    }
}
