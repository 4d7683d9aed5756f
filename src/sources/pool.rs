use std::cell::{Cell, RefCell};

use log::{debug, warn};
use rustc_hash::FxHashMap;

use crate::region::{Region, StorageClass};

#[derive(Debug, Clone, Copy)]
pub struct PoolConfig {
    /// Idle buffers kept per length; extra returns are dropped.
    pub max_buffers_per_size: usize,
    /// Zero a buffer's bytes when it comes back to the pool.
    pub zero_on_return: bool,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_buffers_per_size: 16,
            zero_on_return: true,
        }
    }
}

/// Reusable byte buffers bucketed by exact length. Single-threaded.
#[derive(Debug, Default)]
pub struct BufferPool {
    config: PoolConfig,
    idle: RefCell<FxHashMap<usize, Vec<Vec<u8>>>>,
    checkouts: Cell<usize>,
    reuses: Cell<usize>,
}

impl BufferPool {
    pub fn new(config: PoolConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[inline]
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Check out a buffer of exactly `len` bytes. It goes back to the pool
    /// when the returned guard is dropped.
    pub fn checkout(&self, len: usize) -> PooledBuffer<'_> {
        self.checkouts.set(self.checkouts.get() + 1);
        let reused = self.idle.borrow_mut().get_mut(&len).and_then(Vec::pop);
        let buf = match reused {
            Some(buf) => {
                self.reuses.set(self.reuses.get() + 1);
                debug!("pool: reused {len}-byte buffer");
                buf
            }
            None => {
                debug!("pool: allocated {len}-byte buffer");
                vec![0u8; len]
            }
        };
        PooledBuffer {
            pool: self,
            buf: Some(buf),
        }
    }

    /// Idle buffers of length `len`.
    pub fn available(&self, len: usize) -> usize {
        self.idle.borrow().get(&len).map_or(0, Vec::len)
    }

    /// Total checkouts, and how many were served from idle buffers.
    pub fn stats(&self) -> (usize, usize) {
        (self.checkouts.get(), self.reuses.get())
    }

    fn give_back(&self, mut buf: Vec<u8>) {
        let len = buf.len();
        let mut idle = self.idle.borrow_mut();
        let bucket = idle.entry(len).or_default();
        if bucket.len() >= self.config.max_buffers_per_size {
            warn!("pool: {len}-byte bucket full, dropping buffer");
            return;
        }
        if self.config.zero_on_return {
            buf.fill(0);
        }
        bucket.push(buf);
        debug!("pool: returned {len}-byte buffer");
    }
}

/// A buffer on loan from a [`BufferPool`].
///
/// Regions borrow the guard mutably, so the buffer cannot be returned while
/// any view over it is alive.
#[derive(Debug)]
pub struct PooledBuffer<'p> {
    pool: &'p BufferPool,
    buf: Option<Vec<u8>>,
}

impl<'p> PooledBuffer<'p> {
    pub fn as_slice(&self) -> &[u8] {
        self.buf.as_deref().unwrap_or_default()
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        self.buf.as_deref_mut().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    pub fn region(&mut self) -> Region<'_> {
        Region::new(self.as_mut_slice(), StorageClass::Pooled)
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        if let Some(buf) = self.buf.take() {
            self.pool.give_back(buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_reuses_returned_buffer() {
        let pool = BufferPool::default();
        {
            let mut buf = pool.checkout(24);
            buf.as_mut_slice()[0] = 7;
            assert_eq!(pool.available(24), 0);
        }
        assert_eq!(pool.available(24), 1);

        let buf = pool.checkout(24);
        assert_eq!(buf.as_slice()[0], 0, "zeroed on return");
        assert_eq!(pool.stats(), (2, 1));
    }

    #[test]
    fn test_bucket_limit() {
        let pool = BufferPool::new(PoolConfig {
            max_buffers_per_size: 1,
            zero_on_return: false,
        });
        let a = pool.checkout(8);
        let b = pool.checkout(8);
        drop(a);
        drop(b);
        assert_eq!(pool.available(8), 1);
        assert_eq!(pool.available(16), 0);
    }

    #[test]
    fn test_region_is_tagged_pooled() {
        let pool = BufferPool::default();
        let mut buf = pool.checkout(4);
        let region = buf.region();
        assert_eq!(region.storage_class(), StorageClass::Pooled);
        assert_eq!(region.len(), 4);
    }
}
