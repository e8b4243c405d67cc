use std::collections::HashMap;

use crate::foundation::core::{Raster, pixel_bytes, pixel_count};

/// Limits for buffers retained between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferPoolOpts {
    /// Maximum bytes retained across all buckets.
    pub max_pool_bytes: usize,
    /// Maximum number of retained buffers per `(width, height)` bucket.
    pub max_buffers_per_bucket: usize,
}

impl Default for BufferPoolOpts {
    fn default() -> Self {
        Self {
            max_pool_bytes: 256 * 1024 * 1024,
            max_buffers_per_bucket: 4,
        }
    }
}

/// Allocation counters, useful for checking that scrubbing stays on small buffers.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BufferPoolStats {
    /// Buffers currently parked in the pool.
    pub retained_buffers: usize,
    /// Bytes currently parked in the pool.
    pub retained_bytes: usize,
    /// Fresh allocations since creation.
    pub alloc_buffers: u64,
    /// Borrows served from a parked buffer.
    pub reused_buffers: u64,
    /// Releases dropped because a cap was hit.
    pub dropped_on_release: u64,
    /// Largest borrow, in pixels, since the last [`BufferPool::reset_peak`].
    pub peak_borrow_pixels: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct BufferKey {
    w: u32,
    h: u32,
}

/// Bounded pool of RGBA8 rasters keyed by dimensions.
///
/// Borrow/release happens per pass, never per pixel. Borrowed buffers have unspecified contents.
#[derive(Debug)]
pub(crate) struct BufferPool {
    opts: BufferPoolOpts,
    stats: BufferPoolStats,
    buckets: HashMap<BufferKey, Vec<Raster>>,
}

impl BufferPool {
    pub(crate) fn new(opts: BufferPoolOpts) -> Self {
        Self {
            opts,
            stats: BufferPoolStats::default(),
            buckets: HashMap::new(),
        }
    }

    pub(crate) fn stats(&self) -> BufferPoolStats {
        self.stats.clone()
    }

    pub(crate) fn reset_peak(&mut self) {
        self.stats.peak_borrow_pixels = 0;
    }

    pub(crate) fn borrow(&mut self, width: u32, height: u32) -> Raster {
        let key = BufferKey {
            w: width,
            h: height,
        };
        self.stats.peak_borrow_pixels = self
            .stats
            .peak_borrow_pixels
            .max(pixel_count(width, height));

        if let Some(r) = self.buckets.get_mut(&key).and_then(|b| b.pop()) {
            self.stats.retained_buffers = self.stats.retained_buffers.saturating_sub(1);
            self.stats.retained_bytes = self.stats.retained_bytes.saturating_sub(r.byte_len());
            self.stats.reused_buffers = self.stats.reused_buffers.saturating_add(1);
            return r;
        }

        self.stats.alloc_buffers = self.stats.alloc_buffers.saturating_add(1);
        tracing::trace!(width, height, "pool miss, allocating raster");
        Raster::new(width, height)
    }

    pub(crate) fn release(&mut self, raster: Raster) {
        if self.opts.max_pool_bytes == 0 || self.opts.max_buffers_per_bucket == 0 {
            self.stats.dropped_on_release = self.stats.dropped_on_release.saturating_add(1);
            return;
        }

        let (w, h) = raster.dims();
        let bytes = pixel_bytes(w, h);
        if self.stats.retained_bytes.saturating_add(bytes) > self.opts.max_pool_bytes {
            self.stats.dropped_on_release = self.stats.dropped_on_release.saturating_add(1);
            return;
        }

        let bucket = self.buckets.entry(BufferKey { w, h }).or_default();
        if bucket.len() >= self.opts.max_buffers_per_bucket {
            self.stats.dropped_on_release = self.stats.dropped_on_release.saturating_add(1);
            return;
        }

        bucket.push(raster);
        self.stats.retained_buffers = self.stats.retained_buffers.saturating_add(1);
        self.stats.retained_bytes = self.stats.retained_bytes.saturating_add(bytes);
    }

    /// Drop every parked buffer, e.g. when a new source image changes all sizes.
    pub(crate) fn clear(&mut self) {
        self.buckets.clear();
        self.stats.retained_buffers = 0;
        self.stats.retained_bytes = 0;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pool.rs"]
mod tests;
