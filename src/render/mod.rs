//! Frame scheduling and the CPU render pipeline.
//!
//! The scheduler decides *when* and at what quality a frame runs; the pipeline owns the buffers and
//! runs the passes for one frame.

/// Pipeline orchestration for one frame.
pub mod pipeline;
/// Dimension-keyed buffer reuse.
pub mod pool;
pub(crate) mod resample;
/// Refresh-driven request coalescing.
pub mod scheduler;
