//! Output surface encoding.

/// JPEG/PNG export of the output surface.
pub mod export;
