//! Image input: decoding user files and generating the built-in demo image.

/// Built-in demo image.
pub mod demo;
/// Encoded bytes to [`crate::SourceImage`].
pub mod decode;
