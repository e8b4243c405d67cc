//! Host-facing session tying the source image, parameters, scheduler, pipeline and export together.

/// The [`FrySession`](fry_session::FrySession) facade and its options.
pub mod fry_session;
