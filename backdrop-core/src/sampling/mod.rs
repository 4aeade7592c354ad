//! Randomized frame sampling.
//!
//! This module decides which frames of a video are sampled for one
//! background variant and which crop window is applied to them. Each
//! [`FrameSampler`] draws its crop offset and sampling window once, from an
//! injected random source, and keeps them fixed afterwards.

/// Crop rectangle geometry
pub mod crop;

/// Per-variant sampling state and queries
pub mod sampler;

pub use crop::CropRect;
pub use sampler::{CropMode, FrameSampler, TimingMode};
