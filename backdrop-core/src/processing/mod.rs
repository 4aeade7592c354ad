//! Background extraction logic and orchestration.
//!
//! This module serves as the central hub for turning sampled frames into
//! background images: the per-pixel median reduction and the batch driver
//! that feeds it.

/// Batch driver producing one background per sampler
pub mod background;

/// Per-pixel median reduction
pub mod median;

pub use background::{Background, BackgroundGenerator, BackgroundRun};
pub use median::median_stack;
