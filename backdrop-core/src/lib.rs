//! Core library for extracting static background images from video.
//!
//! A background is the per-pixel median of frames sampled across a video.
//! Several variants are produced per video, each cut with a slightly shifted
//! crop window and sampled over a different stretch of the video, which
//! makes the set useful as augmented training data.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use backdrop_core::{BackgroundGenerator, CoreConfig, FfmpegFrameReader, FrameReader};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use std::path::Path;
//! use std::sync::atomic::AtomicBool;
//!
//! let config = CoreConfig::default();
//! config.validate().unwrap();
//!
//! let video = Path::new("/path/to/street.mp4");
//! let mut reader = FfmpegFrameReader::open(video).unwrap();
//! let sampler_config = config.sampler_config(reader.dimensions());
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let generator = BackgroundGenerator::new(config.num_outputs, &sampler_config, &mut rng).unwrap();
//! let run = generator.run(&mut reader, &AtomicBool::new(false));
//!
//! let folder = backdrop_core::save_backgrounds(
//!     &config.output_dir,
//!     video,
//!     run.backgrounds(),
//!     &config.image_extension,
//! )
//! .unwrap();
//! println!("Saved to {}", folder.display());
//! ```

pub mod config;
pub mod error;
pub mod external;
pub mod frame;
pub mod persistence;
pub mod processing;
pub mod progress_reporting;
pub mod sampling;
pub mod utils;

// Re-exports for public API
pub use config::{CoreConfig, SamplerConfig};
pub use error::{CoreError, CoreResult};
pub use external::{
    FfmpegFrameReader, FfmpegProcess, FfmpegSpawner, FrameReader, VideoInfo, check_dependency,
    probe_video,
};
pub use frame::Frame;
pub use persistence::{sanitize_video_name, save_backgrounds, variant_file_name};
pub use processing::{Background, BackgroundGenerator, BackgroundRun, median_stack};
pub use sampling::{CropMode, CropRect, FrameSampler, TimingMode};
pub use utils::format_duration;
