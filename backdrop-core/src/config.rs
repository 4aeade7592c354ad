// ============================================================================
// backdrop-core/src/config.rs
// ============================================================================
//
// CONFIGURATION: Core Configuration Structures and Constants
//
// This module defines the configuration structures and default constants used
// throughout the backdrop-core library.
//
// KEY COMPONENTS:
// - CoreConfig: Settings for one extraction run, as supplied by a consumer
// - SamplerConfig: Per-video construction arguments for frame samplers
// - Default constants: Predefined values for common settings
//
// USAGE:
// Instances of CoreConfig are created by consumers of the library (like
// backdrop-cli). Once the video size is known, `CoreConfig::sampler_config`
// produces the SamplerConfig that every sampler of the run is built from.

// ---- Internal crate imports ----
use crate::error::{CoreResult, config_error};

// ---- Standard library imports ----
use std::path::PathBuf;

// ============================================================================
// DEFAULT CONSTANTS
// ============================================================================

/// Default folder that background images are written into.
pub const DEFAULT_OUTPUT_DIR: &str = "results";

/// Default number of background variants produced per run (including the
/// centered reference variant).
pub const DEFAULT_NUM_OUTPUTS: usize = 5;

/// Default number of frames sampled for each median background.
pub const DEFAULT_NUM_SAMPLES: usize = 15;

/// Default maximum crop offset, in pixels, for both axes.
pub const DEFAULT_MAX_SHIFT: u32 = 100;

/// Default minimum fraction of the video that samples are spread over.
pub const DEFAULT_MIN_DURATION: f64 = 0.25;

/// Default maximum fraction of the video that samples are spread over.
pub const DEFAULT_MAX_DURATION: f64 = 1.0;

/// Default image extension used when saving backgrounds.
pub const DEFAULT_IMAGE_EXTENSION: &str = "png";

// ============================================================================
// SAMPLER CONFIGURATION
// ============================================================================

/// Construction arguments shared by every sampler of one run.
///
/// The duration pair is unordered; samplers sort it themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplerConfig {
    /// Full decoded frame size as `(width, height)`
    pub video_wh: (u32, u32),

    /// Maximum crop offset as `(x, y)`
    pub max_shift_xy: (u32, u32),

    /// Bounds on the fraction of the video a sampling window may span
    pub min_max_duration: (f64, f64),

    /// Number of sample positions generated per sampler
    pub num_samples: usize,
}

impl SamplerConfig {
    pub fn new(
        video_wh: (u32, u32),
        max_shift_xy: (u32, u32),
        min_max_duration: (f64, f64),
        num_samples: usize,
    ) -> Self {
        Self {
            video_wh,
            max_shift_xy,
            min_max_duration,
            num_samples,
        }
    }

    /// Checks that the arguments describe a crop window that fits inside the
    /// frame and a sampling window inside `[0, 1]`.
    pub fn validate(&self) -> CoreResult<()> {
        let (width, height) = self.video_wh;
        let (max_x, max_y) = self.max_shift_xy;

        if width == 0 || height == 0 {
            return Err(config_error(format!(
                "video dimensions must be positive, got {width}x{height}"
            )));
        }
        if max_x >= width {
            return Err(config_error(format!(
                "max x shift ({max_x}) must be smaller than the video width ({width})"
            )));
        }
        if max_y >= height {
            return Err(config_error(format!(
                "max y shift ({max_y}) must be smaller than the video height ({height})"
            )));
        }
        validate_durations(self.min_max_duration)?;
        validate_num_samples(self.num_samples)
    }
}

// ============================================================================
// CORE CONFIGURATION
// ============================================================================

/// Settings for one background extraction run.
///
/// # Examples
///
/// ```rust
/// use backdrop_core::CoreConfig;
///
/// let mut config = CoreConfig::default();
/// config.num_outputs = 3;
/// config.seed = Some(7);
/// config.validate().unwrap();
///
/// let sampler_config = config.sampler_config((1920, 1080));
/// assert_eq!(sampler_config.max_shift_xy, (100, 100));
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfig {
    // ---- Output ----

    /// Folder that per-video background folders are created in
    pub output_dir: PathBuf,

    /// Image extension (and therefore format) of saved backgrounds
    pub image_extension: String,

    // ---- Sampling ----

    /// Number of background variants to produce (the first is centered)
    pub num_outputs: usize,

    /// Number of frames sampled for each variant
    pub num_samples: usize,

    /// Maximum crop offset in x
    pub max_x_shift: u32,

    /// Maximum crop offset in y
    pub max_y_shift: u32,

    /// Minimum sampling window, as a fraction of the video
    pub min_duration: f64,

    /// Maximum sampling window, as a fraction of the video
    pub max_duration: f64,

    /// Seed for the random source; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            image_extension: DEFAULT_IMAGE_EXTENSION.to_string(),
            num_outputs: DEFAULT_NUM_OUTPUTS,
            num_samples: DEFAULT_NUM_SAMPLES,
            max_x_shift: DEFAULT_MAX_SHIFT,
            max_y_shift: DEFAULT_MAX_SHIFT,
            min_duration: DEFAULT_MIN_DURATION,
            max_duration: DEFAULT_MAX_DURATION,
            seed: None,
        }
    }
}

impl CoreConfig {
    /// Validates the settings that do not depend on the video itself.
    ///
    /// Shift limits are checked against the frame size later, when
    /// samplers are constructed.
    pub fn validate(&self) -> CoreResult<()> {
        if self.num_outputs == 0 {
            return Err(config_error("number of outputs must be at least 1"));
        }
        validate_num_samples(self.num_samples)?;
        validate_durations((self.min_duration, self.max_duration))?;

        let ext = self.image_extension.trim_start_matches('.');
        let writable = image::ImageFormat::from_extension(ext).is_some_and(|f| f.writing_enabled());
        if ext.is_empty() || !writable {
            return Err(config_error(format!(
                "unsupported image extension '{}'",
                self.image_extension
            )));
        }
        Ok(())
    }

    /// Builds the sampler arguments for a video of the given size.
    pub fn sampler_config(&self, video_wh: (u32, u32)) -> SamplerConfig {
        SamplerConfig::new(
            video_wh,
            (self.max_x_shift, self.max_y_shift),
            (self.min_duration, self.max_duration),
            self.num_samples,
        )
    }
}

// ============================================================================
// VALIDATION HELPERS
// ============================================================================

fn validate_durations((a, b): (f64, f64)) -> CoreResult<()> {
    for value in [a, b] {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(config_error(format!(
                "sampling durations must lie within [0, 1], got {value}"
            )));
        }
    }
    Ok(())
}

fn validate_num_samples(num_samples: usize) -> CoreResult<()> {
    if num_samples == 0 {
        return Err(config_error("number of samples must be at least 1"));
    }
    Ok(())
}
