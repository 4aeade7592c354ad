// backdrop-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use backdrop_core::config::{
    DEFAULT_IMAGE_EXTENSION, DEFAULT_MAX_DURATION, DEFAULT_MAX_SHIFT, DEFAULT_MIN_DURATION,
    DEFAULT_NUM_OUTPUTS, DEFAULT_NUM_SAMPLES, DEFAULT_OUTPUT_DIR,
};
use backdrop_core::CoreConfig;
use clap::Parser;
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Backdrop: Median background extractor",
    long_about = "Samples frames across a video and saves per-pixel median backgrounds, \
                  each cut with a randomly shifted crop window."
)]
pub struct Cli {
    /// Video to extract backgrounds from (asked for when omitted)
    #[arg(value_name = "VIDEO")]
    pub video: Option<PathBuf>,

    /// Folder that background folders are created in
    #[arg(short = 'o', long = "output", value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Number of background images to generate
    #[arg(short = 'n', long = "num-output", value_name = "COUNT", default_value_t = DEFAULT_NUM_OUTPUTS)]
    pub num_outputs: usize,

    /// Number of frames sampled for each background
    #[arg(short = 's', long = "num-samples", value_name = "COUNT", default_value_t = DEFAULT_NUM_SAMPLES)]
    pub num_samples: usize,

    /// Maximum crop offset in x, in pixels
    #[arg(short = 'x', long = "max-x-shift", value_name = "PIXELS", default_value_t = DEFAULT_MAX_SHIFT)]
    pub max_x_shift: u32,

    /// Maximum crop offset in y, in pixels
    #[arg(short = 'y', long = "max-y-shift", value_name = "PIXELS", default_value_t = DEFAULT_MAX_SHIFT)]
    pub max_y_shift: u32,

    /// Minimum fraction of the video that samples are spread over
    #[arg(long = "min-sampling-duration", visible_alias = "dn", value_name = "FRACTION", default_value_t = DEFAULT_MIN_DURATION)]
    pub min_duration: f64,

    /// Maximum fraction of the video that samples are spread over
    #[arg(long = "max-sampling-duration", visible_alias = "dx", value_name = "FRACTION", default_value_t = DEFAULT_MAX_DURATION)]
    pub max_duration: f64,

    /// Seed for reproducible crops and sample timing
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Image format of the saved backgrounds, by extension
    #[arg(long = "ext", value_name = "EXT", default_value = DEFAULT_IMAGE_EXTENSION)]
    pub image_extension: String,

    /// Save without asking for confirmation
    #[arg(long, default_value_t = false)]
    pub yes: bool,

    /// Enable debug logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Cli {
    /// Builds the core configuration from the parsed arguments.
    pub fn core_config(&self) -> CoreConfig {
        CoreConfig {
            output_dir: self.output_dir.clone(),
            image_extension: self.image_extension.clone(),
            num_outputs: self.num_outputs,
            num_samples: self.num_samples,
            max_x_shift: self.max_x_shift,
            max_y_shift: self.max_y_shift,
            min_duration: self.min_duration,
            max_duration: self.max_duration,
            seed: self.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::parse_from(["backdrop", "street.mp4"]);

        assert_eq!(cli.video, Some(PathBuf::from("street.mp4")));
        assert_eq!(cli.output_dir, PathBuf::from("results"));
        assert_eq!(cli.num_outputs, 5);
        assert_eq!(cli.num_samples, 15);
        assert_eq!(cli.max_x_shift, 100);
        assert_eq!(cli.max_y_shift, 100);
        assert_eq!(cli.min_duration, 0.25);
        assert_eq!(cli.max_duration, 1.0);
        assert_eq!(cli.image_extension, "png");
        assert!(cli.seed.is_none());
        assert!(!cli.yes);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_video_is_optional() {
        let cli = Cli::parse_from(["backdrop"]);
        assert!(cli.video.is_none());
    }

    #[test]
    fn test_parse_short_flags() {
        let cli = Cli::parse_from([
            "backdrop", "clip.avi", "-o", "out", "-n", "3", "-s", "9", "-x", "40", "-y", "20", "-v",
        ]);

        assert_eq!(cli.output_dir, PathBuf::from("out"));
        assert_eq!(cli.num_outputs, 3);
        assert_eq!(cli.num_samples, 9);
        assert_eq!(cli.max_x_shift, 40);
        assert_eq!(cli.max_y_shift, 20);
        assert!(cli.verbose);
    }

    #[test]
    fn test_parse_duration_aliases() {
        let cli = Cli::parse_from(["backdrop", "clip.avi", "--dn", "0.1", "--dx", "0.6"]);
        assert_eq!(cli.min_duration, 0.1);
        assert_eq!(cli.max_duration, 0.6);

        let cli = Cli::parse_from([
            "backdrop",
            "clip.avi",
            "--min-sampling-duration",
            "0.3",
            "--max-sampling-duration",
            "0.9",
        ]);
        assert_eq!(cli.min_duration, 0.3);
        assert_eq!(cli.max_duration, 0.9);
    }

    #[test]
    fn test_parse_additions_into_config() {
        let cli = Cli::parse_from([
            "backdrop", "clip.avi", "--seed", "42", "--ext", "jpg", "--yes",
        ]);
        let config = cli.core_config();

        assert_eq!(config.seed, Some(42));
        assert_eq!(config.image_extension, "jpg");
        assert!(cli.yes);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_negative_shift_rejected() {
        assert!(Cli::try_parse_from(["backdrop", "clip.avi", "-x", "-5"]).is_err());
    }
}
