// ============================================================================
// backdrop-core/src/sampling/sampler.rs
// ============================================================================
//
// FRAME SAMPLER: Randomized Crop and Sample Timing for One Variant
//
// A FrameSampler fixes, at construction, two random decisions for a single
// background variant:
// - the top-left offset of a fixed-size crop window
// - a sampling window [start, start + duration] within the normalized video
//   timeline, filled with evenly spaced sample positions
//
// Both decisions are cached as plain state. The only sanctioned mutations
// are `disable_random_shift` and `disable_random_sample_timing`, which move
// the sampler into its canonical centered / full-duration state.

// ---- Internal crate imports ----
use crate::config::SamplerConfig;
use crate::error::CoreResult;
use crate::frame::Frame;
use crate::sampling::crop::{CropRect, centered_origin};

// ---- External crate imports ----
use rand::Rng;

// ============================================================================
// STATE TAGS
// ============================================================================

/// How the crop window was placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropMode {
    /// Offset drawn uniformly within the shift limits
    Randomized,
    /// Offset fixed to the center of the shift range
    Centered,
}

/// How the sample positions were chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimingMode {
    /// Window length and start drawn at random
    Randomized,
    /// Samples spread over the whole video
    FullDuration,
}

// ============================================================================
// FRAME SAMPLER
// ============================================================================

/// Randomized crop and timing state for one background variant.
///
/// # Examples
///
/// ```rust
/// use backdrop_core::{FrameSampler, SamplerConfig};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let config = SamplerConfig::new((640, 480), (100, 100), (1.0, 1.0), 5);
/// let mut rng = StdRng::seed_from_u64(1);
/// let mut sampler = FrameSampler::new(&config, &mut rng).unwrap();
///
/// assert_eq!(sampler.norm_sample_positions(), &[0.0, 0.25, 0.5, 0.75, 1.0]);
///
/// sampler.disable_random_shift();
/// assert_eq!(sampler.crop_rect().as_tuple(), (50, 430, 50, 590));
/// assert_eq!(sampler.get_xy_shift(), (0, 0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSampler {
    video_wh: (u32, u32),
    max_shift_xy: (u32, u32),
    min_duration: f64,
    max_duration: f64,
    num_samples: usize,

    crop_rect: CropRect,
    crop_mode: CropMode,
    norm_sample_positions: Vec<f64>,
    timing_mode: TimingMode,
}

impl FrameSampler {
    /// Validates `config` and draws the crop offset and sampling window.
    pub fn new<R: Rng + ?Sized>(config: &SamplerConfig, rng: &mut R) -> CoreResult<Self> {
        config.validate()?;

        let (a, b) = config.min_max_duration;
        let (min_duration, max_duration) = if a <= b { (a, b) } else { (b, a) };

        let crop_rect = random_crop(config.video_wh, config.max_shift_xy, rng);
        let norm_sample_positions =
            random_sample_positions(min_duration, max_duration, config.num_samples, rng);

        log::debug!(
            "Sampler created: crop={}, samples={} over [{:.3}, {:.3}]",
            crop_rect,
            norm_sample_positions.len(),
            norm_sample_positions.first().copied().unwrap_or_default(),
            norm_sample_positions.last().copied().unwrap_or_default(),
        );

        Ok(Self {
            video_wh: config.video_wh,
            max_shift_xy: config.max_shift_xy,
            min_duration,
            max_duration,
            num_samples: config.num_samples,
            crop_rect,
            crop_mode: CropMode::Randomized,
            norm_sample_positions,
            timing_mode: TimingMode::Randomized,
        })
    }

    // ---- State transitions ----

    /// Replaces the random crop with the geometrically centered one.
    pub fn disable_random_shift(&mut self) {
        self.crop_rect = CropRect::centered(self.video_wh, self.max_shift_xy);
        self.crop_mode = CropMode::Centered;
    }

    /// Spreads the samples evenly over the whole video, `0` and `1` included.
    pub fn disable_random_sample_timing(&mut self) {
        self.min_duration = 1.0;
        self.max_duration = 1.0;
        self.norm_sample_positions = linspace(0.0, 1.0, self.num_samples);
        self.timing_mode = TimingMode::FullDuration;
    }

    // ---- Queries ----

    /// Cuts the sampler's crop window out of a full-size frame.
    pub fn crop(&self, frame: &Frame) -> CoreResult<Frame> {
        let (width, height) = self.video_wh;
        if frame.width() != width || frame.height() != height {
            return Err(crate::error::CoreError::FrameMismatch {
                expected: format!("{width}x{height}"),
                actual: format!("{}x{}", frame.width(), frame.height()),
            });
        }
        frame.crop(&self.crop_rect)
    }

    /// Crop offset relative to a centered crop; `(0, 0)` when centered.
    #[must_use]
    pub fn get_xy_shift(&self) -> (i64, i64) {
        let (center_x, center_y) = centered_origin(self.max_shift_xy);
        (
            i64::from(self.crop_rect.x1) - i64::from(center_x),
            i64::from(self.crop_rect.y1) - i64::from(center_y),
        )
    }

    /// Maps each normalized position onto `[0, total_video_frames - 1]`.
    ///
    /// Rounds half to even. Duplicates are kept, order follows the positions.
    #[must_use]
    pub fn get_frame_indices(&self, total_video_frames: u64) -> Vec<u64> {
        let Some(last_index) = total_video_frames.checked_sub(1) else {
            return Vec::new();
        };
        let last = last_index as f64;
        self.norm_sample_positions
            .iter()
            .map(|p| ((p * last).round_ties_even() as u64).min(last_index))
            .collect()
    }

    // ---- Accessors ----

    #[must_use]
    pub fn crop_rect(&self) -> CropRect {
        self.crop_rect
    }

    #[must_use]
    pub fn crop_mode(&self) -> CropMode {
        self.crop_mode
    }

    #[must_use]
    pub fn timing_mode(&self) -> TimingMode {
        self.timing_mode
    }

    #[must_use]
    pub fn norm_sample_positions(&self) -> &[f64] {
        &self.norm_sample_positions
    }

    /// `(min_duration, max_duration)`, sorted.
    #[must_use]
    pub fn duration_bounds(&self) -> (f64, f64) {
        (self.min_duration, self.max_duration)
    }

    #[must_use]
    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    #[must_use]
    pub fn video_wh(&self) -> (u32, u32) {
        self.video_wh
    }

    #[must_use]
    pub fn max_shift_xy(&self) -> (u32, u32) {
        self.max_shift_xy
    }
}

// ============================================================================
// RANDOMIZATION
// ============================================================================

fn random_crop<R: Rng + ?Sized>(
    video_wh: (u32, u32),
    max_shift_xy: (u32, u32),
    rng: &mut R,
) -> CropRect {
    let x1 = rng.gen_range(0..=max_shift_xy.0);
    let y1 = rng.gen_range(0..=max_shift_xy.1);
    CropRect::from_origin(
        x1,
        y1,
        video_wh.0 - max_shift_xy.0,
        video_wh.1 - max_shift_xy.1,
    )
}

fn random_sample_positions<R: Rng + ?Sized>(
    min_duration: f64,
    max_duration: f64,
    num_samples: usize,
    rng: &mut R,
) -> Vec<f64> {
    let duration = min_duration + (max_duration - min_duration) * rng.r#gen::<f64>();
    let start = (1.0 - duration) * rng.r#gen::<f64>();
    linspace(start, start + duration, num_samples)
}

/// `count` evenly spaced values from `start` to `end` inclusive, clamped to
/// `[0, 1]`. A single value sits at `start`.
fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start.clamp(0.0, 1.0)],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| {
                    let value = if i == count - 1 {
                        end
                    } else {
                        start + step * i as f64
                    };
                    value.clamp(0.0, 1.0)
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn config(shift: (u32, u32), durations: (f64, f64), samples: usize) -> SamplerConfig {
        SamplerConfig::new((640, 480), shift, durations, samples)
    }

    fn assert_non_decreasing<T: PartialOrd + std::fmt::Debug>(values: &[T]) {
        for pair in values.windows(2) {
            assert!(pair[0] <= pair[1], "not sorted: {:?}", values);
        }
    }

    #[test]
    fn test_full_duration_scenario() {
        let cfg = config((100, 100), (1.0, 1.0), 5);
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let sampler = FrameSampler::new(&cfg, &mut rng).unwrap();
            let (y1, y2, x1, x2) = sampler.crop_rect().as_tuple();

            assert!(x1 <= 100 && y1 <= 100);
            assert_eq!(y2, y1 + 380);
            assert_eq!(x2, x1 + 540);
            assert_eq!(
                sampler.norm_sample_positions(),
                &[0.0, 0.25, 0.5, 0.75, 1.0]
            );
        }
    }

    #[test]
    fn test_disable_random_shift_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut sampler = FrameSampler::new(&config((100, 100), (0.25, 1.0), 15), &mut rng).unwrap();

        sampler.disable_random_shift();
        let first = sampler.crop_rect();
        sampler.disable_random_shift();

        assert_eq!(sampler.crop_rect(), first);
        assert_eq!(first.as_tuple(), (50, 430, 50, 590));
        assert_eq!(sampler.get_xy_shift(), (0, 0));
        assert_eq!(sampler.crop_mode(), CropMode::Centered);
    }

    #[test]
    fn test_disable_random_sample_timing_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut sampler = FrameSampler::new(&config((10, 10), (0.1, 0.2), 9), &mut rng).unwrap();
        assert_eq!(sampler.timing_mode(), TimingMode::Randomized);

        sampler.disable_random_sample_timing();
        let first = sampler.norm_sample_positions().to_vec();
        sampler.disable_random_sample_timing();

        assert_eq!(sampler.norm_sample_positions(), first.as_slice());
        assert_eq!(first.len(), 9);
        assert_eq!(first[0], 0.0);
        assert_eq!(first[8], 1.0);
        assert_eq!(first[4], 0.5);
        assert_eq!(sampler.duration_bounds(), (1.0, 1.0));
        assert_eq!(sampler.timing_mode(), TimingMode::FullDuration);
    }

    #[test]
    fn test_random_draws_stay_in_bounds() {
        let cfg = config((37, 5), (0.0, 1.0), 7);
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..500 {
            let sampler = FrameSampler::new(&cfg, &mut rng).unwrap();
            let rect = sampler.crop_rect();

            assert!(rect.x1 <= 37 && rect.y1 <= 5);
            assert_eq!(rect.width(), 640 - 37);
            assert_eq!(rect.height(), 480 - 5);
            assert!(rect.x2 <= 640 && rect.y2 <= 480);

            let positions = sampler.norm_sample_positions();
            assert_eq!(positions.len(), 7);
            assert!(positions.iter().all(|p| (0.0..=1.0).contains(p)));
            assert_non_decreasing(positions);
        }
    }

    #[test]
    fn test_window_respects_duration_bounds() {
        // Bounds given in reverse order are sorted.
        let cfg = config((0, 0), (0.5, 0.25), 4);
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            let sampler = FrameSampler::new(&cfg, &mut rng).unwrap();
            assert_eq!(sampler.duration_bounds(), (0.25, 0.5));

            let positions = sampler.norm_sample_positions();
            let span = positions[3] - positions[0];
            assert!(span >= 0.25 - 1e-9 && span <= 0.5 + 1e-9, "span {span}");
        }
    }

    #[test]
    fn test_zero_shift_uses_whole_frame() {
        let mut rng = StdRng::seed_from_u64(0);
        let sampler = FrameSampler::new(&config((0, 0), (1.0, 1.0), 3), &mut rng).unwrap();
        assert_eq!(sampler.crop_rect().as_tuple(), (0, 480, 0, 640));
        assert_eq!(sampler.get_xy_shift(), (0, 0));
    }

    #[test]
    fn test_xy_shift_relative_to_center() {
        let mut rng = StdRng::seed_from_u64(21);
        let sampler = FrameSampler::new(&config((100, 40), (1.0, 1.0), 2), &mut rng).unwrap();
        let rect = sampler.crop_rect();
        assert_eq!(
            sampler.get_xy_shift(),
            (i64::from(rect.x1) - 50, i64::from(rect.y1) - 20)
        );
    }

    #[test]
    fn test_frame_indices_scenario() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut sampler = FrameSampler::new(&config((0, 0), (0.3, 0.6), 3), &mut rng).unwrap();
        sampler.disable_random_sample_timing();

        assert_eq!(sampler.norm_sample_positions(), &[0.0, 0.5, 1.0]);
        assert_eq!(sampler.get_frame_indices(101), vec![0, 50, 100]);
    }

    #[test]
    fn test_frame_indices_bounds_and_order() {
        let mut rng = StdRng::seed_from_u64(8);
        for total in [1_u64, 2, 3, 10, 1000] {
            for _ in 0..50 {
                let sampler =
                    FrameSampler::new(&config((0, 0), (0.0, 1.0), 25), &mut rng).unwrap();
                let indices = sampler.get_frame_indices(total);
                assert_eq!(indices.len(), 25);
                assert!(indices.iter().all(|&i| i < total));
                assert_non_decreasing(&indices);
            }
        }
    }

    #[test]
    fn test_frame_indices_keep_duplicates() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut sampler = FrameSampler::new(&config((0, 0), (1.0, 1.0), 10), &mut rng).unwrap();
        sampler.disable_random_sample_timing();
        assert_eq!(sampler.get_frame_indices(3), vec![0, 0, 0, 1, 1, 1, 1, 2, 2, 2]);
        assert!(sampler.get_frame_indices(0).is_empty());
    }

    #[test]
    fn test_frame_indices_round_half_to_even() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut sampler = FrameSampler::new(&config((0, 0), (1.0, 1.0), 3), &mut rng).unwrap();
        sampler.disable_random_sample_timing();
        // 0.5 * 4 = 2, 0.5 * 5 = 2.5 -> 2, 0.5 * 3 = 1.5 -> 2
        assert_eq!(sampler.get_frame_indices(5), vec![0, 2, 4]);
        assert_eq!(sampler.get_frame_indices(6), vec![0, 2, 5]);
        assert_eq!(sampler.get_frame_indices(4), vec![0, 2, 3]);
    }

    #[test]
    fn test_single_sample() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut sampler = FrameSampler::new(&config((0, 0), (0.2, 0.4), 1), &mut rng).unwrap();
        assert_eq!(sampler.norm_sample_positions().len(), 1);

        sampler.disable_random_sample_timing();
        assert_eq!(sampler.norm_sample_positions(), &[0.0]);
    }

    #[test]
    fn test_same_seed_same_sampler() {
        let cfg = config((100, 100), (0.25, 1.0), 15);
        let a = FrameSampler::new(&cfg, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = FrameSampler::new(&cfg, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let mut rng = StdRng::seed_from_u64(0);
        let too_much_shift = SamplerConfig::new((64, 48), (64, 0), (1.0, 1.0), 3);
        assert!(matches!(
            FrameSampler::new(&too_much_shift, &mut rng),
            Err(CoreError::InvalidConfig(_))
        ));

        let no_samples = SamplerConfig::new((64, 48), (0, 0), (1.0, 1.0), 0);
        assert!(FrameSampler::new(&no_samples, &mut rng).is_err());
    }

    #[test]
    fn test_crop_rejects_wrong_frame_size() {
        let mut rng = StdRng::seed_from_u64(0);
        let sampler =
            FrameSampler::new(&SamplerConfig::new((8, 6), (2, 2), (1.0, 1.0), 3), &mut rng)
                .unwrap();

        let good = Frame::filled(8, 6, &[1, 2, 3]);
        let cropped = sampler.crop(&good).unwrap();
        assert_eq!(cropped.shape(), (6, 4, 3));

        let bad = Frame::filled(6, 8, &[1, 2, 3]);
        assert!(sampler.crop(&bad).is_err());
    }
}
