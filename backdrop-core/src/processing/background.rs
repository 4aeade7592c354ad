// ============================================================================
// backdrop-core/src/processing/background.rs
// ============================================================================
//
// BACKGROUND GENERATION: Batch Driver for Median Backgrounds
//
// Drives a list of FrameSamplers against one FrameReader and reduces each
// sampler's cropped frames to a median background.
//
// WORKFLOW (per sampler, strictly in order):
// 1. Resolve frame indices against the reader's total frame count
// 2. Read each frame; unreadable frames are logged and skipped
// 3. Crop each frame with the sampler's crop window
// 4. Reduce the cropped frames with a per-pixel median
//
// A sampler with no readable frames fails on its own without stopping the
// batch. Cancellation stops the batch before the next frame read; finished
// variants are kept and the in-progress one is dropped.

// ---- Internal crate imports ----
use crate::config::SamplerConfig;
use crate::error::{CoreError, CoreResult};
use crate::external::FrameReader;
use crate::frame::Frame;
use crate::processing::median::median_stack;
use crate::progress_reporting;
use crate::sampling::{CropRect, FrameSampler};

// ---- External crate imports ----
use rand::Rng;

// ---- Standard library imports ----
use std::sync::atomic::{AtomicBool, Ordering};

// ============================================================================
// RESULT TYPES
// ============================================================================

/// Median background produced by one sampler.
#[derive(Debug, Clone, PartialEq)]
pub struct Background {
    /// Position of the producing sampler (0 is the centered reference)
    pub variant: usize,
    /// Crop offset relative to a centered crop, used as the output label
    pub xy_shift: (i64, i64),
    /// Crop window the samples were cut with
    pub crop_rect: CropRect,
    /// Number of frames that were read successfully
    pub samples_used: usize,
    /// Number of frame reads attempted
    pub samples_attempted: usize,
    /// The median image, sized like the crop window
    pub image: Frame,
}

/// Outcome of a [`BackgroundGenerator::run`].
#[derive(Debug)]
pub struct BackgroundRun {
    /// One entry per finished sampler, in sampler order
    pub outcomes: Vec<CoreResult<Background>>,
    /// Whether the run was interrupted before every sampler finished
    pub cancelled: bool,
}

impl BackgroundRun {
    /// Successfully produced backgrounds, in sampler order.
    pub fn backgrounds(&self) -> impl Iterator<Item = &Background> {
        self.outcomes.iter().filter_map(|o| o.as_ref().ok())
    }

    /// Variants that failed, with their position.
    pub fn failures(&self) -> impl Iterator<Item = (usize, &CoreError)> {
        self.outcomes
            .iter()
            .enumerate()
            .filter_map(|(i, o)| o.as_ref().err().map(|e| (i, e)))
    }

    /// Consumes the run, keeping only the successful backgrounds.
    #[must_use]
    pub fn into_backgrounds(self) -> Vec<Background> {
        self.outcomes.into_iter().filter_map(Result::ok).collect()
    }
}

// ============================================================================
// GENERATOR
// ============================================================================

/// Builds one background per sampler from a shared video source.
///
/// # Examples
///
/// ```rust
/// use backdrop_core::{BackgroundGenerator, SamplerConfig};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let config = SamplerConfig::new((1920, 1080), (100, 100), (0.25, 1.0), 15);
/// let mut rng = StdRng::seed_from_u64(7);
/// let generator = BackgroundGenerator::new(5, &config, &mut rng).unwrap();
///
/// assert_eq!(generator.samplers().len(), 5);
/// assert_eq!(generator.samplers()[0].get_xy_shift(), (0, 0));
/// ```
#[derive(Debug, Clone)]
pub struct BackgroundGenerator {
    samplers: Vec<FrameSampler>,
}

impl BackgroundGenerator {
    /// Creates `count` independently randomized samplers and turns the first
    /// into the centered, full-duration reference.
    pub fn new<R: Rng + ?Sized>(
        count: usize,
        config: &SamplerConfig,
        rng: &mut R,
    ) -> CoreResult<Self> {
        if count == 0 {
            return Err(CoreError::InvalidConfig(
                "number of outputs must be at least 1".to_string(),
            ));
        }

        let mut samplers = (0..count)
            .map(|_| FrameSampler::new(config, rng))
            .collect::<CoreResult<Vec<_>>>()?;

        let reference = &mut samplers[0];
        reference.disable_random_shift();
        reference.disable_random_sample_timing();

        Ok(Self { samplers })
    }

    /// Wraps samplers that were configured elsewhere, as is.
    #[must_use]
    pub fn from_samplers(samplers: Vec<FrameSampler>) -> Self {
        Self { samplers }
    }

    #[must_use]
    pub fn samplers(&self) -> &[FrameSampler] {
        &self.samplers
    }

    /// Produces one background per sampler, in order.
    ///
    /// `cancel` is polled before every frame read.
    pub fn run<F: FrameReader + ?Sized>(&self, reader: &mut F, cancel: &AtomicBool) -> BackgroundRun {
        let total_frames = reader.total_frames();
        let count = self.samplers.len();
        let mut outcomes = Vec::with_capacity(count);

        log::info!(
            "Generating {} background images from {} frames",
            count,
            total_frames
        );
        progress_reporting::info(&format!(
            "Sampling {count} background(s) from {total_frames} frames"
        ));

        for (variant, sampler) in self.samplers.iter().enumerate() {
            let (x_shift, y_shift) = sampler.get_xy_shift();
            progress_reporting::processing(&format!(
                "Background {}/{} (shift {}, {})",
                variant + 1,
                count,
                x_shift,
                y_shift
            ));

            match generate_one(variant, sampler, reader, total_frames, cancel) {
                Some(outcome) => {
                    match &outcome {
                        Ok(background) => progress_reporting::success(&format!(
                            "Background {} built from {}/{} samples",
                            variant + 1,
                            background.samples_used,
                            background.samples_attempted
                        )),
                        Err(e) => {
                            log::error!("Background {} failed: {}", variant, e);
                            progress_reporting::error(&e.to_string());
                        }
                    }
                    outcomes.push(outcome);
                }
                None => {
                    log::warn!("Cancelled during background {}", variant);
                    return BackgroundRun {
                        outcomes,
                        cancelled: true,
                    };
                }
            }
        }

        BackgroundRun {
            outcomes,
            cancelled: false,
        }
    }
}

/// Reads, crops and reduces one sampler's frames. `None` when cancelled.
fn generate_one<F: FrameReader + ?Sized>(
    variant: usize,
    sampler: &FrameSampler,
    reader: &mut F,
    total_frames: u64,
    cancel: &AtomicBool,
) -> Option<CoreResult<Background>> {
    let indices = sampler.get_frame_indices(total_frames);
    log::debug!("Background {} frame indices: {:?}", variant, indices);

    let mut cropped = Vec::with_capacity(indices.len());
    for (done, &index) in indices.iter().enumerate() {
        if cancel.load(Ordering::SeqCst) {
            progress_reporting::clear_progress();
            return None;
        }

        let frame = reader
            .read_frame(index)
            .and_then(|frame| sampler.crop(&frame));
        match frame {
            Ok(frame) => cropped.push(frame),
            Err(e) => {
                log::warn!("Error reading frame @ {}: {}. Skipping...", index, e);
                progress_reporting::warning(&format!("Skipped frame {index}: {e}"));
            }
        }
        progress_reporting::sample_progress(done + 1, indices.len());
    }
    progress_reporting::finish_progress();

    if cropped.is_empty() {
        return Some(Err(CoreError::AllSamplesFailed {
            variant,
            attempted: indices.len(),
        }));
    }

    let samples_used = cropped.len();
    Some(median_stack(&cropped).map(|image| Background {
        variant,
        xy_shift: sampler.get_xy_shift(),
        crop_rect: sampler.crop_rect(),
        samples_used,
        samples_attempted: indices.len(),
        image,
    }))
}
