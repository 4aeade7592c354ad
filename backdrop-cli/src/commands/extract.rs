//! Implementation of the background extraction run.
//!
//! Resolves the video, probes it, drives `backdrop-core` to build the median
//! backgrounds and saves them after confirmation.

use crate::cli::Cli;
use crate::error::{CliErrorContext, CliResult};
use crate::terminal;

use backdrop_core::{
    BackgroundGenerator, BackgroundRun, CoreError, FfmpegFrameReader, FrameReader,
    format_duration, save_backgrounds,
};
use backdrop_core::utils::get_filename_safe;

use rand::SeedableRng;
use rand::rngs::StdRng;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use log::{debug, info, warn};

/// How a run ended without an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractOutcome {
    /// Backgrounds were written to this folder
    Saved(PathBuf),
    /// The user declined to save
    Discarded,
    /// No video was given
    Quit,
    /// Interrupted before any background was finished
    Cancelled,
}

/// Picks the video from the argument, or asks for it.
///
/// `Ok(None)` means the user gave no video and the run should quit.
pub fn resolve_video<F>(arg: Option<&Path>, ask: F) -> CliResult<Option<PathBuf>>
where
    F: FnOnce() -> io::Result<Option<String>>,
{
    let video = match arg {
        Some(path) => path.to_path_buf(),
        None => {
            let answer = ask().cli_context("Failed to read video path")?;
            match answer.as_deref().map(str::trim) {
                Some(path) if !path.is_empty() => PathBuf::from(path),
                _ => return Ok(None),
            }
        }
    };

    if !video.is_file() {
        return Err(CoreError::VideoNotFound(video));
    }
    Ok(Some(video))
}

/// Installs a Ctrl-C handler that raises the returned flag.
fn install_cancel_handler() -> Arc<AtomicBool> {
    let cancel = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancel);
    if let Err(e) = ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
    }) {
        warn!("Could not install Ctrl-C handler: {}", e);
    }
    cancel
}

/// Answer to the save question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveDecision {
    Save,
    Declined,
    /// Ctrl-C was pressed while the question was open
    Interrupted,
}

/// Asks whether to save, treating a Ctrl-C during the question as a refusal.
///
/// The flag is cleared first so an interrupt from the run itself does not
/// count against the answer.
pub fn decide_save<F>(cancel: &AtomicBool, ask: F) -> SaveDecision
where
    F: FnOnce() -> bool,
{
    cancel.store(false, Ordering::SeqCst);
    let accepted = ask();
    if cancel.load(Ordering::SeqCst) {
        SaveDecision::Interrupted
    } else if accepted {
        SaveDecision::Save
    } else {
        SaveDecision::Declined
    }
}

/// Prints one line per variant and returns how many succeeded.
fn print_summary(run: &BackgroundRun) -> usize {
    terminal::print_section("Summary");
    for background in run.backgrounds() {
        let (x, y) = background.xy_shift;
        terminal::print_status(
            &format!("({x}, {y})"),
            &format!(
                "{}/{} samples, crop {}",
                background.samples_used, background.samples_attempted, background.crop_rect
            ),
            background.samples_used < background.samples_attempted,
        );
    }
    for (variant, err) in run.failures() {
        terminal::print_error(&format!("Variant {variant}: {err}"));
    }
    run.backgrounds().count()
}

/// Runs a full extraction for the parsed arguments.
pub fn run_extract(cli: &Cli) -> CliResult<ExtractOutcome> {
    let start_time = Instant::now();
    let config = cli.core_config();
    config.validate()?;

    let Some(video) = resolve_video(cli.video.as_deref(), || {
        terminal::prompt_line("Video to process (empty to quit): ")
    })?
    else {
        terminal::print_info("No video given, quitting.");
        return Ok(ExtractOutcome::Quit);
    };

    // --- Probe ---
    terminal::print_section("Video");
    let mut reader = FfmpegFrameReader::open(&video)?;
    let info = reader.info().clone();
    terminal::print_status("File", &get_filename_safe(&video)?, true);
    terminal::print_status("Resolution", &format!("{}x{}", info.width, info.height), false);
    terminal::print_status("Frame rate", &format!("{:.3} fps", info.frame_rate), false);
    terminal::print_status("Frames", &info.total_frames.to_string(), false);
    if let Some(duration) = info.duration_secs {
        terminal::print_status("Duration", &format_duration(duration), false);
    }

    // --- Plan ---
    let seed = config.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    let sampler_config = config.sampler_config(reader.dimensions());
    let generator = BackgroundGenerator::new(config.num_outputs, &sampler_config, &mut rng)?;
    debug!("Sampler config: {:?}", sampler_config);

    terminal::print_section("Sampling");
    terminal::print_status("Backgrounds", &config.num_outputs.to_string(), false);
    terminal::print_status("Samples each", &config.num_samples.to_string(), false);
    terminal::print_status(
        "Max shift",
        &format!("{}x{}", config.max_x_shift, config.max_y_shift),
        false,
    );
    terminal::print_status("Seed", &seed.to_string(), false);

    // --- Run ---
    let cancel = install_cancel_handler();
    let run = generator.run(&mut reader, &cancel);
    let succeeded = print_summary(&run);

    if run.cancelled {
        terminal::print_warning(&format!(
            "Interrupted; {succeeded} finished background(s) kept"
        ));
        if succeeded == 0 {
            return Ok(ExtractOutcome::Cancelled);
        }
    }
    if succeeded == 0 {
        return Err(CoreError::OperationFailed(
            "No background could be generated".to_string(),
        ));
    }

    // --- Save ---
    if !cli.yes {
        match decide_save(&cancel, || terminal::confirm("Save results?")) {
            SaveDecision::Save => {}
            SaveDecision::Declined => {
                terminal::print_info("Results discarded.");
                return Ok(ExtractOutcome::Discarded);
            }
            SaveDecision::Interrupted => {
                terminal::print_warning("Save cancelled");
                return Ok(ExtractOutcome::Discarded);
            }
        }
    }

    let folder = save_backgrounds(
        &config.output_dir,
        &video,
        run.backgrounds(),
        &config.image_extension,
    )
    .cli_with_context(|| format!("Failed to save backgrounds for {}", video.display()))?;

    terminal::print_success(&format!(
        "Saved {} background(s) to {}",
        succeeded,
        folder.display()
    ));
    info!(
        "Finished in {} at {}",
        format_duration(start_time.elapsed().as_secs_f64()),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    Ok(ExtractOutcome::Saved(folder))
}
