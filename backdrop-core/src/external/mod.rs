// ============================================================================
// backdrop-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with ffmpeg and ffprobe
//
// This module encapsulates everything that talks to the outside world while
// sampling: probing a video for its size and frame count, and decoding single
// frames by index. Frame access goes through the `FrameReader` trait so the
// background generator never depends on ffmpeg directly.
//
// KEY COMPONENTS:
// - FrameReader: Trait for random access to decoded frames
// - FfmpegSpawner / FfmpegProcess: Traits for running ffmpeg commands
// - FfmpegFrameReader: FrameReader that decodes frames with ffmpeg
// - probe_video: ffprobe-based metadata lookup
//
// DESIGN PHILOSOPHY:
// This module follows the dependency injection pattern, allowing consumers to
// provide their own implementations of the traits for testing or specialized
// behavior. The default implementations use the ffmpeg-sidecar and ffprobe crates.

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};
use crate::frame::Frame;

// ---- Standard library imports ----
use std::io;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Contains traits and implementations for executing ffmpeg commands
pub mod ffmpeg_executor;

/// Contains ffprobe-based video metadata lookup
pub mod ffprobe_executor;

/// Contains the ffmpeg-backed frame reader
pub mod frame_reader;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffmpeg_executor::{FfmpegProcess, FfmpegSpawner, SidecarProcess, SidecarSpawner};
pub use ffprobe_executor::{VideoInfo, probe_video};
pub use frame_reader::FfmpegFrameReader;

// ============================================================================
// FRAME ACCESS
// ============================================================================

/// Random access to the decoded frames of one video.
///
/// Only one read is active at a time; implementations may keep a single
/// positional cursor.
pub trait FrameReader {
    /// Total number of frames in the video.
    fn total_frames(&self) -> u64;

    /// Full frame size as `(width, height)`.
    fn dimensions(&self) -> (u32, u32);

    /// Decodes the frame at `index`.
    ///
    /// An error means this frame is unreadable; callers may skip it and keep
    /// reading other indices.
    fn read_frame(&mut self, index: u64) -> CoreResult<Frame>;
}

impl<T: FrameReader + ?Sized> FrameReader for &mut T {
    fn total_frames(&self) -> u64 {
        (**self).total_frames()
    }

    fn dimensions(&self) -> (u32, u32) {
        (**self).dimensions()
    }

    fn read_frame(&mut self, index: u64) -> CoreResult<Frame> {
        (**self).read_frame(index)
    }
}

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks if a required external command is available and executable.
///
/// Runs `<cmd_name> -version` with output discarded.
///
/// # Returns
///
/// * `Ok(())` - If the command could be started
/// * `Err(CoreError::DependencyNotFound)` - If the command is not found
/// * `Err(CoreError::CommandStart)` - If the command exists but fails to start
pub fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {}", cmd_name);
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{}' not found.", cmd_name);
            Err(CoreError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{}': {}", cmd_name, e);
            Err(CoreError::CommandStart(cmd_name.to_string(), e))
        }
    }
}
