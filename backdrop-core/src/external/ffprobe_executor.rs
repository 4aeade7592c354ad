//! FFprobe integration for video metadata lookup
//!
//! This module runs ffprobe on a video and extracts what frame sampling
//! needs: frame size, frame rate and total frame count.

use crate::error::{CoreError, CoreResult, command_failed_error, command_start_error};
use ffprobe::{FfProbeError, ffprobe};
use std::path::Path;

/// Properties of the first video stream of a file.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoInfo {
    /// Width of the decoded frames
    pub width: u32,
    /// Height of the decoded frames
    pub height: u32,
    /// Average frames per second
    pub frame_rate: f64,
    /// Duration in seconds, when known
    pub duration_secs: Option<f64>,
    /// Total number of frames in the video stream
    pub total_frames: u64,
}

/// Probes a video file for its size, frame rate and frame count.
///
/// The frame count comes from the stream's `nb_frames` when the container
/// records it and is estimated from `duration * fps` otherwise.
pub fn probe_video(input_path: &Path) -> CoreResult<VideoInfo> {
    if !input_path.exists() {
        return Err(CoreError::VideoNotFound(input_path.to_path_buf()));
    }

    log::debug!(
        "Running ffprobe (via crate) for video info on: {}",
        input_path.display()
    );
    let metadata = ffprobe(input_path).map_err(|err| {
        log::error!("ffprobe failed on {}: {:?}", input_path.display(), err);
        map_ffprobe_error(err, "video info")
    })?;

    let video_stream = metadata
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| {
            CoreError::VideoInfoError(format!(
                "No video stream found in {}",
                input_path.display()
            ))
        })?;

    let (width, height) = match (video_stream.width, video_stream.height) {
        (Some(w), Some(h)) if w > 0 && h > 0 => (w as u32, h as u32),
        (w, h) => {
            return Err(CoreError::VideoInfoError(format!(
                "Invalid dimensions in {}: width={:?}, height={:?}",
                input_path.display(),
                w,
                h
            )));
        }
    };

    let frame_rate = parse_frame_rate(&video_stream.avg_frame_rate)
        .or_else(|| parse_frame_rate(&video_stream.r_frame_rate))
        .ok_or_else(|| {
            CoreError::FfprobeParse(format!(
                "Failed to parse frame rate '{}' for {}",
                video_stream.avg_frame_rate,
                input_path.display()
            ))
        })?;

    let duration_secs = video_stream
        .duration
        .as_deref()
        .or(metadata.format.duration.as_deref())
        .and_then(|d| d.parse::<f64>().ok())
        .filter(|d| d.is_finite() && *d > 0.0);

    let total_frames =
        estimate_total_frames(video_stream.nb_frames.as_deref(), duration_secs, frame_rate)
            .ok_or_else(|| {
                CoreError::VideoInfoError(format!(
                    "Could not determine frame count for {}",
                    input_path.display()
                ))
            })?;

    let info = VideoInfo {
        width,
        height,
        frame_rate,
        duration_secs,
        total_frames,
    };
    log::debug!("Video info for {}: {:?}", input_path.display(), info);
    Ok(info)
}

/// Parses an ffprobe rate such as `"30000/1001"` or `"25"`.
///
/// Returns `None` for zero, negative or malformed rates (ffprobe reports
/// `"0/0"` when it does not know).
pub(crate) fn parse_frame_rate(rate: &str) -> Option<f64> {
    let value = match rate.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => rate.trim().parse().ok()?,
    };
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Frame count from `nb_frames`, falling back to `duration * fps`.
pub(crate) fn estimate_total_frames(
    nb_frames: Option<&str>,
    duration_secs: Option<f64>,
    frame_rate: f64,
) -> Option<u64> {
    if let Some(count) = nb_frames.and_then(|n| n.trim().parse::<u64>().ok()) {
        if count > 0 {
            return Some(count);
        }
    }
    let estimate = (duration_secs? * frame_rate).round();
    (estimate >= 1.0).then_some(estimate as u64)
}

fn map_ffprobe_error(err: FfProbeError, context: &str) -> CoreError {
    match err {
        FfProbeError::Io(io_err) => command_start_error(format!("ffprobe ({context})"), io_err),
        FfProbeError::Status(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            command_failed_error(format!("ffprobe ({context})"), output.status, stderr)
        }
        FfProbeError::Deserialize(err) => {
            CoreError::FfprobeParse(format!("ffprobe {context} output deserialization: {err}"))
        }
        _ => CoreError::FfprobeParse(format!("Unknown ffprobe error during {context}: {err:?}")),
    }
}
