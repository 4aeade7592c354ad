// ============================================================================
// backdrop-core/src/external/frame_reader.rs
// ============================================================================
//
// FFMPEG FRAME READER: Random Access Frame Decoding via FFmpeg
//
// Reads single frames by index. Each read seeks the input to the frame's
// timestamp and asks ffmpeg for exactly one RGB24 frame on stdout:
//
//   ffmpeg -ss <index / fps> -i <video> -an -sn -frames:v 1 -f rawvideo -pix_fmt rgb24 -
//
// The ffmpeg child is always waited on before a read returns, so no process
// outlives the read that started it.

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};
use crate::external::ffmpeg_executor::{FfmpegProcess, FfmpegSpawner, SidecarSpawner};
use crate::external::ffprobe_executor::{VideoInfo, probe_video};
use crate::external::{FrameReader, check_dependency};
use crate::frame::Frame;

// ---- External crate imports ----
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};

// ---- Standard library imports ----
use std::path::{Path, PathBuf};

/// Number of channels in the `rgb24` frames requested from ffmpeg.
const RGB_CHANNELS: u8 = 3;

/// [`FrameReader`] that decodes frames with an ffmpeg child process.
pub struct FfmpegFrameReader<S: FfmpegSpawner = SidecarSpawner> {
    spawner: S,
    video_path: PathBuf,
    info: VideoInfo,
}

impl FfmpegFrameReader<SidecarSpawner> {
    /// Probes `video_path` and prepares to read frames from it.
    ///
    /// Fails before any decoding if ffmpeg is missing or the video cannot
    /// be probed.
    pub fn open(video_path: &Path) -> CoreResult<Self> {
        let info = probe_video(video_path)?;
        check_dependency("ffmpeg")?;
        Ok(Self::with_spawner(SidecarSpawner, video_path, info))
    }
}

impl<S: FfmpegSpawner> FfmpegFrameReader<S> {
    /// Builds a reader from already known video info and a custom spawner.
    pub fn with_spawner(spawner: S, video_path: &Path, info: VideoInfo) -> Self {
        Self {
            spawner,
            video_path: video_path.to_path_buf(),
            info,
        }
    }

    #[must_use]
    pub fn info(&self) -> &VideoInfo {
        &self.info
    }

    #[must_use]
    pub fn video_path(&self) -> &Path {
        &self.video_path
    }

    /// Timestamp, in seconds, at which frame `index` starts.
    #[must_use]
    pub fn frame_timestamp(&self, index: u64) -> f64 {
        index as f64 / self.info.frame_rate
    }

    fn build_command(&self, index: u64) -> FfmpegCommand {
        let mut cmd = FfmpegCommand::new();
        cmd.args(["-ss", &format!("{:.6}", self.frame_timestamp(index))]);
        cmd.input(self.video_path.to_string_lossy().as_ref() as &str);
        cmd.args(["-an", "-sn", "-frames:v", "1"]);
        cmd.rawvideo();
        cmd
    }
}

impl<S: FfmpegSpawner> FrameReader for FfmpegFrameReader<S> {
    fn total_frames(&self) -> u64 {
        self.info.total_frames
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.info.width, self.info.height)
    }

    fn read_frame(&mut self, index: u64) -> CoreResult<Frame> {
        let read_error = |reason: String| CoreError::FrameRead { index, reason };

        if index >= self.info.total_frames {
            return Err(read_error(format!(
                "index past the last frame ({})",
                self.info.total_frames.saturating_sub(1)
            )));
        }

        let cmd = self.build_command(index);
        let mut process = self.spawner.spawn(cmd)?;

        let mut decoded = None;
        let mut last_error: Option<String> = None;
        let events_result = process.handle_events(|event| {
            match event {
                FfmpegEvent::OutputFrame(frame) if decoded.is_none() => {
                    decoded = Some(frame);
                }
                FfmpegEvent::Error(message)
                | FfmpegEvent::Log(LogLevel::Error | LogLevel::Fatal, message) => {
                    log::trace!("ffmpeg error while reading frame {}: {}", index, message);
                    last_error = Some(message);
                }
                _ => {}
            }
            Ok(())
        });
        let status = process.wait()?;
        events_result?;

        match decoded {
            Some(frame) => {
                if !status.success() {
                    log::debug!(
                        "ffmpeg exited with {} after producing frame {}",
                        status,
                        index
                    );
                }
                Frame::new(frame.width, frame.height, RGB_CHANNELS, frame.data)
            }
            None => Err(read_error(last_error.unwrap_or_else(|| {
                format!("ffmpeg produced no frame (exit status {status})")
            }))),
        }
    }
}
