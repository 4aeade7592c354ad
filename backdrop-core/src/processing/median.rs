//! Per-pixel median reduction over a stack of equally sized frames.
//!
//! Uses `select_nth_unstable` for an O(n) median per channel value and
//! processes output rows in parallel once the image is large enough.

use crate::error::{CoreError, CoreResult};
use crate::frame::Frame;
use rayon::prelude::*;

/// Images with at least this many pixels are reduced row-parallel.
const PARALLEL_PIXEL_THRESHOLD: usize = 256 * 256;

/// Stacks frames by taking the median of every channel value.
///
/// Odd stacks take the middle value. Even stacks average the two middle
/// values and round half to even. Results are clamped to `0..=255`.
pub fn median_stack(frames: &[Frame]) -> CoreResult<Frame> {
    let first = frames.first().ok_or(CoreError::EmptySampleSet)?;
    let shape = first.shape();

    if let Some(other) = frames.iter().find(|f| f.shape() != shape) {
        let (w, h, c) = other.shape();
        return Err(CoreError::FrameMismatch {
            expected: format!("{}x{}x{}", shape.0, shape.1, shape.2),
            actual: format!("{w}x{h}x{c}"),
        });
    }

    let (width, height, channels) = shape;
    if frames.len() == 1 {
        return Ok(first.clone());
    }

    let row_len = width as usize * channels as usize;
    let mut output = vec![0u8; row_len * height as usize];
    if row_len == 0 {
        return Frame::new(width, height, channels, output);
    }

    let reduce_row = |(row, out_row): (usize, &mut [u8])| {
        let mut values = vec![0u8; frames.len()];
        let offset = row * row_len;
        for (col, out) in out_row.iter_mut().enumerate() {
            for (value, frame) in values.iter_mut().zip(frames) {
                *value = frame.data()[offset + col];
            }
            *out = compute_median(&mut values);
        }
    };

    if width as usize * height as usize >= PARALLEL_PIXEL_THRESHOLD {
        output
            .par_chunks_mut(row_len)
            .enumerate()
            .for_each(reduce_row);
    } else {
        output.chunks_mut(row_len).enumerate().for_each(reduce_row);
    }

    Frame::new(width, height, channels, output)
}

fn compute_median(values: &mut [u8]) -> u8 {
    let n = values.len();
    let mid = n / 2;
    let (_, upper, _) = values.select_nth_unstable(mid);
    let upper = *upper;
    if n % 2 == 1 {
        return upper;
    }
    let lower = values[..mid].iter().copied().max().unwrap_or(upper);
    let mean = (f64::from(lower) + f64::from(upper)) / 2.0;
    mean.round_ties_even().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(values: &[u8], width: u32) -> Frame {
        Frame::new(width, values.len() as u32 / width, 1, values.to_vec()).unwrap()
    }

    #[test]
    fn test_identical_frames_unchanged() {
        let frame = Frame::filled(5, 4, &[12, 200, 77]);
        let stacked = median_stack(&[frame.clone(), frame.clone(), frame.clone()]).unwrap();
        assert_eq!(stacked, frame);
    }

    #[test]
    fn test_odd_count_takes_middle() {
        let frames = [
            gray(&[1, 9, 250, 0], 2),
            gray(&[5, 3, 10, 0], 2),
            gray(&[3, 7, 100, 255], 2),
        ];
        let stacked = median_stack(&frames).unwrap();
        assert_eq!(stacked.data(), &[3, 7, 100, 0]);
    }

    #[test]
    fn test_even_count_averages_and_rounds_half_to_even() {
        let frames = [gray(&[1, 2, 0, 254], 4), gray(&[2, 4, 255, 255], 4)];
        let stacked = median_stack(&frames).unwrap();
        // 1.5 -> 2, 3 -> 3, 127.5 -> 128, 254.5 -> 254
        assert_eq!(stacked.data(), &[2, 3, 128, 254]);
    }

    #[test]
    fn test_even_count_four_frames() {
        let frames = [
            gray(&[10], 1),
            gray(&[40], 1),
            gray(&[20], 1),
            gray(&[31], 1),
        ];
        // middle values 20 and 31 -> 25.5 -> 26
        assert_eq!(median_stack(&frames).unwrap().data(), &[26]);
    }

    #[test]
    fn test_single_frame_passthrough() {
        let frame = gray(&[4, 8, 15, 16, 23, 42], 3);
        assert_eq!(median_stack(std::slice::from_ref(&frame)).unwrap(), frame);
    }

    #[test]
    fn test_empty_is_error() {
        assert!(matches!(median_stack(&[]), Err(CoreError::EmptySampleSet)));
    }

    #[test]
    fn test_shape_mismatch_is_error() {
        let frames = [Frame::filled(2, 2, &[0, 0, 0]), Frame::filled(2, 3, &[0, 0, 0])];
        assert!(matches!(
            median_stack(&frames),
            Err(CoreError::FrameMismatch { .. })
        ));
    }

    #[test]
    fn test_large_image_uses_parallel_path() {
        let a = Frame::filled(300, 300, &[10, 20, 30]);
        let b = Frame::filled(300, 300, &[50, 60, 70]);
        let c = Frame::filled(300, 300, &[30, 40, 50]);
        let stacked = median_stack(&[a, b, c.clone()]).unwrap();
        assert_eq!(stacked, c);
    }
}
