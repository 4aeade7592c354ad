//! Owned pixel buffers for decoded video frames and background images.
//!
//! A [`Frame`] is a row-major, interleaved 8-bit image. Frames decoded by
//! ffmpeg are RGB (3 channels); backgrounds inherit the channel count of the
//! frames they were reduced from.

use crate::error::{CoreError, CoreResult};
use crate::sampling::CropRect;

/// Row-major, channel-interleaved 8-bit image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<u8>,
}

impl Frame {
    /// Wraps raw pixel data, checking that its length matches the shape.
    pub fn new(width: u32, height: u32, channels: u8, data: Vec<u8>) -> CoreResult<Self> {
        let expected = width as usize * height as usize * channels as usize;
        if channels == 0 || data.len() != expected {
            return Err(CoreError::FrameMismatch {
                expected: format!("{width}x{height}x{channels} ({expected} bytes)"),
                actual: format!("{} bytes", data.len()),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Creates a frame where every pixel has the given channel values.
    #[must_use]
    pub fn filled(width: u32, height: u32, pixel: &[u8]) -> Self {
        let data = pixel
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * pixel.len())
            .collect();
        Self {
            width,
            height,
            channels: pixel.len() as u8,
            data,
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn channels(&self) -> u8 {
        self.channels
    }

    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[must_use]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// `(width, height, channels)`
    #[must_use]
    pub fn shape(&self) -> (u32, u32, u8) {
        (self.width, self.height, self.channels)
    }

    /// Channel values of the pixel at `(x, y)`, if inside the frame.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let ch = self.channels as usize;
        let start = (y as usize * self.width as usize + x as usize) * ch;
        Some(&self.data[start..start + ch])
    }

    /// Copies out the region covered by `rect`.
    ///
    /// Fails if the rectangle reaches past the frame edges.
    pub fn crop(&self, rect: &CropRect) -> CoreResult<Frame> {
        if rect.x2 > self.width || rect.y2 > self.height || rect.x1 > rect.x2 || rect.y1 > rect.y2 {
            return Err(CoreError::FrameMismatch {
                expected: format!("crop {rect} inside frame"),
                actual: format!("{}x{} frame", self.width, self.height),
            });
        }

        let ch = self.channels as usize;
        let row_len = self.width as usize * ch;
        if row_len == 0 || rect.width() == 0 {
            return Ok(Frame {
                width: rect.width(),
                height: rect.height(),
                channels: self.channels,
                data: Vec::new(),
            });
        }
        let (x1, x2) = (rect.x1 as usize * ch, rect.x2 as usize * ch);

        let mut data = Vec::with_capacity(rect.width() as usize * rect.height() as usize * ch);
        for row in self
            .data
            .chunks_exact(row_len)
            .skip(rect.y1 as usize)
            .take(rect.height() as usize)
        {
            data.extend_from_slice(&row[x1..x2]);
        }

        Ok(Frame {
            width: rect.width(),
            height: rect.height(),
            channels: self.channels,
            data,
        })
    }

    /// Converts into an `image` buffer suitable for encoding to disk.
    pub fn into_dynamic_image(self) -> CoreResult<image::DynamicImage> {
        let (width, height, channels) = self.shape();
        let mismatch = || CoreError::FrameMismatch {
            expected: "1, 3 or 4 channel image".to_string(),
            actual: format!("{channels} channels"),
        };
        let image = match channels {
            1 => image::GrayImage::from_raw(width, height, self.data)
                .map(image::DynamicImage::ImageLuma8),
            3 => image::RgbImage::from_raw(width, height, self.data)
                .map(image::DynamicImage::ImageRgb8),
            4 => image::RgbaImage::from_raw(width, height, self.data)
                .map(image::DynamicImage::ImageRgba8),
            _ => None,
        };
        image.ok_or_else(mismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> Frame {
        let mut data = Vec::new();
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[x as u8, y as u8, 7]);
            }
        }
        Frame::new(width, height, 3, data).unwrap()
    }

    #[test]
    fn test_new_rejects_wrong_length() {
        assert!(Frame::new(2, 2, 3, vec![0; 11]).is_err());
        assert!(Frame::new(2, 2, 0, vec![]).is_err());
        assert!(Frame::new(2, 2, 3, vec![0; 12]).is_ok());
    }

    #[test]
    fn test_crop_selects_region() {
        let frame = gradient(8, 6);
        let rect = CropRect { y1: 1, y2: 4, x1: 2, x2: 7 };
        let cropped = frame.crop(&rect).unwrap();

        assert_eq!(cropped.shape(), (5, 3, 3));
        assert_eq!(cropped.pixel(0, 0), Some(&[2, 1, 7][..]));
        assert_eq!(cropped.pixel(4, 2), Some(&[6, 3, 7][..]));
        assert_eq!(cropped.pixel(5, 0), None);
    }

    #[test]
    fn test_crop_out_of_bounds() {
        let frame = gradient(8, 6);
        let rect = CropRect { y1: 0, y2: 7, x1: 0, x2: 8 };
        assert!(frame.crop(&rect).is_err());
    }

    #[test]
    fn test_crop_zero_width_frame() {
        let frame = Frame::new(0, 4, 3, vec![]).unwrap();
        let rect = CropRect { y1: 1, y2: 3, x1: 0, x2: 0 };
        let cropped = frame.crop(&rect).unwrap();

        assert_eq!(cropped.shape(), (0, 2, 3));
        assert!(cropped.data().is_empty());
    }

    #[test]
    fn test_filled_and_conversion() {
        let frame = Frame::filled(4, 3, &[10, 20, 30]);
        assert_eq!(frame.data().len(), 36);
        assert_eq!(frame.pixel(3, 2), Some(&[10, 20, 30][..]));

        let image = frame.into_dynamic_image().unwrap();
        assert_eq!((image.width(), image.height()), (4, 3));
    }
}
