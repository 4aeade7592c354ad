//! Crop rectangle used to cut a fixed-size window out of full frames.

use std::fmt;

/// Half-open pixel rectangle `[x1, x2) x [y1, y2)`.
///
/// Field order mirrors the `(y1, y2, x1, x2)` tuple used when slicing
/// frames row-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CropRect {
    pub y1: u32,
    pub y2: u32,
    pub x1: u32,
    pub x2: u32,
}

impl CropRect {
    /// Builds a rectangle from its top-left corner and size.
    #[must_use]
    pub fn from_origin(x1: u32, y1: u32, width: u32, height: u32) -> Self {
        Self {
            y1,
            y2: y1 + height,
            x1,
            x2: x1 + width,
        }
    }

    /// Centered window of `(video - max_shift)` size. Offsets round down.
    #[must_use]
    pub fn centered(video_wh: (u32, u32), max_shift_xy: (u32, u32)) -> Self {
        let (x1, y1) = centered_origin(max_shift_xy);
        Self::from_origin(
            x1,
            y1,
            video_wh.0 - max_shift_xy.0,
            video_wh.1 - max_shift_xy.1,
        )
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.x2 - self.x1
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.y2 - self.y1
    }

    /// `(y1, y2, x1, x2)`
    #[must_use]
    pub fn as_tuple(&self) -> (u32, u32, u32, u32) {
        (self.y1, self.y2, self.x1, self.x2)
    }
}

impl fmt::Display for CropRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}+{}+{}",
            self.width(),
            self.height(),
            self.x1,
            self.y1
        )
    }
}

/// Top-left corner of a centered crop for the given shift limits.
#[must_use]
pub fn centered_origin(max_shift_xy: (u32, u32)) -> (u32, u32) {
    (max_shift_xy.0 / 2, max_shift_xy.1 / 2)
}
