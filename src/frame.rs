//! Borrowed frame handles.
//!
//! The host owns every pixel buffer. A [`RgbaFrameMut`] is an exclusive
//! borrow of one such buffer for the duration of a single filter call; it
//! guarantees four 8-bit channels per pixel and never resizes or reallocates
//! the underlying memory.

use std::str::FromStr;

use ndarray::{ArrayView3, ArrayViewMut3};

use crate::error::FilterError;

/// Channels per pixel of every frame the filter accepts.
pub const CHANNELS: usize = 4;

/// Byte order of the four channels of a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelLayout {
    /// Red, green, blue, alpha.
    #[default]
    Rgba,
    /// Blue, green, red, alpha.
    Bgra,
}

impl PixelLayout {
    /// Channel indices of red, green and blue within a pixel.
    #[inline]
    pub fn rgb_indices(self) -> [usize; 3] {
        match self {
            PixelLayout::Rgba => [0, 1, 2],
            PixelLayout::Bgra => [2, 1, 0],
        }
    }
}

impl FromStr for PixelLayout {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rgba" => Ok(PixelLayout::Rgba),
            "bgra" => Ok(PixelLayout::Bgra),
            _ => Err(FilterError::UnknownLayout(s.to_string())),
        }
    }
}

/// Byte length of a `width` x `height` frame, checked against a buffer of
/// `actual` bytes. Anything shorter or longer is rejected.
pub fn expected_len(width: usize, height: usize, actual: usize) -> Result<usize, FilterError> {
    let length_error = || FilterError::BufferLength {
        width,
        height,
        expected: width.saturating_mul(height).saturating_mul(CHANNELS),
        actual,
    };

    let expected = width
        .checked_mul(height)
        .and_then(|px| px.checked_mul(CHANNELS))
        .ok_or_else(length_error)?;
    if expected != actual {
        return Err(length_error());
    }
    Ok(expected)
}

/// Exclusive handle on a caller-owned (height, width, 4) frame.
#[derive(Debug)]
pub struct RgbaFrameMut<'a> {
    pixels: ArrayViewMut3<'a, u8>,
    layout: PixelLayout,
}

impl<'a> RgbaFrameMut<'a> {
    /// Wrap an existing array view. The view may be strided (e.g. a numpy
    /// slice) but must have exactly four channels.
    pub fn new(pixels: ArrayViewMut3<'a, u8>, layout: PixelLayout) -> Result<Self, FilterError> {
        let channels = pixels.dim().2;
        if channels != CHANNELS {
            return Err(FilterError::ChannelCount {
                expected: CHANNELS,
                actual: channels,
            });
        }
        Ok(Self { pixels, layout })
    }

    /// Wrap a flat, row-major byte buffer of `width * height * 4` bytes.
    pub fn from_slice(
        data: &'a mut [u8],
        width: usize,
        height: usize,
        layout: PixelLayout,
    ) -> Result<Self, FilterError> {
        let actual = data.len();
        expected_len(width, height, actual)?;

        let pixels = ArrayViewMut3::from_shape((height, width, CHANNELS), data).map_err(|_| {
            FilterError::BufferLength {
                width,
                height,
                expected: width.saturating_mul(height).saturating_mul(CHANNELS),
                actual,
            }
        })?;
        Ok(Self { pixels, layout })
    }

    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }

    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// True when the frame holds no pixels, the host's "no frame yet" signal.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn view(&self) -> ArrayView3<'_, u8> {
        self.pixels.view()
    }

    pub fn view_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        self.pixels.view_mut()
    }
}

/// Result of one filter call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The frame was empty; nothing was read or written.
    Skipped,
    /// The frame was overwritten with its filtered version.
    Filtered { width: usize, height: usize },
}

impl FrameOutcome {
    pub fn is_filtered(&self) -> bool {
        matches!(self, FrameOutcome::Filtered { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn test_layout_parse() {
        assert_eq!("rgba".parse::<PixelLayout>(), Ok(PixelLayout::Rgba));
        assert_eq!("BGRA".parse::<PixelLayout>(), Ok(PixelLayout::Bgra));
        assert_eq!(
            "argb".parse::<PixelLayout>(),
            Err(FilterError::UnknownLayout("argb".to_string()))
        );
    }

    #[test]
    fn test_rejects_three_channels() {
        let mut img = Array3::<u8>::zeros((4, 4, 3));
        let err = RgbaFrameMut::new(img.view_mut(), PixelLayout::Rgba).unwrap_err();
        assert_eq!(
            err,
            FilterError::ChannelCount {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_from_slice_checks_length() {
        let mut data = vec![0u8; 2 * 3 * 4 - 1];
        let err = RgbaFrameMut::from_slice(&mut data, 2, 3, PixelLayout::Rgba).unwrap_err();
        assert_eq!(
            err,
            FilterError::BufferLength {
                width: 2,
                height: 3,
                expected: 24,
                actual: 23
            }
        );
    }

    #[test]
    fn test_expected_len_rejects_longer_buffer() {
        assert_eq!(expected_len(2, 2, 16), Ok(16));
        assert_eq!(
            expected_len(2, 2, 19),
            Err(FilterError::BufferLength {
                width: 2,
                height: 2,
                expected: 16,
                actual: 19
            })
        );
        assert!(expected_len(usize::MAX, 2, 0).is_err());

        let mut data = vec![0u8; 19];
        assert!(RgbaFrameMut::from_slice(&mut data, 2, 2, PixelLayout::Rgba).is_err());
    }

    #[test]
    fn test_from_slice_dimensions() {
        let mut data = vec![0u8; 5 * 2 * 4];
        let frame = RgbaFrameMut::from_slice(&mut data, 5, 2, PixelLayout::Bgra).unwrap();
        assert_eq!(frame.width(), 5);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.layout(), PixelLayout::Bgra);
        assert!(!frame.is_empty());
    }

    #[test]
    fn test_outcome_is_filtered() {
        assert!(FrameOutcome::Filtered { width: 3, height: 2 }.is_filtered());
        assert!(!FrameOutcome::Skipped.is_filtered());
    }

    #[test]
    fn test_zero_sized_frame_is_empty() {
        let mut data: Vec<u8> = Vec::new();
        let frame = RgbaFrameMut::from_slice(&mut data, 0, 0, PixelLayout::Rgba).unwrap();
        assert!(frame.is_empty());

        let mut img = Array3::<u8>::zeros((0, 16, 4));
        let frame = RgbaFrameMut::new(img.view_mut(), PixelLayout::Rgba).unwrap();
        assert!(frame.is_empty());
    }
}
