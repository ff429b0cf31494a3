use edgecam::filters::edge::canny_u8;
use edgecam::filters::grayscale::rgba_to_luma_u8;
use edgecam::{PixelLayout, DEFAULT_HIGH_THRESHOLD, DEFAULT_LOW_THRESHOLD};
use ndarray::{Array2, Array3};

/// Every channel, alpha included, set to `value`.
pub fn solid_frame(height: usize, width: usize, value: u8) -> Array3<u8> {
    Array3::from_elem((height, width, 4), value)
}

/// Every channel 0 left of `split` and 255 from `split` on, alpha included.
pub fn vertical_step_frame(height: usize, width: usize, split: usize) -> Array3<u8> {
    Array3::from_shape_fn((height, width, 4), |(_, x, _)| if x < split { 0 } else { 255 })
}

/// Opaque frame, bright above `split`, dark from `split` down.
pub fn horizontal_step_frame(height: usize, width: usize, split: usize) -> Array3<u8> {
    Array3::from_shape_fn((height, width, 4), |(y, _, c)| {
        if c == 3 {
            255
        } else if y < split {
            220
        } else {
            30
        }
    })
}

/// Opaque high-contrast checkerboard.
pub fn checkerboard_frame(height: usize, width: usize, cell: usize) -> Array3<u8> {
    assert!(cell > 0, "cell size must be positive");
    Array3::from_shape_fn((height, width, 4), |(y, x, c)| {
        if c == 3 {
            255
        } else if (x / cell + y / cell) % 2 == 0 {
            32
        } else {
            220
        }
    })
}

/// Raw edge map of an RGBA frame under the default thresholds.
pub fn raw_edge_map(frame: &Array3<u8>) -> Array2<u8> {
    let luma = rgba_to_luma_u8(frame.view(), PixelLayout::Rgba);
    canny_u8(luma.view(), DEFAULT_LOW_THRESHOLD, DEFAULT_HIGH_THRESHOLD)
}
