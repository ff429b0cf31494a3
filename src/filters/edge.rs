//! Canny edge detection on 8-bit luma images.
//!
//! Pipeline:
//! 1. 3×3 Sobel gradients with replicated borders, L1 magnitude `|gx| + |gy|`
//! 2. Non-maximum suppression along the gradient direction, quantised into
//!    four sectors (0°, 45°, 90°, 135°)
//! 3. Hysteresis: pixels above `high` seed edges, pixels above `low` are kept
//!    only when 8-connected to a seed
//!
//! Output is a binary map: [`EDGE`] on edges, [`BACKGROUND`] elsewhere.
//!
//! Magnitudes on a 0..=255 image lie in `0..=2040`, and thresholds are
//! compared against that range.

use ndarray::{Array2, Array3, ArrayView2, ArrayView3, Zip};

use crate::filters::grayscale::{luma_to_rgba_u8, rgba_to_luma_u8};
use crate::frame::PixelLayout;

/// Value of an edge pixel in the edge map.
pub const EDGE: u8 = 255;
/// Value of a non-edge pixel in the edge map.
pub const BACKGROUND: u8 = 0;

type Kernel3 = [[i32; 3]; 3];

const SOBEL_KERNEL_X: Kernel3 = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
const SOBEL_KERNEL_Y: Kernel3 = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

/// tan(22.5°) in Q15
const TAN_22_5_Q15: i64 = 13573;

// Per-pixel classification after non-maximum suppression
const SUPPRESSED: u8 = 0;
const WEAK: u8 = 1;
const STRONG: u8 = 2;

/// Per-pixel Sobel derivatives and L1 magnitude.
#[derive(Clone, Debug)]
pub struct Gradients {
    /// Horizontal derivative
    pub gx: Array2<i32>,
    /// Vertical derivative
    pub gy: Array2<i32>,
    /// `|gx| + |gy|`
    pub magnitude: Array2<i32>,
}

// ============================================================================
// Gradients
// ============================================================================

/// Compute 3×3 Sobel gradients, replicating edge pixels at the border.
pub fn sobel_gradients(luma: ArrayView2<u8>) -> Gradients {
    let (height, width) = luma.dim();
    let mut gx = Array2::<i32>::zeros((height, width));
    let mut gy = Array2::<i32>::zeros((height, width));
    let mut magnitude = Array2::<i32>::zeros((height, width));

    if height == 0 || width == 0 {
        return Gradients { gx, gy, magnitude };
    }

    Zip::indexed(&mut gx)
        .and(&mut gy)
        .and(&mut magnitude)
        .par_for_each(|(y, x), out_gx, out_gy, out_mag| {
            let rows = [y.saturating_sub(1), y, (y + 1).min(height - 1)];
            let cols = [x.saturating_sub(1), x, (x + 1).min(width - 1)];

            let mut sum_x = 0i32;
            let mut sum_y = 0i32;
            for (ky, &py) in rows.iter().enumerate() {
                for (kx, &px) in cols.iter().enumerate() {
                    let v = luma[[py, px]] as i32;
                    sum_x += v * SOBEL_KERNEL_X[ky][kx];
                    sum_y += v * SOBEL_KERNEL_Y[ky][kx];
                }
            }

            *out_gx = sum_x;
            *out_gy = sum_y;
            *out_mag = sum_x.abs() + sum_y.abs();
        });

    Gradients { gx, gy, magnitude }
}

// ============================================================================
// Non-maximum suppression
// ============================================================================

/// Thin gradient ridges and label survivors as weak or strong.
///
/// Along the gradient a pixel must beat the preceding neighbour strictly and
/// the following one non-strictly, so a two-pixel plateau on a step edge
/// keeps exactly one pixel. Magnitude outside the image counts as zero.
fn suppress_non_maxima(grad: &Gradients, low: f32, high: f32) -> Array2<u8> {
    let (height, width) = grad.magnitude.dim();
    let mag = grad.magnitude.view();
    let (h, w) = (height as isize, width as isize);
    let at = |y: isize, x: isize| -> i32 {
        if y < 0 || x < 0 || y >= h || x >= w {
            0
        } else {
            mag[[y as usize, x as usize]]
        }
    };

    let mut classes = Array2::<u8>::from_elem((height, width), SUPPRESSED);
    Zip::indexed(&mut classes)
        .and(&grad.gx)
        .and(&grad.gy)
        .and(&grad.magnitude)
        .par_for_each(|(y, x), class, &dx, &dy, &m| {
            if m as f32 <= low {
                return;
            }

            let (y, x) = (y as isize, x as isize);
            let abs_x = dx.unsigned_abs() as i64;
            let abs_y = (dy.unsigned_abs() as i64) << 15;
            let tg22 = abs_x * TAN_22_5_Q15;
            let tg67 = tg22 + (abs_x << 16);

            let is_max = if abs_y < tg22 {
                m > at(y, x - 1) && m >= at(y, x + 1)
            } else if abs_y > tg67 {
                m > at(y - 1, x) && m >= at(y + 1, x)
            } else {
                let s = if (dx ^ dy) < 0 { -1 } else { 1 };
                m > at(y - 1, x - s) && m > at(y + 1, x + s)
            };

            if is_max {
                *class = if m as f32 > high { STRONG } else { WEAK };
            }
        });

    classes
}

// ============================================================================
// Hysteresis
// ============================================================================

/// Keep strong pixels and every weak pixel 8-connected to one.
fn hysteresis(classes: &Array2<u8>) -> Array2<u8> {
    let (height, width) = classes.dim();
    let mut edges = Array2::<u8>::from_elem((height, width), BACKGROUND);

    let mut stack: Vec<(usize, usize)> = classes
        .indexed_iter()
        .filter(|(_, class)| **class == STRONG)
        .map(|(idx, _)| idx)
        .collect();
    for &(y, x) in &stack {
        edges[[y, x]] = EDGE;
    }

    while let Some((y, x)) = stack.pop() {
        for ny in y.saturating_sub(1)..=(y + 1).min(height - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(width - 1) {
                if classes[[ny, nx]] == WEAK && edges[[ny, nx]] == BACKGROUND {
                    edges[[ny, nx]] = EDGE;
                    stack.push((ny, nx));
                }
            }
        }
    }

    edges
}

// ============================================================================
// Public entry points
// ============================================================================

/// Canny edge map of a luma image.
///
/// # Arguments
/// * `luma` - Single-channel image (height, width)
/// * `low` - Weak-edge threshold on the L1 Sobel magnitude
/// * `high` - Strong-edge threshold on the L1 Sobel magnitude
///
/// # Returns
/// Edge map of the same shape, [`EDGE`] or [`BACKGROUND`] per pixel
pub fn canny_u8(luma: ArrayView2<u8>, low: f32, high: f32) -> Array2<u8> {
    if luma.is_empty() {
        return Array2::<u8>::zeros(luma.dim());
    }

    let grad = sobel_gradients(luma);
    let classes = suppress_non_maxima(&grad, low, high);
    hysteresis(&classes)
}

/// Stateless grayscale + Canny on a 4-channel frame.
///
/// Returns a new (height, width, 4) image with all channels set to the edge
/// value.
pub fn canny_rgba_u8(input: ArrayView3<u8>, layout: PixelLayout, low: f32, high: f32) -> Array3<u8> {
    let luma = rgba_to_luma_u8(input, layout);
    let edges = canny_u8(luma.view(), low, high);
    luma_to_rgba_u8(edges.view())
}
