//! Luma conversion between 4-channel frames and single-channel images.
//!
//! Uses ITU-R BT.601 luma weights in 14-bit fixed point, the conversion
//! camera pipelines apply to 8-bit RGBA preview frames. Alpha never
//! contributes to luma.
//!
//! Contiguous buffers take a rayon fast path over raw pixel chunks; strided
//! views (numpy slices, sub-views) fall back to an ndarray `Zip`.

use ndarray::{Array2, Array3, ArrayView2, ArrayView3, ArrayViewMut3, Axis, Zip};
use rayon::prelude::*;

use crate::frame::{PixelLayout, CHANNELS};

/// ITU-R BT.601 luma coefficients scaled by 2^14 (sum = 16384)
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;
const LUMA_SHIFT: u32 = 14;
const LUMA_ROUND: u32 = 1 << (LUMA_SHIFT - 1);

/// Luma of one pixel, rounded to nearest.
#[inline]
pub fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    let y = LUMA_R * r as u32 + LUMA_G * g as u32 + LUMA_B * b as u32;
    ((y + LUMA_ROUND) >> LUMA_SHIFT) as u8
}

/// Convert a (height, width, 4) frame to a (height, width) luma image.
pub fn rgba_to_luma_u8(input: ArrayView3<u8>, layout: PixelLayout) -> Array2<u8> {
    let (height, width, _) = input.dim();
    let [r, g, b] = layout.rgb_indices();
    let mut luma = Array2::<u8>::zeros((height, width));

    let contiguous = match (input.as_slice(), luma.as_slice_mut()) {
        (Some(src), Some(dst)) => {
            dst.par_iter_mut()
                .zip(src.par_chunks_exact(CHANNELS))
                .for_each(|(l, px)| *l = luma_u8(px[r], px[g], px[b]));
            true
        }
        _ => false,
    };

    if !contiguous {
        Zip::from(&mut luma)
            .and(input.lanes(Axis(2)))
            .par_for_each(|l, px| *l = luma_u8(px[r], px[g], px[b]));
    }
    luma
}

/// Overwrite every channel of `output` with the matching luma value.
///
/// `output` and `luma` must share height and width.
pub fn fill_rgba_from_luma(mut output: ArrayViewMut3<u8>, luma: ArrayView2<u8>) {
    let (height, width, _) = output.dim();
    debug_assert_eq!((height, width), luma.dim());

    if let (Some(dst), Some(src)) = (output.as_slice_mut(), luma.as_slice()) {
        dst.par_chunks_exact_mut(CHANNELS)
            .zip(src.par_iter())
            .for_each(|(px, &v)| px.fill(v));
        return;
    }

    Zip::from(output.lanes_mut(Axis(2)))
        .and(&luma)
        .par_for_each(|mut px, &v| px.fill(v));
}

/// Expand a luma image into a new (height, width, 4) frame with equal channels.
pub fn luma_to_rgba_u8(luma: ArrayView2<u8>) -> Array3<u8> {
    let (height, width) = luma.dim();
    let mut output = Array3::<u8>::zeros((height, width, CHANNELS));
    fill_rgba_from_luma(output.view_mut(), luma);
    output
}
