//! Image stages of the frame pipeline.
//!
//! | Stage | Input | Output |
//! |-------|-------|--------|
//! | `grayscale` | (H, W, 4) u8, RGBA or BGRA | (H, W) u8 luma |
//! | `edge` | (H, W) u8 luma | (H, W) u8 edge map, 0 or 255 |
//! | `temporal` | (H, W) u8 edge map | (H, W) u8 smoothed edge map |
//! | `grayscale` | (H, W) u8 | (H, W, 4) u8, all channels equal |
//!
//! Per-pixel work is spread over rayon workers and finishes before each
//! stage returns, so results are deterministic.

pub mod edge;
pub mod grayscale;
pub mod temporal;
