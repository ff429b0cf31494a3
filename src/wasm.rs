//! WebAssembly exports for the edge filter.
//!
//! Frames arrive as flat RGBA bytes, e.g. the `data` of a canvas `ImageData`.
//! `WasmFrameFilter::process` rewrites the passed array in place.

use log::debug;
use ndarray::ArrayView3;
use wasm_bindgen::prelude::*;

use crate::config::FilterConfig;
use crate::error::FilterError;
use crate::filters::edge::canny_rgba_u8;
use crate::frame::{expected_len, PixelLayout, CHANNELS};
use crate::frame_filter::FrameFilter;

fn js_error(err: FilterError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// ============================================================================
// Stateful filter
// ============================================================================

/// Per-stream edge filter for JavaScript hosts.
#[wasm_bindgen]
pub struct WasmFrameFilter {
    inner: FrameFilter,
}

#[wasm_bindgen]
impl WasmFrameFilter {
    /// Create a filter.
    ///
    /// # Arguments
    /// * `alpha` - Weight of the newest edge map, in (0, 1)
    /// * `low_threshold` - Weak-edge threshold
    /// * `high_threshold` - Strong-edge threshold
    /// * `smoothing` - Blend successive edge maps
    #[wasm_bindgen(constructor)]
    pub fn new(
        alpha: f32,
        low_threshold: f32,
        high_threshold: f32,
        smoothing: bool,
    ) -> Result<WasmFrameFilter, JsValue> {
        let config = FilterConfig::new(alpha, low_threshold, high_threshold, smoothing)
            .map_err(js_error)?;
        let inner = FrameFilter::new(config).map_err(js_error)?;
        Ok(Self { inner })
    }

    /// Filter an RGBA frame in place.
    ///
    /// # Returns
    /// `true` when the frame was filtered, `false` when it was empty
    pub fn process(&mut self, data: &mut [u8], width: usize, height: usize) -> Result<bool, JsValue> {
        let outcome = self
            .inner
            .process_rgba(data, width, height, PixelLayout::Rgba)
            .map_err(js_error)?;

        let filtered = outcome.is_filtered();
        if filtered {
            debug!("processed frame {}x{}", width, height);
        }
        Ok(filtered)
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    #[wasm_bindgen(getter)]
    pub fn primed(&self) -> bool {
        self.inner.is_primed()
    }
}

// ============================================================================
// Stateless edge detection
// ============================================================================

/// Canny edges of an RGBA u8 image.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Returns
/// Flat array of RGBA bytes with all channels set to the edge value
#[wasm_bindgen]
pub fn canny_rgba_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    low_threshold: f32,
    high_threshold: f32,
) -> Result<Vec<u8>, JsValue> {
    expected_len(width, height, data.len()).map_err(js_error)?;
    let input = ArrayView3::from_shape((height, width, CHANNELS), data).map_err(|_| {
        js_error(FilterError::BufferLength {
            width,
            height,
            expected: width.saturating_mul(height).saturating_mul(CHANNELS),
            actual: data.len(),
        })
    })?;

    let result = canny_rgba_u8(input, PixelLayout::Rgba, low_threshold, high_threshold);
    Ok(result.into_raw_vec_and_offset().0)
}
