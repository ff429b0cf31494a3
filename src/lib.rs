//! edgecam
//!
//! Edge-highlighting filter for live camera frames, with Python bindings via
//! PyO3 and WASM bindings for JavaScript.
//!
//! ## Frame Format
//! Frames are caller-owned 8-bit buffers of shape (height, width, 4), in
//! RGBA or BGRA channel order. The filter rewrites them in place and never
//! changes their shape.
//!
//! ## Pipeline
//! luma conversion → Canny edges → optional moving average of edge maps →
//! edge value written to all four channels.
//!
//! ```
//! use edgecam::{FilterConfig, FrameFilter, FrameOutcome, PixelLayout};
//!
//! let mut filter = FrameFilter::new(FilterConfig::default()).unwrap();
//! let mut pixels = vec![0u8; 64 * 48 * 4];
//! let outcome = filter
//!     .process_rgba(&mut pixels, 64, 48, PixelLayout::Rgba)
//!     .unwrap();
//! assert_eq!(outcome, FrameOutcome::Filtered { width: 64, height: 48 });
//! ```

pub mod config;
pub mod error;
pub mod filters;
pub mod frame;
pub mod frame_filter;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{FilterConfig, DEFAULT_ALPHA, DEFAULT_HIGH_THRESHOLD, DEFAULT_LOW_THRESHOLD};
pub use error::FilterError;
pub use frame::{FrameOutcome, PixelLayout, RgbaFrameMut};
pub use frame_filter::FrameFilter;

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use log::debug;
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3, PyReadwriteArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::config::{
        FilterConfig, DEFAULT_ALPHA, DEFAULT_HIGH_THRESHOLD, DEFAULT_LOW_THRESHOLD,
    };
    use crate::error::FilterError;
    use crate::filters::edge::canny_rgba_u8;
    use crate::frame::{FrameOutcome, PixelLayout, RgbaFrameMut};
    use crate::frame_filter::FrameFilter;

    fn value_error(err: FilterError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }

    // ========================================================================
    // Stateful filter
    // ========================================================================

    /// Per-stream edge filter. Create one per camera stream.
    ///
    /// `process` rewrites a writable uint8 array of shape (H, W, 4) in place
    /// and returns True when the frame was filtered, False when it was empty.
    #[pyclass(name = "FrameFilter", unsendable)]
    pub struct PyFrameFilter {
        inner: FrameFilter,
        layout: PixelLayout,
    }

    #[pymethods]
    impl PyFrameFilter {
        #[new]
        #[pyo3(signature = (
            alpha=DEFAULT_ALPHA,
            low_threshold=DEFAULT_LOW_THRESHOLD,
            high_threshold=DEFAULT_HIGH_THRESHOLD,
            smoothing=true,
            layout="rgba"
        ))]
        fn new(
            alpha: f32,
            low_threshold: f32,
            high_threshold: f32,
            smoothing: bool,
            layout: &str,
        ) -> PyResult<Self> {
            let config = FilterConfig::new(alpha, low_threshold, high_threshold, smoothing)
                .map_err(value_error)?;
            let inner = FrameFilter::new(config).map_err(value_error)?;
            let layout = layout.parse::<PixelLayout>().map_err(value_error)?;
            Ok(Self { inner, layout })
        }

        fn process(&mut self, mut frame: PyReadwriteArray3<'_, u8>) -> PyResult<bool> {
            let frame = RgbaFrameMut::new(frame.as_array_mut(), self.layout).map_err(value_error)?;
            let outcome = self.inner.process(frame);
            if let FrameOutcome::Filtered { width, height } = outcome {
                debug!("processed frame {}x{}", width, height);
            }
            Ok(outcome.is_filtered())
        }

        fn reset(&mut self) {
            self.inner.reset();
        }

        #[getter]
        fn primed(&self) -> bool {
            self.inner.is_primed()
        }
    }

    // ========================================================================
    // Stateless edge detection
    // ========================================================================

    /// Canny edges of an RGBA/BGRA uint8 image, returned as a new (H, W, 4)
    /// array with all channels equal.
    #[pyfunction]
    #[pyo3(signature = (image, low_threshold=DEFAULT_LOW_THRESHOLD, high_threshold=DEFAULT_HIGH_THRESHOLD, layout="rgba"))]
    pub fn canny<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        low_threshold: f32,
        high_threshold: f32,
        layout: &str,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = image.as_array();
        let channels = input.dim().2;
        if channels != 4 {
            return Err(value_error(FilterError::ChannelCount {
                expected: 4,
                actual: channels,
            }));
        }
        let layout = layout.parse::<PixelLayout>().map_err(value_error)?;
        let result = canny_rgba_u8(input, layout, low_threshold, high_threshold);
        Ok(result.into_pyarray(py))
    }

    /// Python module definition
    #[pymodule]
    pub fn edgecam(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_class::<PyFrameFilter>()?;
        m.add_function(wrap_pyfunction!(canny, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::edgecam;
