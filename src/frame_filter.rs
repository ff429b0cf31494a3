//! Stateful per-stream edge filter.
//!
//! One [`FrameFilter`] serves one camera stream. Each call converts the frame
//! to luma, runs Canny, optionally folds the edge map into a moving average,
//! and writes the result back over the caller's buffer. The only state kept
//! between calls is the moving average, owned by the instance; independent
//! streams need independent instances.

use ndarray::{Array2, ArrayView2, ArrayViewMut2};

use crate::config::FilterConfig;
use crate::error::FilterError;
use crate::filters::edge::canny_u8;
use crate::filters::grayscale::{fill_rgba_from_luma, rgba_to_luma_u8};
use crate::filters::temporal::TemporalSmoother;
use crate::frame::{FrameOutcome, PixelLayout, RgbaFrameMut};

#[derive(Debug, Clone)]
pub struct FrameFilter {
    config: FilterConfig,
    smoother: Option<TemporalSmoother>,
}

impl Default for FrameFilter {
    fn default() -> Self {
        let config = FilterConfig::default();
        Self {
            smoother: Some(TemporalSmoother::new(config.alpha)),
            config,
        }
    }
}

impl FrameFilter {
    /// Create a filter after validating `config`.
    pub fn new(config: FilterConfig) -> Result<Self, FilterError> {
        config.validate()?;
        let smoother = config
            .smoothing
            .then(|| TemporalSmoother::new(config.alpha));
        Ok(Self { config, smoother })
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Filter one frame in place.
    ///
    /// An empty frame is skipped without touching the buffer or the
    /// smoothing state. Otherwise every pixel is overwritten with its edge
    /// value on all four channels; the frame's shape is never changed.
    pub fn process(&mut self, mut frame: RgbaFrameMut<'_>) -> FrameOutcome {
        if frame.is_empty() {
            return FrameOutcome::Skipped;
        }

        let (width, height) = (frame.width(), frame.height());
        let luma = rgba_to_luma_u8(frame.view(), frame.layout());
        let edges = self.edge_map(luma.view());
        fill_rgba_from_luma(frame.view_mut(), edges.view());

        FrameOutcome::Filtered { width, height }
    }

    /// Filter a flat row-major RGBA/BGRA buffer in place.
    pub fn process_rgba(
        &mut self,
        data: &mut [u8],
        width: usize,
        height: usize,
        layout: PixelLayout,
    ) -> Result<FrameOutcome, FilterError> {
        let frame = RgbaFrameMut::from_slice(data, width, height, layout)?;
        Ok(self.process(frame))
    }

    /// Filter a frame that is already single-channel luma.
    ///
    /// Same skip and smoothing rules as [`process`](Self::process); the
    /// edge map is written back as one channel.
    pub fn process_luma(&mut self, mut luma: ArrayViewMut2<'_, u8>) -> FrameOutcome {
        if luma.is_empty() {
            return FrameOutcome::Skipped;
        }

        let (height, width) = luma.dim();
        let edges = self.edge_map(luma.view());
        luma.assign(&edges);

        FrameOutcome::Filtered { width, height }
    }

    /// Drop the moving average; the next frame reseeds it.
    pub fn reset(&mut self) {
        if let Some(smoother) = self.smoother.as_mut() {
            smoother.reset();
        }
    }

    /// True once smoothing state exists. Always false with smoothing off.
    pub fn is_primed(&self) -> bool {
        self.smoother.as_ref().is_some_and(TemporalSmoother::is_primed)
    }

    /// The unrounded moving average of edge maps.
    pub fn smoothing_state(&self) -> Option<ArrayView2<'_, f32>> {
        self.smoother.as_ref().and_then(TemporalSmoother::state)
    }

    fn edge_map(&mut self, luma: ArrayView2<u8>) -> Array2<u8> {
        let edges = canny_u8(luma, self.config.low_threshold, self.config.high_threshold);
        match self.smoother.as_mut() {
            Some(smoother) => smoother.update(edges.view()),
            None => edges,
        }
    }
}
