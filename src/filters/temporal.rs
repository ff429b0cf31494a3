//! Exponential moving average over a stream of edge maps.
//!
//! `S1 = E1`, `Sk = alpha * Ek + (1 - alpha) * S(k-1)`
//!
//! The state is kept in `f32` so repeated blending does not accumulate
//! rounding; each call hands back the state rounded to 8 bits. A frame whose
//! shape differs from the state reseeds it instead of blending.

use log::trace;
use ndarray::{par_azip, Array2, ArrayView2};

#[derive(Debug, Clone)]
pub struct TemporalSmoother {
    alpha: f32,
    state: Option<Array2<f32>>,
}

impl TemporalSmoother {
    /// `alpha` is the weight of the newest sample; callers validate it.
    pub fn new(alpha: f32) -> Self {
        Self { alpha, state: None }
    }

    /// Fold `edges` into the state and return the smoothed map.
    pub fn update(&mut self, edges: ArrayView2<u8>) -> Array2<u8> {
        let alpha = self.alpha;

        match self.state.as_mut() {
            Some(state) if state.dim() == edges.dim() => {
                par_azip!((s in state, &e in &edges) {
                    *s = alpha * e as f32 + (1.0 - alpha) * *s;
                });
            }
            Some(stale) => {
                trace!(
                    "edge map shape changed {:?} -> {:?}, reseeding",
                    stale.dim(),
                    edges.dim()
                );
                *stale = edges.mapv(f32::from);
            }
            None => self.state = Some(edges.mapv(f32::from)),
        }

        self.output()
    }

    /// Current state, if any frame has been folded in since the last reset.
    pub fn state(&self) -> Option<ArrayView2<'_, f32>> {
        self.state.as_ref().map(|s| s.view())
    }

    pub fn is_primed(&self) -> bool {
        self.state.is_some()
    }

    pub fn reset(&mut self) {
        self.state = None;
    }

    fn output(&self) -> Array2<u8> {
        match &self.state {
            Some(state) => state.mapv(|v| v.round().clamp(0.0, 255.0) as u8),
            None => Array2::zeros((0, 0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_update_copies_input() {
        let mut smoother = TemporalSmoother::new(0.25);
        let mut edges = Array2::<u8>::zeros((3, 3));
        edges[[1, 1]] = 255;

        let out = smoother.update(edges.view());

        assert_eq!(out, edges);
        assert!(smoother.is_primed());
        assert_eq!(smoother.state().unwrap()[[1, 1]], 255.0);
    }

    #[test]
    fn test_blend_weights() {
        let mut smoother = TemporalSmoother::new(0.25);
        let zeros = Array2::<u8>::zeros((2, 2));
        let full = Array2::<u8>::from_elem((2, 2), 255);

        smoother.update(zeros.view());
        let out = smoother.update(full.view());

        // 0.25 * 255 = 63.75
        let state = smoother.state().unwrap();
        assert!((state[[0, 0]] - 63.75).abs() < 1e-4);
        assert_eq!(out[[0, 0]], 64);

        smoother.update(full.view());
        // 0.25 * 255 + 0.75 * 63.75 = 111.5625
        assert!((smoother.state().unwrap()[[1, 1]] - 111.5625).abs() < 1e-4);
    }

    #[test]
    fn test_shape_change_reseeds() {
        let mut smoother = TemporalSmoother::new(0.5);
        smoother.update(Array2::<u8>::from_elem((4, 4), 255).view());

        let small = Array2::<u8>::from_elem((2, 3), 10);
        let out = smoother.update(small.view());

        assert_eq!(out, small);
        assert_eq!(smoother.state().unwrap().dim(), (2, 3));
    }

    #[test]
    fn test_reset_clears_state() {
        let mut smoother = TemporalSmoother::new(0.5);
        smoother.update(Array2::<u8>::from_elem((2, 2), 200).view());
        smoother.reset();
        assert!(!smoother.is_primed());
        assert!(smoother.state().is_none());

        let out = smoother.update(Array2::<u8>::from_elem((2, 2), 40).view());
        assert!(out.iter().all(|&v| v == 40));
    }
}
