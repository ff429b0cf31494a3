//! Filter parameters.
//!
//! The parameter set is closed: smoothing weight, the two edge thresholds and
//! the smoothing switch. Values are fixed once a [`FrameFilter`] is built.
//!
//! [`FrameFilter`]: crate::FrameFilter

use crate::error::FilterError;

/// Weight given to the newest edge map in the moving average.
pub const DEFAULT_ALPHA: f32 = 0.25;
/// Gradient magnitude above which a pixel may join an edge.
pub const DEFAULT_LOW_THRESHOLD: f32 = 50.0;
/// Gradient magnitude above which a pixel seeds an edge.
pub const DEFAULT_HIGH_THRESHOLD: f32 = 150.0;

/// Parameters of a [`FrameFilter`](crate::FrameFilter).
///
/// Thresholds are compared against the L1 Sobel magnitude `|gx| + |gy|`
/// of the 8-bit luma image, so useful values lie in `0..=2040`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterConfig {
    /// EMA weight of the newest edge map, in (0, 1).
    pub alpha: f32,
    /// Weak-edge threshold.
    pub low_threshold: f32,
    /// Strong-edge threshold.
    pub high_threshold: f32,
    /// Blend successive edge maps instead of emitting each one raw.
    pub smoothing: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            low_threshold: DEFAULT_LOW_THRESHOLD,
            high_threshold: DEFAULT_HIGH_THRESHOLD,
            smoothing: true,
        }
    }
}

impl FilterConfig {
    /// Build and validate a configuration.
    pub fn new(
        alpha: f32,
        low_threshold: f32,
        high_threshold: f32,
        smoothing: bool,
    ) -> Result<Self, FilterError> {
        let config = Self {
            alpha,
            low_threshold,
            high_threshold,
            smoothing,
        };
        config.validate()?;
        Ok(config)
    }

    /// Same parameters with temporal smoothing switched off.
    pub fn without_smoothing(self) -> Self {
        Self {
            smoothing: false,
            ..self
        }
    }

    /// Check parameter ranges.
    ///
    /// Alpha is checked even when smoothing is off so a configuration stays
    /// valid if the flag is flipped.
    pub fn validate(&self) -> Result<(), FilterError> {
        if !(self.alpha.is_finite() && self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(FilterError::InvalidAlpha(self.alpha));
        }

        let (low, high) = (self.low_threshold, self.high_threshold);
        if !(low.is_finite() && high.is_finite()) || low < 0.0 || low > high {
            return Err(FilterError::InvalidThresholds { low, high });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = FilterConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.smoothing);
        assert_eq!(config.alpha, DEFAULT_ALPHA);
    }

    #[test]
    fn test_alpha_bounds_are_exclusive() {
        assert_eq!(
            FilterConfig::new(0.0, 50.0, 150.0, true),
            Err(FilterError::InvalidAlpha(0.0))
        );
        assert_eq!(
            FilterConfig::new(1.0, 50.0, 150.0, true),
            Err(FilterError::InvalidAlpha(1.0))
        );
        assert!(FilterConfig::new(f32::NAN, 50.0, 150.0, false).is_err());
        assert!(FilterConfig::new(0.5, 50.0, 150.0, true).is_ok());
    }

    #[test]
    fn test_thresholds_must_be_ordered() {
        assert_eq!(
            FilterConfig::new(0.25, 200.0, 100.0, true),
            Err(FilterError::InvalidThresholds {
                low: 200.0,
                high: 100.0
            })
        );
        assert!(FilterConfig::new(0.25, -1.0, 100.0, true).is_err());
        assert!(FilterConfig::new(0.25, 80.0, 80.0, true).is_ok());
    }

    #[test]
    fn test_without_smoothing_keeps_thresholds() {
        let config = FilterConfig::default().without_smoothing();
        assert!(!config.smoothing);
        assert_eq!(config.low_threshold, DEFAULT_LOW_THRESHOLD);
        assert_eq!(config.high_threshold, DEFAULT_HIGH_THRESHOLD);
    }
}
