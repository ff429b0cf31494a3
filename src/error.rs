//! Error type shared by configuration and the binding-layer buffer checks.
//!
//! The per-frame path itself never fails: an empty frame is a skip, and a
//! shape change reseeds the smoothing state. Everything here is raised either
//! when a filter is built or when a host hands over a buffer that cannot be
//! an RGBA frame.

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FilterError {
    #[error("smoothing alpha must lie strictly between 0 and 1, got {0}")]
    InvalidAlpha(f32),
    #[error("edge thresholds must satisfy 0 <= low <= high, got low={low} high={high}")]
    InvalidThresholds { low: f32, high: f32 },
    #[error("unknown pixel layout {0:?}, expected \"rgba\" or \"bgra\"")]
    UnknownLayout(String),
    #[error("expected {expected} channels per pixel, got {actual}")]
    ChannelCount { expected: usize, actual: usize },
    #[error("buffer holds {actual} bytes but a {width}x{height} frame needs {expected}")]
    BufferLength {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
}
