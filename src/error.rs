//! Error types shared by every pipeline stage.

use thiserror::Error;

/// Reasons a frame can fail to produce an edge map.
///
/// No stage retries and no stage returns partial output: a failed call yields
/// one of these and nothing else.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    /// Unrecognized format tag, or a buffer inconsistent with its declared layout.
    #[error("format error: {0}")]
    Format(String),
    /// Buffer size mismatch between stages.
    #[error("dimension mismatch: expected {expected} samples, got {actual}")]
    Dimension { expected: usize, actual: usize },
    /// Planes with matching sample counts but different (height, width).
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    Shape {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    /// Output buffer could not be reserved.
    #[error("failed to allocate {bytes} bytes")]
    Allocation { bytes: usize },
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;

impl From<ndarray::ShapeError> for PipelineError {
    fn from(err: ndarray::ShapeError) -> Self {
        PipelineError::Format(format!("invalid plane shape: {err}"))
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        PipelineError::Config(err.to_string())
    }
}

/// Reserve a zeroed buffer of `len` elements, reporting failure instead of aborting.
pub(crate) fn alloc_zeroed<T: Copy + Default>(len: usize) -> Result<Vec<T>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len).map_err(|_| PipelineError::Allocation {
        bytes: len.saturating_mul(std::mem::size_of::<T>()),
    })?;
    buf.resize(len, T::default());
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_zeroed_len() {
        let buf: Vec<u8> = alloc_zeroed(12).unwrap();
        assert_eq!(buf.len(), 12);
        assert!(buf.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_alloc_zeroed_overflow_reports_allocation() {
        let err = alloc_zeroed::<u64>(usize::MAX).unwrap_err();
        assert!(matches!(err, PipelineError::Allocation { .. }));
    }

    #[test]
    fn test_display_dimension() {
        let err = PipelineError::Dimension { expected: 25, actual: 24 };
        assert_eq!(err.to_string(), "dimension mismatch: expected 25 samples, got 24");
    }

    #[test]
    fn test_display_shape() {
        let err = PipelineError::Shape { expected: (3, 4), actual: (4, 3) };
        assert_eq!(err.to_string(), "shape mismatch: expected (3, 4), got (4, 3)");
    }
}
