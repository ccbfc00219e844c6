//! Dynamic path builder usage errors.

use thiserror::Error;

/// Errors raised while chaining path segments.
///
/// These are caller mistakes: they are returned immediately and never
/// retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// A value or format was applied to a path that has no named segment yet.
    #[error("cannot index before at least one named segment exists")]
    IndexBeforeSegment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_before_segment_display() {
        assert_eq!(
            PathError::IndexBeforeSegment.to_string(),
            "cannot index before at least one named segment exists"
        );
    }
}
