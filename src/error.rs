//! Error types for the gradnet engine.
//!
//! Every fallible operation in the crate returns [`Result`]. Failures are
//! programmer-detectable misuse (bad shapes, backward before forward), not
//! transient faults: nothing is retried, and a failed operation never
//! returns a partial or corrupted matrix.

use thiserror::Error;

use crate::layer::LayerKind;

/// Result type alias for gradnet operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the gradnet engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A matrix was requested with a zero row or column extent.
    #[error("cannot allocate a {rows}x{columns} matrix; both extents must be positive")]
    Allocation { rows: usize, columns: usize },

    /// A buffer of the wrong length was supplied for the requested shape.
    #[error("data length {len} does not fit a {rows}x{columns} matrix")]
    DataLength {
        rows: usize,
        columns: usize,
        len: usize,
    },

    /// Operand shapes are incompatible for the attempted operation.
    #[error(
        "incompatible dimensions for {op}: {lhs_rows}x{lhs_columns} and {rhs_rows}x{rhs_columns}"
    )]
    DimensionMismatch {
        op: &'static str,
        lhs_rows: usize,
        lhs_columns: usize,
        rhs_rows: usize,
        rhs_columns: usize,
    },

    /// `backward` was invoked on a layer that has not run `forward` yet.
    #[error("{layer} layer has no cached forward state; call forward first")]
    NoForwardState { layer: LayerKind },
}

impl Error {
    pub(crate) fn dimension_mismatch(
        op: &'static str,
        lhs: (usize, usize),
        rhs: (usize, usize),
    ) -> Self {
        Self::DimensionMismatch {
            op,
            lhs_rows: lhs.0,
            lhs_columns: lhs.1,
            rhs_rows: rhs.0,
            rhs_columns: rhs.1,
        }
    }
}
