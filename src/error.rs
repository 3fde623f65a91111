use thiserror::Error;

use crate::Shape;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConvolutionError {
    #[error("matrix must have non-zero dimensions, got {0}")]
    EmptyMatrix(Shape),
    #[error("buffer of length {len} cannot back a {shape} matrix")]
    MismatchedBuffer { len: usize, shape: Shape },
    #[error("channels must share one shape, got {0} and {1}")]
    MismatchedChannels(Shape, Shape),
    #[error("filter size must be at least 1")]
    EmptyFilter,
    #[error("filter of size {size} needs {expected} values, got {len}")]
    FilterNotSquare { size: usize, expected: usize, len: usize },
    #[error("at least one filter is required")]
    EmptyFilterBank,
    #[error("stride must be at least 1")]
    ZeroStride,
    #[error("filter of size {filter} does not fit inside padded input {padded}")]
    FilterTooLarge { filter: usize, padded: Shape },
    #[error("description expects a {expected} input, got {got}")]
    MismatchedInput { expected: Shape, got: Shape },
    #[error("description expects a filter of size {expected}, got {got}")]
    MismatchedFilter { expected: usize, got: usize },
    #[error("geometry of {0} with padding {1} does not fit in memory")]
    GeometryOverflow(Shape, usize),
    #[error("thread count must be at least 1")]
    InvalidThreadCount,
}

pub type ConvolutionResult<T> = Result<T, ConvolutionError>;
