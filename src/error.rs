use thiserror::Error;

/// Errors that can occur while constructing a plan.
///
/// Transforms themselves never fail: once a plan exists, every `transform_*`
/// call is a pure function of (plan, input) and cannot return an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DftError {
    /// The requested size is not supported by the variant being built.
    #[error("unsupported size {size} for {context}")]
    UnsupportedSize { size: usize, context: &'static str },

    /// N-dimensional plan construction was given degenerate dimensions.
    #[error("invalid N-D dimensions: {0:?}")]
    InvalidDimensions(Vec<usize>),
}

pub type Result<T> = std::result::Result<T, DftError>;
