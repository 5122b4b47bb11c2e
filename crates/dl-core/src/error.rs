//! Error types for the draw engine.

/// Errors that can occur during engine operations.
///
/// Rejected intents (drawing with too few options, charging twice, switching
/// mode mid-draw) are not errors; the session reports them as no-ops.
#[derive(Debug, thiserror::Error)]
pub enum DrawError {
    /// A caller broke an operation's contract, e.g. picking from zero options.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An option index was outside the current option set.
    #[error("option index {index} out of range (have {len} options)")]
    OutOfRange {
        /// The rejected index.
        index: usize,
        /// Number of options at the time of the call.
        len: usize,
    },

    /// A configuration value is inconsistent or unparseable.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Convenience result type for engine operations.
pub type DrawResult<T> = Result<T, DrawError>;
