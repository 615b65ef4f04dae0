use thiserror::Error;

/// Construction-time configuration violations.
///
/// These are rejected once, when a block is built; no error ever crosses a
/// block's per-edge interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ConfigError {
    /// A FIFO with zero slots would be empty and full at the same time.
    #[error("fifo depth must be at least 1")]
    ZeroDepth,
}

/// Memory-image parse failures, reported with the 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum ImageError {
    /// An `@` line carried an address but no value.
    #[error("line {line}: missing value after address")]
    MissingValue {
        /// 1-based line number in the image text.
        line: usize,
    },
    /// An address or value token was not a valid hexadecimal number.
    #[error("line {line}: invalid hexadecimal token `{token}`")]
    InvalidHex {
        /// 1-based line number in the image text.
        line: usize,
        /// The offending token, verbatim.
        token: String,
    },
}

impl ImageError {
    /// Returns the 1-based line number the error was raised on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::MissingValue { line } | Self::InvalidHex { line, .. } => *line,
        }
    }
}
