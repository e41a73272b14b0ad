//! Error types for halo primitives.

use thiserror::Error;

/// Why a color string could not be decoded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// Nothing to parse after trimming (or a lone `#`).
    #[error("color value is empty")]
    EmptyInput,

    /// Hex value with a digit count other than 3, 4, 6 or 8.
    #[error("hex color has {0} digits, expected 3, 4, 6 or 8")]
    InvalidLength(usize),

    /// A character outside `0-9a-fA-F` in a hex value.
    #[error("hex color contains a non-hex character")]
    InvalidHexChar,

    /// Neither a known name nor a hex value.
    #[error("unknown color '{0}'")]
    UnknownColor(String),
}
