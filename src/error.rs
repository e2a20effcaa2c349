use std::fmt;

/// Failures surfaced by editing operations. Re-entrant fill/pixelate calls
/// are silent no-ops by design and never produce an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// Pointer location maps outside the buffer (or the editable rows).
    /// The operation is rejected before any mutation or history entry.
    OutOfBounds { x: i64, y: i64 },
    /// A raw pixel vector does not match the declared dimensions.
    SizeMismatch { expected: usize, actual: usize },
    /// Persisted bytes hold no decodable pixel data.
    Decode(String),
    /// The canvas could not be encoded for persistence.
    Encode(String),
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { x, y } => {
                write!(f, "coordinate ({x}, {y}) is outside the editable canvas")
            }
            Self::SizeMismatch { expected, actual } => {
                write!(f, "pixel data holds {actual} entries, expected {expected}")
            }
            Self::Decode(msg) => write!(f, "image decode failed: {msg}"),
            Self::Encode(msg) => write!(f, "image encode failed: {msg}"),
        }
    }
}

impl std::error::Error for EditError {}

impl From<image::ImageError> for EditError {
    fn from(err: image::ImageError) -> Self {
        Self::Decode(err.to_string())
    }
}
