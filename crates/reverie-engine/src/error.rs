use std::fmt;

/// An engine contract violation or encoder failure.
///
/// All variants are raised synchronously at the call that violates the
/// contract; nothing is retried. Recording mismatches are deliberately
/// asymmetric: nested `record()` is an error, `stop()` while idle is a
/// no-op.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A shape constructor received a non-positive size parameter.
    InvalidDimension { name: &'static str, value: f32 },
    /// A zero output dimension.
    InvalidResolution { width: u32, height: u32 },
    /// `record()` while a recording session is already armed.
    AlreadyRecording,
    /// Vector division by a zero scalar.
    DivisionByZero,
    /// The external encoder reported an I/O failure.
    EncodingFailed(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidDimension { name, value } => {
                write!(f, "invalid {name}: {value} (must be positive)")
            }
            EngineError::InvalidResolution { width, height } => {
                write!(f, "invalid resolution {width}x{height}")
            }
            EngineError::AlreadyRecording => {
                write!(f, "record() called while already recording")
            }
            EngineError::DivisionByZero => write!(f, "vector division by zero"),
            EngineError::EncodingFailed(msg) => write!(f, "encoding failed: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}
