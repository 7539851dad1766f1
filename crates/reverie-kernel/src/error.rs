use std::fmt;

/// A compilation error from the per-pixel kernel DSL.
///
/// All variants are authoring-time failures raised by [`compile`](crate::compile):
/// nothing in this crate fails at pixel-evaluation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// The iteration bound of a loop could not be determined at compile time
    /// (it references `coord` or a mutable variable).
    UnboundedLoop,
    /// A call to an operation outside the supported arithmetic/vector set.
    UnsupportedOperation(String),
    /// A reference to a name that is neither a captured constant nor a
    /// previously declared variable.
    UndefinedVariable(String),
    /// An operand shape (scalar vs. vector) that the operation cannot accept.
    TypeMismatch(String),
    /// A builtin called with the wrong number of arguments.
    WrongArity {
        name: String,
        expected: usize,
        got: usize,
    },
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::UnboundedLoop => {
                write!(f, "loop bound is not a compile-time constant")
            }
            CompileError::UnsupportedOperation(name) => {
                write!(f, "unsupported operation {name:?}")
            }
            CompileError::UndefinedVariable(name) => {
                write!(f, "undefined variable {name:?}")
            }
            CompileError::TypeMismatch(msg) => {
                write!(f, "type mismatch: {msg}")
            }
            CompileError::WrongArity {
                name,
                expected,
                got,
            } => {
                write!(f, "{name} expects {expected} argument(s), got {got}")
            }
        }
    }
}

impl std::error::Error for CompileError {}
