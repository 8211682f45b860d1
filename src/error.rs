use std::fmt::{Display, Formatter};
use std::io;

use crate::gate::GateKind;

/// Error type for gate construction, expansion and compilation.
#[derive(Debug)]
pub enum Error {
    /// A ternary operator was given the wrong number of children.
    Arity { kind: GateKind, count: usize },
    /// The requested encoding cannot represent a gate or a builder.
    EncodingUnsupported(String),
    /// The gate cannot be expanded in the current expansion mode.
    UnsupportedExpansion(String),
    /// Out-of-range construction parameter.
    InvalidParameter(String),
    /// Operation invoked in the wrong life-cycle state.
    InvalidState(&'static str),
    /// Writer contract violated.
    Protocol(&'static str),
    /// File I/O error.
    Io(io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Arity { kind, count } => {
                write!(f, "{} with {} arguments not allowed", kind, count)
            }
            Error::EncodingUnsupported(msg) => write!(f, "Unsupported encoding: {}", msg),
            Error::UnsupportedExpansion(msg) => write!(f, "Unsupported expansion: {}", msg),
            Error::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            Error::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            Error::Protocol(msg) => write!(f, "Writer protocol violation: {}", msg),
            Error::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}
