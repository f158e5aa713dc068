#![forbid(unsafe_code)]

//! Extraction errors.

use core::fmt;

/// Errors produced while extracting a mesh from WRL text.
///
/// Absent `point`/`coordIndex` blocks are *not* errors (they yield an empty
/// mesh); only malformed content inside a located block is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WrlParseError {
    /// A token inside `point [ ... ]` is not a decimal float.
    InvalidCoordinate { token: Box<str> },
    /// The coordinate list length is not a multiple of three.
    TruncatedTriple { count: usize },
    /// A token inside `coordIndex [ ... ]` is not an integer.
    InvalidIndex { token: Box<str> },
    /// A face index is negative but not the `-1` face terminator.
    NegativeIndex { value: i64 },
}

impl fmt::Display for WrlParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCoordinate { token } => {
                write!(f, "invalid coordinate {token:?} in point block")
            }
            Self::TruncatedTriple { count } => {
                write!(f, "coordinate count {count} is not a multiple of 3")
            }
            Self::InvalidIndex { token } => {
                write!(f, "invalid index {token:?} in coordIndex block")
            }
            Self::NegativeIndex { value } => {
                write!(f, "negative face index {value} (only -1 may appear)")
            }
        }
    }
}

impl std::error::Error for WrlParseError {}
