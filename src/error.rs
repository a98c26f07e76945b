//! Errors raised when reading or writing solution files.
//!
//! The search itself cannot fail; only the file surfaces around it can.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to {operation} '{}': {source}", .path.display())]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("'{}' is truncated: header promises {expected} solutions, found {read}", .path.display())]
    Truncated {
        path: PathBuf,
        expected: usize,
        read: usize,
    },
    #[error("'{}' holds unknown symbol {byte:#04x} in solution {solution}", .path.display())]
    UnknownSymbol {
        path: PathBuf,
        solution: usize,
        byte: u8,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wraps an I/O failure with the operation and file it happened on.
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}
