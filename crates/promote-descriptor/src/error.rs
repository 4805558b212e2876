//! Error types for the properties text codec.

use std::io;

/// Errors reading or writing properties text.
#[derive(Debug, thiserror::Error)]
pub enum PropertiesError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed \\uxxxx escape on line {line}")]
    MalformedEscape { line: usize },
}
