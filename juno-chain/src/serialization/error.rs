use std::io;

use thiserror::Error;

/// A serialization error.
#[derive(Error, Debug)]
pub enum SerializationError {
    /// An io error that prevented serialization
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// The data to be parsed was malformed.
    #[error("parse error: {0}")]
    Parse(&'static str),
}
