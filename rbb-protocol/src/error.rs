use std::{
    error::Error,
    fmt::Display,
    io::{self},
};

/// Errors that may occur when reading a command or reply from a stream.
#[derive(Debug)]
pub enum ReadError {
    IoError(io::Error),
    /// A reply byte other than `'0'` or `'1'`
    InvalidReply(u8),
}

impl From<io::Error> for ReadError {
    fn from(value: io::Error) -> Self {
        ReadError::IoError(value)
    }
}

impl Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::IoError(error) => write!(f, "{}", error),
            ReadError::InvalidReply(byte) => {
                write!(f, "Received invalid reply byte 0x{:02x}", byte)
            }
        }
    }
}

impl Error for ReadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ReadError::IoError(error) => Some(error),
            ReadError::InvalidReply(_) => None,
        }
    }
}
