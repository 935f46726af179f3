use std::{error::Error, fmt::Display, io, path::PathBuf};

/// Fatal conditions of the bridge.
///
/// None of these resolve by themselves: either the environment is misconfigured or
/// the control channel to the debugger is broken. The caller is expected to stop the
/// simulation after reporting the error.
#[derive(Debug)]
pub enum BridgeError {
    /// The listening socket could not be created
    Socket(io::Error),
    /// The listening socket could not be bound to its path
    Bind { path: PathBuf, source: io::Error },
    /// The listening socket could not be put into listening mode
    Listen(io::Error),
    /// Accepting a pending connection failed
    Accept(io::Error),
    /// Reading a command from the remote failed
    Read(io::Error),
    /// Writing a reply to the remote failed
    Write(io::Error),
}

impl BridgeError {
    /// The underlying system error
    pub fn io_error(&self) -> &io::Error {
        match self {
            BridgeError::Socket(e)
            | BridgeError::Listen(e)
            | BridgeError::Accept(e)
            | BridgeError::Read(e)
            | BridgeError::Write(e) => e,
            BridgeError::Bind { source, .. } => source,
        }
    }
}

impl Display for BridgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BridgeError::Socket(e) => write!(f, "failed to make socket: {}", e),
            BridgeError::Bind { path, source } => {
                write!(f, "failed to bind socket to {}: {}", path.display(), source)
            }
            BridgeError::Listen(e) => write!(f, "failed to listen on socket: {}", e),
            BridgeError::Accept(e) => write!(f, "failed to accept connection: {}", e),
            BridgeError::Read(e) => write!(f, "failed to read from remote: {}", e),
            BridgeError::Write(e) => write!(f, "failed to write to remote: {}", e),
        }
    }
}

impl Error for BridgeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.io_error())
    }
}

/// Errors of a non-blocking call that only mean "nothing to do yet".
/// A signal interrupting the call is retried on the next tick.
pub(crate) fn is_transient(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
    )
}
