//! Lifecycle of the listening socket and the single remote connection.
use std::{
    fs,
    io::{self, ErrorKind},
    os::{fd::AsRawFd, unix::net::{UnixListener, UnixStream}},
    path::{Path, PathBuf},
};

use nix::sys::socket::{
    AddressFamily, Backlog, SockFlag, SockType, UnixAddr, bind, listen, socket,
};

use crate::error::{BridgeError, is_transient};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ConnectionState {
    /// No socket exists yet
    Unopened,
    /// Waiting for a remote to connect
    Listening,
    /// A remote is connected
    Connected,
}

/// Owns the listening socket and at most one accepted remote.
///
/// The listening socket is created on first use and then kept for the lifetime of the
/// connection manager. Remotes may come and go, every remote that quits makes room for
/// the next one.
#[derive(Debug)]
pub struct Connection {
    path: PathBuf,
    listener: Option<UnixListener>,
    peer: Option<UnixStream>,
}

impl Connection {
    pub fn new(path: impl Into<PathBuf>) -> Connection {
        Connection {
            path: path.into(),
            listener: None,
            peer: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> ConnectionState {
        match (&self.listener, &self.peer) {
            (None, _) => ConnectionState::Unopened,
            (Some(_), None) => ConnectionState::Listening,
            (Some(_), Some(_)) => ConnectionState::Connected,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.peer.is_some()
    }

    /// Creates the listening socket if it does not exist yet.
    pub fn ensure_listening(&mut self) -> Result<(), BridgeError> {
        if self.listener.is_none() {
            self.listener = Some(create_listener(&self.path)?);
            log::info!("Created unix socket at: {}", self.path.display());
        }
        Ok(())
    }

    /// Accepts a pending remote, if there is one.
    /// Returns `true` if a remote was accepted on this call.
    pub fn try_accept(&mut self) -> Result<bool, BridgeError> {
        if self.peer.is_some() {
            return Ok(false);
        }
        let Some(listener) = &self.listener else {
            return Ok(false);
        };
        match accepted(listener.accept().map(|(stream, _)| stream))? {
            Some(stream) => {
                log::info!("Remote connected");
                self.peer = Some(stream);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn peer_mut(&mut self) -> Option<&mut UnixStream> {
        self.peer.as_mut()
    }

    /// Drops the remote connection and goes back to listening.
    pub fn close_peer(&mut self) {
        if self.peer.take().is_some() {
            log::info!("Remote disconnected");
        }
    }
}

/// Classifies the result of a non-blocking accept.
fn accepted(result: io::Result<UnixStream>) -> Result<Option<UnixStream>, BridgeError> {
    match result {
        Ok(stream) => {
            // Accepted sockets do not inherit the non-blocking flag everywhere
            stream.set_nonblocking(true).map_err(BridgeError::Accept)?;
            Ok(Some(stream))
        }
        Err(e) if is_transient(&e) => Ok(None),
        Err(e) => Err(BridgeError::Accept(e)),
    }
}

/// Binds a non-blocking stream socket with a backlog of one at `path`,
/// replacing whatever a previous run left there.
fn create_listener(path: &Path) -> Result<UnixListener, BridgeError> {
    match fs::remove_file(path) {
        Ok(()) => log::debug!("Removed stale socket at {}", path.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => log::debug!("Could not remove {}: {}", path.display(), e),
    }

    // The bridge is called from within the simulator and must never block.
    // Processes spawned by the simulator must not inherit the socket.
    let fd = socket(
        AddressFamily::Unix,
        SockType::Stream,
        SockFlag::SOCK_NONBLOCK | SockFlag::SOCK_CLOEXEC,
        None,
    )
    .map_err(|e| BridgeError::Socket(e.into()))?;

    let bind_error = |e: nix::Error| BridgeError::Bind {
        path: path.to_path_buf(),
        source: e.into(),
    };
    let addr = UnixAddr::new(path).map_err(bind_error)?;
    bind(fd.as_raw_fd(), &addr).map_err(bind_error)?;

    let backlog = Backlog::new(1).map_err(|e| BridgeError::Listen(e.into()))?;
    listen(&fd, backlog).map_err(|e| BridgeError::Listen(e.into()))?;

    Ok(UnixListener::from(fd))
}
