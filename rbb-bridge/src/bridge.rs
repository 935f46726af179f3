use std::path::{Path, PathBuf};

use crate::{
    Tick,
    connection::{Connection, ConnectionState},
    engine::{self, Outcome},
    error::BridgeError,
    gate::RateGate,
    state::{Pins, SignalState},
};

/// Where the bridge listens unless configured otherwise.
pub const DEFAULT_SOCKET_PATH: &str = "/tmp/cosim_jtag.sock";

#[derive(Debug, Clone)]
pub struct Config {
    /// Number of ticks skipped between two engine runs
    pub delay: u32,
    pub socket_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delay: 0,
            socket_path: PathBuf::from(DEFAULT_SOCKET_PATH),
        }
    }
}

/// Builder to create a [Bridge] instance and modify configuration options
///
/// # Example
///
/// ```no_run
/// use rbb_bridge::bridge::Builder;
///
/// let mut bridge = Builder::new()
///     .delay(3)
///     .socket_path("/tmp/my_design.sock")
///     .build();
/// let pins = bridge.tick(false)?;
/// # Ok::<(), rbb_bridge::error::BridgeError>(())
/// ```
#[derive(Default)]
pub struct Builder {
    config: Config,
}

impl Builder {
    pub fn new() -> Builder {
        Builder::default()
    }

    /// Set the number of ticks to skip between two processed commands.
    pub fn delay(mut self, delay: u32) -> Self {
        self.config.delay = delay;
        self
    }

    /// Set the path of the unix socket
    pub fn socket_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.socket_path = path.into();
        self
    }

    /// Build and return the bridge
    pub fn build(self) -> Bridge {
        Bridge::new(self.config)
    }
}

/// A remote bitbang bridge: the state that lives between two ticks.
///
/// Nothing happens until the first tick; the socket is created lazily.
#[derive(Debug)]
pub struct Bridge {
    config: Config,
    gate: RateGate,
    connection: Connection,
    state: SignalState,
}

impl Bridge {
    pub fn new(config: Config) -> Bridge {
        Bridge {
            gate: RateGate::new(config.delay),
            connection: Connection::new(config.socket_path.clone()),
            state: SignalState::default(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn socket_path(&self) -> &Path {
        self.connection.path()
    }

    pub fn signals(&self) -> &SignalState {
        &self.state
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.connection.state()
    }

    /// Advances the bridge by one host clock cycle.
    ///
    /// `tdo` is the current level of the design's TDO output. Returns the levels to
    /// drive onto TCK, TMS, TDI, TRST and SRST, which are the latched values whether
    /// or not a command was processed on this tick.
    pub fn tick(&mut self, tdo: bool) -> Result<Pins, BridgeError> {
        if self.gate.poll() {
            self.service(tdo)?;
        } else {
            log::trace!("Gate closed, skipping tick");
        }
        Ok(self.state.drive())
    }

    fn service(&mut self, tdo: bool) -> Result<(), BridgeError> {
        self.connection.ensure_listening()?;
        if !self.connection.is_connected() {
            self.connection.try_accept()?;
        }

        let Some(peer) = self.connection.peer_mut() else {
            return Ok(());
        };
        match engine::step(peer, tdo, &mut self.state)? {
            Outcome::Quit => {
                log::debug!("Remote sent quit");
                self.connection.close_peer();
            }
            Outcome::Closed => {
                log::debug!("Remote closed the connection without quitting");
                self.connection.close_peer();
            }
            Outcome::Idle | Outcome::Applied(_) => {}
        }
        Ok(())
    }
}

impl Tick for Bridge {
    fn tick(&mut self, tdo: bool) -> Result<Pins, BridgeError> {
        Bridge::tick(self, tdo)
    }
}
