//! # Remote Bitbang Bridge Library
//!
//! This crate connects a cycle-driven hardware simulation to a JTAG debugger such as
//! OpenOCD. The debugger speaks the remote bitbang protocol over a unix socket, the
//! simulation calls into the bridge once per clock edge.
//!
//! ## Overview
//!
//! A simulator cannot hand control to a blocking server loop: it owns the thread and
//! calls foreign code from its clock callbacks. The bridge is therefore turned inside
//! out. Instead of waiting for messages, every call to [`bridge::Bridge::tick`] does at
//! most one unit of work and returns immediately.
//!
//! ## Architecture
//!
//! The crate is built from small components, leaf first:
//!
//! - **[`state::SignalState`]**: the latched levels of TCK, TMS, TDI, TRST and SRST
//! - **[`connection::Connection`]**: the listening socket and at most one remote
//! - **[`engine::step`]**: the command interpreter, one byte per call
//! - **[`gate::RateGate`]**: lets the interpreter run only every `delay + 1` ticks
//! - **[`bridge::Bridge`]**: ties everything together behind the [`Tick`] trait
//!
//! ## How It Works
//!
//! 1. The simulator samples TDO on a clock edge and calls `tick(tdo)`
//! 2. The rate gate decides whether this edge does any work
//! 3. If it does, the socket is created (first time only) and a pending remote is accepted
//! 4. One pending command byte, if any, is read and applied
//! 5. The latched pin levels are returned for the simulator to drive
//!
//! ## Basic Usage
//!
//! ```no_run
//! use rbb_bridge::bridge::{Bridge, Config};
//!
//! let mut bridge = Bridge::new(Config::default());
//! let mut tdo = false;
//! loop {
//!     let pins = bridge.tick(tdo)?;
//!     // drive pins.tck, pins.tms, ... into the design and sample tdo again
//!     # tdo = pins.tdi;
//! }
//! # Ok::<(), rbb_bridge::error::BridgeError>(())
//! ```
//!
//! ## Error Handling
//!
//! No error is retried. Failing to set up the socket, or any read, write or accept
//! failure other than "would block", is returned as a [`error::BridgeError`].
//! The caller decides how to stop the simulation.
//! Unknown command bytes are not errors, they are ignored.
//!
//! ## Logging
//!
//! This crate uses the `log` crate for diagnostics. Socket creation and remote
//! connects and disconnects are logged at info level, single commands at debug and
//! trace level.
//!
//! ## Thread Model
//!
//! A bridge is driven from a single thread and never blocks. Each bridge owns its own
//! socket, so independent instances can coexist in one process as long as their socket
//! paths differ.
pub mod bridge;
pub mod connection;
pub mod engine;
pub mod error;
pub mod gate;
pub mod state;

pub use bridge::{Bridge, Builder, Config};
pub use state::Pins;

/// The contract between a simulator binding and the bridge.
///
/// Bindings only marshal values: they turn the simulator's representation of TDO into a
/// bit, call [`Tick::tick`] once per clock edge, and drive the returned [`Pins`] back into
/// the design. They keep no state of their own.
pub trait Tick {
    /// Advance by one host clock cycle.
    ///
    /// # Arguments
    ///
    /// * `tdo` - The current level of the design's TDO output
    ///
    /// # Returns
    ///
    /// The levels to drive onto TCK, TMS, TDI, TRST and SRST. With nothing pending these
    /// are the same values as on the previous tick.
    ///
    /// # Error Handling
    ///
    /// Errors are fatal. After an error the implementation is in an unspecified state
    /// and should not be ticked again.
    fn tick(&mut self, tdo: bool) -> Result<Pins, error::BridgeError>;
}
