//! # Remote Bitbang Protocol Library
//!
//! This crate provides a Rust implementation of the [OpenOCD remote bitbang](https://github.com/openocd-org/openocd/blob/master/doc/manual/jtag/drivers/remote_bitbang.txt) protocol,
//! which drives the pins of a JTAG test access port (TAP) over a stream socket.
//!
//! ## Overview
//!
//! Every message is a single ASCII byte. The client (usually OpenOCD) sets the levels of
//! TCK, TMS, TDI and the two reset lines, and samples TDO with a read request.
//! This library allows you to:
//!
//! - Decode and encode remote bitbang commands and replies
//! - Convert between the nine-valued HDL logic type and plain bits
//!
//! ## Protocol Features
//!
//! - **Message Types**:
//!   - `B` / `b`: Blink an activity LED on or off
//!   - `R`: Read TDO, answered with `'0'` or `'1'`
//!   - `Q`: Quit, the client closes the connection
//!   - `0` to `7`: Write TCK, TMS and TDI (TCK is the most significant bit)
//!   - `r` to `u`: Write TRST and SRST (TRST is the most significant bit)
//!
//! ## Basic Usage
//!
//! ### Decoding Commands
//!
//! ```
//! use rbb_protocol::Command;
//!
//! let cmd = Command::from_byte(b'6');
//! assert_eq!(cmd, Command::Write { tck: true, tms: true, tdi: false });
//! assert_eq!(Command::from_byte(b'x'), Command::Unknown(b'x'));
//! ```
//!
//! ### Answering a Read Request
//!
//! ```
//! use rbb_protocol::{Logic, Reply};
//!
//! let tdo = Logic::H;
//! let mut buffer = Vec::new();
//! Reply::from(tdo.to_bit()).write_to(&mut buffer).expect("Writing to vector shouldn't fail");
//! assert_eq!(buffer, b"1");
//! ```
//!
//! ## Error Handling
//!
//! This library uses the [`error::ReadError`] type for protocol parsing errors.
//! Note that every byte is a valid command, only replies can be malformed.
//!
//! ## Async Support
//!
//! With the `tokio` feature enabled, [`tokio_codec`] provides the framing codec used by
//! asynchronous debugger clients.

pub mod protocol;
pub use protocol::*;
pub mod codec;
pub mod error;
pub mod logic;
pub use logic::Logic;
#[cfg(feature = "tokio")]
pub mod tokio_codec;
