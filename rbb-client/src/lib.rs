//! # Remote Bitbang Client
//!
//! A Rust client library for connecting to remote bitbang servers and driving the
//! pins of a JTAG test access port, the same way OpenOCD's `remote_bitbang` adapter does.
//!
//! ## Overview
//!
//! This crate provides a small interface on top of the single-byte commands of the
//! protocol. It comes in two flavours: [`RbbClient`] for blocking code and
//! [`AsyncRbbClient`] for tokio.
//!
//! ## Protocol Support
//!
//! - **Write**: Set TCK, TMS and TDI
//! - **Reset**: Set TRST and SRST
//! - **Read**: Sample TDO
//! - **Blink**: Toggle the activity LED
//! - **Quit**: Close the session
//!
//! For detailed protocol information, see the [`rbb_protocol`] crate.
//!
//! ## Basic Usage
//!
//! ```ignore
//! use rbb_client::RbbClient;
//!
//! let mut client = RbbClient::connect("/tmp/cosim_jtag.sock")?;
//!
//! // Release both resets and clock TMS=1 five times to reach Test-Logic-Reset
//! client.reset(false, false)?;
//! for _ in 0..5 {
//!     client.clock(true, false)?;
//! }
//! client.quit()?;
//! ```
//!
//! ## Related Crates
//!
//! - [`rbb_bridge`](../rbb_bridge/index.html) - Simulation side of the protocol
//! - [`rbb_protocol`] - Protocol encoding/decoding
use std::{
    io,
    os::unix::net::UnixStream,
    path::Path,
    time::Duration,
};

use bytes::BytesMut;
use rbb_protocol::{Command, Reply, error::ReadError, tokio_codec::ClientCodec};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_util::codec::{Decoder, Encoder};

/// Remote bitbang client for blocking code.
pub struct RbbClient {
    stream: UnixStream,
}

impl RbbClient {
    pub fn connect(path: impl AsRef<Path>) -> io::Result<RbbClient> {
        Ok(RbbClient {
            stream: UnixStream::connect(path)?,
        })
    }

    /// Limit how long [`RbbClient::read`] waits for the server.
    pub fn set_read_timeout(&self, timeout: Option<Duration>) -> io::Result<()> {
        self.stream.set_read_timeout(timeout)
    }

    pub fn send(&mut self, command: Command) -> io::Result<()> {
        command.write_to(&mut self.stream)
    }

    pub fn blink(&mut self, on: bool) -> io::Result<()> {
        self.send(Command::Blink { on })
    }

    pub fn write(&mut self, tck: bool, tms: bool, tdi: bool) -> io::Result<()> {
        self.send(Command::Write { tck, tms, tdi })
    }

    pub fn reset(&mut self, trst: bool, srst: bool) -> io::Result<()> {
        self.send(Command::Reset { trst, srst })
    }

    /// Sample TDO.
    pub fn read(&mut self) -> Result<bool, ReadError> {
        self.send(Command::Read)?;
        Reply::from_reader(&mut self.stream).map(bool::from)
    }

    /// Perform one full TCK cycle with the given TMS and TDI.
    ///
    /// # Returns
    ///
    /// TDO as sampled while TCK is low, before the rising edge.
    pub fn clock(&mut self, tms: bool, tdi: bool) -> Result<bool, ReadError> {
        self.write(false, tms, tdi)?;
        let tdo = self.read()?;
        self.write(true, tms, tdi)?;
        Ok(tdo)
    }

    /// End the session. The server closes its end and waits for the next client.
    pub fn quit(mut self) -> io::Result<()> {
        self.send(Command::Quit)
    }
}

/// Remote bitbang client for tokio.
pub struct AsyncRbbClient {
    stream: tokio::net::UnixStream,
    codec: ClientCodec,
    read_buf: BytesMut,
    write_buf: BytesMut,
}

impl AsyncRbbClient {
    pub async fn connect(path: impl AsRef<Path>) -> io::Result<AsyncRbbClient> {
        Ok(AsyncRbbClient {
            stream: tokio::net::UnixStream::connect(path).await?,
            codec: ClientCodec,
            read_buf: BytesMut::with_capacity(8),
            write_buf: BytesMut::with_capacity(8),
        })
    }

    pub async fn send(&mut self, command: Command) -> io::Result<()> {
        self.codec.encode(command, &mut self.write_buf)?;
        self.stream.write_all_buf(&mut self.write_buf).await
    }

    pub async fn write(&mut self, tck: bool, tms: bool, tdi: bool) -> io::Result<()> {
        self.send(Command::Write { tck, tms, tdi }).await
    }

    pub async fn reset(&mut self, trst: bool, srst: bool) -> io::Result<()> {
        self.send(Command::Reset { trst, srst }).await
    }

    /// Sample TDO.
    pub async fn read(&mut self) -> Result<bool, ReadError> {
        self.send(Command::Read).await?;
        loop {
            if let Some(reply) = self.codec.decode(&mut self.read_buf)? {
                return Ok(reply.is_high());
            }
            if self.stream.read_buf(&mut self.read_buf).await? == 0 {
                return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
            }
        }
    }

    /// See [`RbbClient::clock`].
    pub async fn clock(&mut self, tms: bool, tdi: bool) -> Result<bool, ReadError> {
        self.write(false, tms, tdi).await?;
        let tdo = self.read().await?;
        self.write(true, tms, tdi).await?;
        Ok(tdo)
    }

    pub async fn quit(mut self) -> io::Result<()> {
        self.send(Command::Quit).await
    }
}
