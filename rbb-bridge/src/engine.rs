//! The remote bitbang command interpreter.
use std::io::{Read, Write};

use rbb_protocol::{Command, Reply};

use crate::{
    error::{BridgeError, is_transient},
    state::SignalState,
};

/// What a single engine step did.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Nothing was pending on the stream
    Idle,
    /// One command was consumed and applied
    Applied(Command),
    /// The remote sent a quit command, the connection should be closed
    Quit,
    /// The remote closed its end of the stream without quitting
    Closed,
}

/// Consumes at most one command byte from `stream` and applies it to `state`.
///
/// `stream` must be non-blocking; a read that would block is not an error and leaves
/// everything untouched. `tdo` is only used to answer a read request.
pub fn step<S: Read + Write>(
    stream: &mut S,
    tdo: bool,
    state: &mut SignalState,
) -> Result<Outcome, BridgeError> {
    let mut buf = [0u8; 1];
    match stream.read(&mut buf) {
        Ok(0) => return Ok(Outcome::Closed),
        Ok(_) => {}
        Err(e) if is_transient(&e) => return Ok(Outcome::Idle),
        Err(e) => return Err(BridgeError::Read(e)),
    }

    log::trace!("Received byte 0x{:02x}", buf[0]);
    let command = Command::from_byte(buf[0]);
    log::debug!("Command: {}", command);
    match command {
        Command::Blink { .. } | Command::Unknown(_) => {}
        Command::Read => {
            let reply = Reply::from(tdo);
            reply.write_to(stream).map_err(BridgeError::Write)?;
            log::trace!("Replied {:?}", reply);
        }
        Command::Quit => return Ok(Outcome::Quit),
        Command::Write { tck, tms, tdi } => state.set_jtag(tck, tms, tdi),
        Command::Reset { trst, srst } => state.set_reset(trst, srst),
    }
    Ok(Outcome::Applied(command))
}
