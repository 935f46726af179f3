use std::fmt::Display;

/// A Command is transfered from the client (the debugger) to the server (the simulation).
/// Every command is exactly one byte on the wire. Only [Command::Read] is answered,
/// all other commands are fire-and-forget.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Command {
    /// Switches the (virtual) activity LED on or off. Servers without a LED ignore it.
    Blink { on: bool },
    /// Requests the current value of TDO. The server answers with a single [Reply].
    Read,
    /// The client is about to close the connection.
    Quit,
    /// Drives TCK, TMS and TDI to the given levels.
    Write { tck: bool, tms: bool, tdi: bool },
    /// Drives the TAP reset (TRST) and system reset (SRST) lines. Both are active high.
    Reset { trst: bool, srst: bool },
    /// Any byte outside of the command set. Servers must ignore it.
    Unknown(u8),
}

impl Command {
    /// Creates a write command from the three low bits of `value`.
    /// Bit 2 maps to TCK, bit 1 to TMS and bit 0 to TDI.
    pub fn write_from_bits(value: u8) -> Command {
        Command::Write {
            tck: value & 0b100 != 0,
            tms: value & 0b010 != 0,
            tdi: value & 0b001 != 0,
        }
    }

    /// Creates a reset command from the two low bits of `value`.
    /// Bit 1 maps to TRST and bit 0 to SRST.
    pub fn reset_from_bits(value: u8) -> Command {
        Command::Reset {
            trst: value & 0b10 != 0,
            srst: value & 0b01 != 0,
        }
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Blink { on } => write!(f, "blink {}", if *on { "on" } else { "off" }),
            Command::Read => write!(f, "read"),
            Command::Quit => write!(f, "quit"),
            Command::Write { tck, tms, tdi } => write!(
                f,
                "write tck={} tms={} tdi={}",
                *tck as u8, *tms as u8, *tdi as u8
            ),
            Command::Reset { trst, srst } => {
                write!(f, "reset trst={} srst={}", *trst as u8, *srst as u8)
            }
            Command::Unknown(byte) => write!(f, "unknown 0x{:02x}", byte),
        }
    }
}

/// The answer of the server to a [Command::Read].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Reply {
    Low,
    High,
}

impl Reply {
    pub fn is_high(&self) -> bool {
        matches!(self, Reply::High)
    }
}

impl From<bool> for Reply {
    fn from(value: bool) -> Self {
        if value { Reply::High } else { Reply::Low }
    }
}

impl From<Reply> for bool {
    fn from(value: Reply) -> Self {
        value.is_high()
    }
}
