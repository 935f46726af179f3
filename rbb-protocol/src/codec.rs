/// Read and write implementations for the protocol messages
use std::io::{self, Read, Write};

use crate::{
    error::ReadError,
    protocol::{Command, Reply},
};

impl Command {
    const BLINK_ON: u8 = b'B';
    const BLINK_OFF: u8 = b'b';
    const READ: u8 = b'R';
    const QUIT: u8 = b'Q';
    const WRITE_BASE: u8 = b'0';
    const RESET_BASE: u8 = b'r';

    /// Decodes a single command byte. Every byte decodes, bytes outside of the
    /// command set become [Command::Unknown].
    pub fn from_byte(byte: u8) -> Command {
        match byte {
            Self::BLINK_ON => Command::Blink { on: true },
            Self::BLINK_OFF => Command::Blink { on: false },
            Self::READ => Command::Read,
            Self::QUIT => Command::Quit,
            b'0'..=b'7' => Command::write_from_bits(byte - Self::WRITE_BASE),
            b'r'..=b'u' => Command::reset_from_bits(byte - Self::RESET_BASE),
            other => Command::Unknown(other),
        }
    }

    /// The wire representation of this command.
    pub fn to_byte(&self) -> u8 {
        match *self {
            Command::Blink { on: true } => Self::BLINK_ON,
            Command::Blink { on: false } => Self::BLINK_OFF,
            Command::Read => Self::READ,
            Command::Quit => Self::QUIT,
            Command::Write { tck, tms, tdi } => {
                Self::WRITE_BASE + ((tck as u8) << 2 | (tms as u8) << 1 | tdi as u8)
            }
            Command::Reset { trst, srst } => Self::RESET_BASE + ((trst as u8) << 1 | srst as u8),
            Command::Unknown(byte) => byte,
        }
    }

    /// Reads exactly one command. Blocks if the reader blocks.
    pub fn from_reader(reader: &mut impl Read) -> Result<Command, ReadError> {
        let mut buf = [0u8; 1];
        reader.read_exact(&mut buf)?;
        Ok(Command::from_byte(buf[0]))
    }

    pub fn write_to(&self, writer: &mut impl Write) -> io::Result<()> {
        writer.write_all(&[self.to_byte()])
    }
}

impl Reply {
    const LOW: u8 = b'0';
    const HIGH: u8 = b'1';

    pub fn from_byte(byte: u8) -> Result<Reply, ReadError> {
        match byte {
            Self::LOW => Ok(Reply::Low),
            Self::HIGH => Ok(Reply::High),
            other => Err(ReadError::InvalidReply(other)),
        }
    }

    pub fn to_byte(&self) -> u8 {
        match self {
            Reply::Low => Self::LOW,
            Reply::High => Self::HIGH,
        }
    }

    pub fn from_reader(reader: &mut impl Read) -> Result<Reply, ReadError> {
        let mut buf = [0u8; 1];
        reader.read_exact(&mut buf)?;
        Reply::from_byte(buf[0])
    }

    pub fn write_to(&self, writer: &mut impl Write) -> io::Result<()> {
        writer.write_all(&[self.to_byte()])
    }
}
