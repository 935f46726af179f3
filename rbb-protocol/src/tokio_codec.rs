//! [tokio_util::codec] implementation for the debugger side of a remote bitbang stream.
//!
//! Every frame is a single byte, so decoding never has to wait for more
//! than one byte to make progress.
use std::io;

use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::{
    error::ReadError,
    protocol::{Command, Reply},
};

/// Codec for the debugger side: encodes commands and decodes replies.
#[derive(Copy, Clone, Debug, Default)]
pub struct ClientCodec;

impl Encoder<Command> for ClientCodec {
    type Error = io::Error;

    fn encode(&mut self, item: Command, dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.put_u8(item.to_byte());
        Ok(())
    }
}

impl Decoder for ClientCodec {
    type Item = Reply;
    type Error = ReadError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if !src.has_remaining() {
            return Ok(None);
        }
        Reply::from_byte(src.get_u8()).map(Some)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn client_encodes_commands_byte_by_byte() {
        let mut buf = BytesMut::new();
        let mut codec = ClientCodec;
        codec.encode(Command::write_from_bits(6), &mut buf).unwrap();
        codec.encode(Command::Read, &mut buf).unwrap();
        assert_eq!(&buf[..], b"6R");
    }

    #[test]
    fn client_rejects_garbage_reply() {
        let mut buf = BytesMut::from(&b"?"[..]);
        assert!(matches!(
            ClientCodec.decode(&mut buf),
            Err(ReadError::InvalidReply(b'?'))
        ));
    }
}
