//! Canonical binary encoding shared by every persisted formulator type.
//!
//! This is the consensus-level wire format named in the external
//! interfaces: a length-prefixed, fixed-byte-order encoding that every node
//! must reproduce bit-for-bit. It intentionally does not reuse an
//! interchange codec (CBOR/IPLD) — the format here is closer to the raw
//! byte-blob contract the chain store exposes than to a self-describing
//! object model.

use byteorder::{BigEndian, ByteOrder};
use thiserror::Error;

/// Failure to decode a previously-serialized value.
///
/// Any occurrence of this error while loading process/account data is a
/// `SerializationError` per the error taxonomy — persisted bytes that
/// cannot be decoded are always a fatal condition, never recovered locally.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("unexpected end of input while decoding")]
    UnexpectedEof,
    #[error("trailing {0} byte(s) after decoding a value")]
    TrailingBytes(usize),
    #[error("invalid tag byte {0:#04x}")]
    InvalidTag(u8),
    #[error("value out of range: {0}")]
    OutOfRange(&'static str),
}

/// A cursor over an immutable byte slice, used for sequential decoding.
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Reader { buf, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        if self.remaining() < n {
            return Err(CodecError::UnexpectedEof);
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.read_exact(1)?[0])
    }

    pub fn read_u32(&mut self) -> Result<u32, CodecError> {
        Ok(BigEndian::read_u32(self.read_exact(4)?))
    }

    pub fn read_u64(&mut self) -> Result<u64, CodecError> {
        Ok(BigEndian::read_u64(self.read_exact(8)?))
    }

    /// Confirms every byte of the input was consumed. Called once at the
    /// top level of every `ProcessData`/`AccountData` decode site so stray
    /// trailing bytes (truncated writes, a format skew between nodes)
    /// surface as a `SerializationError` instead of silently passing.
    pub fn finish(self) -> Result<(), CodecError> {
        if self.remaining() > 0 {
            Err(CodecError::TrailingBytes(self.remaining()))
        } else {
            Ok(())
        }
    }
}

/// A type that can be written in the canonical binary format.
pub trait Encode {
    fn encode(&self, out: &mut Vec<u8>);

    fn encode_to_vec(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode(&mut out);
        out
    }
}

/// A type that can be read back from the canonical binary format.
pub trait Decode: Sized {
    fn decode(r: &mut Reader<'_>) -> Result<Self, CodecError>;

    /// Decodes a complete, top-level value, rejecting trailing bytes.
    fn decode_exact(bytes: &[u8]) -> Result<Self, CodecError> {
        let mut r = Reader::new(bytes);
        let value = Self::decode(&mut r)?;
        r.finish()?;
        Ok(value)
    }
}

pub fn write_u8(out: &mut Vec<u8>, v: u8) {
    out.push(v);
}

pub fn write_u32(out: &mut Vec<u8>, v: u32) {
    let mut buf = [0u8; 4];
    BigEndian::write_u32(&mut buf, v);
    out.extend_from_slice(&buf);
}

pub fn write_u64(out: &mut Vec<u8>, v: u64) {
    let mut buf = [0u8; 8];
    BigEndian::write_u64(&mut buf, v);
    out.extend_from_slice(&buf);
}

impl Encode for u32 {
    fn encode(&self, out: &mut Vec<u8>) {
        write_u32(out, *self);
    }
}

impl Decode for u32 {
    fn decode(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        r.read_u32()
    }
}

impl Encode for u64 {
    fn encode(&self, out: &mut Vec<u8>) {
        write_u64(out, *self);
    }
}

impl Decode for u64 {
    fn decode(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        r.read_u64()
    }
}

impl Encode for bool {
    fn encode(&self, out: &mut Vec<u8>) {
        write_u8(out, if *self { 1 } else { 0 });
    }
}

impl Decode for bool {
    fn decode(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        match r.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(CodecError::InvalidTag(other)),
        }
    }
}
