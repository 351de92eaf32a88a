//! Stub codec for class identities.
//!
//! Only identity-bearing fields are persisted: class name, display name,
//! superclass name and alias name, in that order, followed by the flags.
//! Interfaces and kind flags are not stored; the decoded class recovers them
//! from the index on first use.
//!
//! ## Wire format
//!
//! ```text
//! name     := 0x00                       -- absent
//!           | 0x01 len:uleb128 utf8[len] -- present
//! stub     := class_name var_name super_class_name alias_name flags:uleb128
//! ```

use crate::class_type::{ClassRef, ClassType};
use crate::synthetic::create_serialized_class;
use crate::types::ClassFlags;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const ABSENT: u8 = 0;
const PRESENT: u8 = 1;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("unexpected end of stub data at byte {offset}")]
    UnexpectedEof { offset: usize },

    #[error("invalid presence tag {tag:#04x} at byte {offset}")]
    InvalidTag { tag: u8, offset: usize },

    #[error("string at byte {offset} is not valid UTF-8")]
    InvalidUtf8 { offset: usize },

    #[error("varint at byte {offset} does not fit in 32 bits")]
    VarintOverflow { offset: usize },

    #[error("class stub has no class name")]
    MissingClassName,

    #[error("name of {len} bytes is too long for a stub")]
    NameTooLong { len: usize },
}

/// The persisted fields of a class identity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassStub {
    pub class_name: Option<String>,
    pub var_name: Option<String>,
    pub super_class_name: Option<String>,
    pub alias_name: Option<String>,
    pub flags: u32,
}

impl ClassStub {
    /// Snapshot of the fields `cls` holds right now. Lazy init is not forced.
    pub fn of(cls: &ClassType) -> Self {
        Self {
            class_name: Some(cls.class_name().to_string()),
            var_name: Some(cls.var_name().to_string()),
            super_class_name: cls.super_class_name(),
            alias_name: cls.alias_name(),
            flags: cls.flags().bits(),
        }
    }

    pub fn write(&self, out: &mut StubWriter) -> Result<(), CodecError> {
        out.write_name(self.class_name.as_deref())?;
        out.write_name(self.var_name.as_deref())?;
        out.write_name(self.super_class_name.as_deref())?;
        out.write_name(self.alias_name.as_deref())?;
        out.write_varint(self.flags);
        Ok(())
    }

    pub fn read(input: &mut StubReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            class_name: input.read_name()?,
            var_name: input.read_name()?,
            super_class_name: input.read_name()?,
            alias_name: input.read_name()?,
            flags: input.read_varint()?,
        })
    }

    /// Rebuild the class through the shared factory.
    pub fn into_class(self) -> Result<ClassRef, CodecError> {
        let class_name = self.class_name.ok_or(CodecError::MissingClassName)?;
        Ok(create_serialized_class(
            &class_name,
            self.var_name.as_deref(),
            self.super_class_name.as_deref(),
            self.alias_name.as_deref(),
            ClassFlags::from_bits_retain(self.flags),
        ))
    }
}

#[derive(Debug, Default)]
pub struct StubWriter {
    buf: Vec<u8>,
}

impl StubWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nothing is written when `name` is too long for a 32-bit length.
    pub fn write_name(&mut self, name: Option<&str>) -> Result<(), CodecError> {
        match name {
            None => self.buf.push(ABSENT),
            Some(name) => {
                let len = encoded_len(name.len())?;
                self.buf.push(PRESENT);
                self.write_varint(len);
                self.buf.extend_from_slice(name.as_bytes());
            }
        }
        Ok(())
    }

    pub fn write_varint(&mut self, mut value: u32) {
        loop {
            let byte = (value & 0x7f) as u8;
            value >>= 7;
            if value == 0 {
                self.buf.push(byte);
                return;
            }
            self.buf.push(byte | 0x80);
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

#[derive(Debug)]
pub struct StubReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> StubReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn read_byte(&mut self) -> Result<u8, CodecError> {
        let byte = *self
            .bytes
            .get(self.pos)
            .ok_or(CodecError::UnexpectedEof { offset: self.pos })?;
        self.pos += 1;
        Ok(byte)
    }

    pub fn read_varint(&mut self) -> Result<u32, CodecError> {
        let start = self.pos;
        let mut value: u32 = 0;
        let mut shift = 0;
        loop {
            let byte = self.read_byte()?;
            let low = u32::from(byte & 0x7f);
            if shift == 28 && low > 0x0f {
                return Err(CodecError::VarintOverflow { offset: start });
            }
            value |= low << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
            if shift > 28 {
                return Err(CodecError::VarintOverflow { offset: start });
            }
        }
    }

    pub fn read_name(&mut self) -> Result<Option<String>, CodecError> {
        let offset = self.pos;
        match self.read_byte()? {
            ABSENT => Ok(None),
            PRESENT => {
                let len = self.read_varint()? as usize;
                let start = self.pos;
                let end = start
                    .checked_add(len)
                    .filter(|end| *end <= self.bytes.len())
                    .ok_or(CodecError::UnexpectedEof {
                        offset: self.bytes.len(),
                    })?;
                let text = std::str::from_utf8(&self.bytes[start..end])
                    .map_err(|_| CodecError::InvalidUtf8 { offset: start })?;
                self.pos = end;
                Ok(Some(text.to_string()))
            }
            tag => Err(CodecError::InvalidTag { tag, offset }),
        }
    }
}

fn encoded_len(len: usize) -> Result<u32, CodecError> {
    u32::try_from(len).map_err(|_| CodecError::NameTooLong { len })
}

pub fn encode_class(cls: &ClassType) -> Result<Vec<u8>, CodecError> {
    let mut out = StubWriter::new();
    ClassStub::of(cls).write(&mut out)?;
    Ok(out.into_bytes())
}

pub fn decode_class(bytes: &[u8]) -> Result<ClassRef, CodecError> {
    let mut input = StubReader::new(bytes);
    ClassStub::read(&mut input)?.into_class()
}

#[cfg(test)]
#[path = "../tests/codec_tests.rs"]
mod tests;
