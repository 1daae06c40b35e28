use crate::{Error, Result};

/// Most bytes a VarInt may occupy on the wire. 32 bits of payload fit in
/// five 7-bit groups.
pub const MAX_VARINT_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedVarInt {
    pub value: u32,
    pub size: usize,
}

/// Encodes `value` as a minimal-length VarInt: 7 data bits per byte,
/// continuation bit set on every byte except the last.
pub fn write_var_int(value: u32) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(MAX_VARINT_LEN);
    let mut val = value;
    loop {
        let mut byte = (val & 0x7f) as u8;
        val >>= 7;
        if val != 0 {
            byte |= 0x80;
        }
        bytes.push(byte);
        if val == 0 {
            break;
        }
    }
    bytes
}

/// Decodes a VarInt starting at `offset`.
///
/// `Ok(None)` means the buffer ran out before a terminating byte showed up
/// and the caller should wait for more data. A fifth byte that still has its
/// continuation bit set can never terminate inside the 32-bit bound, so that
/// case is a `Framing` error rather than another "incomplete".
pub fn read_var_int(buf: &[u8], offset: usize) -> Result<Option<DecodedVarInt>> {
    let mut value: u32 = 0;
    for i in 0..MAX_VARINT_LEN {
        let Some(&byte) = buf.get(offset + i) else {
            return Ok(None);
        };
        value |= u32::from(byte & 0x7f) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok(Some(DecodedVarInt { value, size: i + 1 }));
        }
    }
    Err(Error::Framing(format!(
        "VarInt did not terminate within {} bytes",
        MAX_VARINT_LEN
    )))
}
