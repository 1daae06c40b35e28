use crate::varint::{read_var_int, write_var_int};
use crate::{Error, Result};

/// Hard cap on a declared packet length. A status response is a few KiB of
/// JSON plus an optional favicon; anything past this is a corrupt stream and
/// must not grow the receive buffer without bound.
pub const MAX_PACKET_LEN: usize = 2 * 1024 * 1024;

const HANDSHAKE_ID: u32 = 0x00;
const STATUS_REQUEST_ID: u32 = 0x00;
const NEXT_STATE_STATUS: u32 = 0x01;

/// One complete packet extracted from a receive buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub payload: Vec<u8>,
    /// Length prefix plus payload, so the caller knows how much of the
    /// buffer to discard.
    pub consumed: usize,
}

/// Concatenates `parts` and prepends the VarInt length of the result.
pub fn frame(parts: &[&[u8]]) -> Vec<u8> {
    let payload_len: usize = parts.iter().map(|p| p.len()).sum();
    let mut packet = write_var_int(payload_len as u32);
    packet.reserve(payload_len);
    for part in parts {
        packet.extend_from_slice(part);
    }
    packet
}

/// Protocol string: VarInt byte length followed by UTF-8 bytes, no terminator.
pub fn write_string(value: &str) -> Vec<u8> {
    let mut bytes = write_var_int(value.len() as u32);
    bytes.extend_from_slice(value.as_bytes());
    bytes
}

/// Tries to slice one complete packet off the front of `buf`.
///
/// Pure over the buffer snapshot: `Ok(None)` while either the length prefix
/// or the declared payload has not fully arrived yet.
pub fn try_extract_one(buf: &[u8]) -> Result<Option<Frame>> {
    let Some(prefix) = read_var_int(buf, 0)? else {
        return Ok(None);
    };
    let declared = prefix.value as usize;
    if declared > MAX_PACKET_LEN {
        return Err(Error::Framing(format!(
            "declared packet length {} exceeds the {} byte limit",
            declared, MAX_PACKET_LEN
        )));
    }
    if buf.len() < prefix.size + declared {
        return Ok(None);
    }
    Ok(Some(Frame {
        payload: buf[prefix.size..prefix.size + declared].to_vec(),
        consumed: prefix.size + declared,
    }))
}

/// Handshake declaring the claimed protocol version, the target address and
/// next state 1 (status).
pub fn handshake(protocol_version: u32, host: &str, port: u16) -> Vec<u8> {
    frame(&[
        &write_var_int(HANDSHAKE_ID),
        &write_var_int(protocol_version),
        &write_string(host),
        &port.to_be_bytes(),
        &write_var_int(NEXT_STATE_STATUS),
    ])
}

/// Status request: packet id 0x00 and nothing else.
pub fn status_request() -> Vec<u8> {
    frame(&[&write_var_int(STATUS_REQUEST_ID)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_round_trip() {
        let payload = b"some payload bytes".to_vec();
        let framed = frame(&[&payload]);
        let extracted = try_extract_one(&framed).unwrap().unwrap();
        assert_eq!(extracted.payload, payload);
        assert_eq!(extracted.consumed, framed.len());
    }

    #[test]
    fn test_frame_empty_payload() {
        let framed = frame(&[]);
        assert_eq!(framed, vec![0x00]);
        let extracted = try_extract_one(&framed).unwrap().unwrap();
        assert!(extracted.payload.is_empty());
        assert_eq!(extracted.consumed, 1);
    }

    #[test]
    fn test_partial_buffer_every_split_point() {
        let framed = frame(&[b"status json goes here", &[0xab; 300]]);
        for split in 0..framed.len() {
            assert_eq!(
                try_extract_one(&framed[..split]).unwrap(),
                None,
                "prefix of {} bytes should be incomplete",
                split
            );
        }
        let extracted = try_extract_one(&framed).unwrap().unwrap();
        assert_eq!(extracted.consumed, framed.len());
    }

    #[test]
    fn test_two_packets_in_one_buffer() {
        let mut buf = frame(&[b"first"]);
        buf.extend(frame(&[b"second"]));
        let first = try_extract_one(&buf).unwrap().unwrap();
        assert_eq!(first.payload, b"first");
        let second = try_extract_one(&buf[first.consumed..]).unwrap().unwrap();
        assert_eq!(second.payload, b"second");
        assert_eq!(first.consumed + second.consumed, buf.len());
    }

    #[test]
    fn test_oversized_declared_length() {
        let buf = crate::varint::write_var_int((MAX_PACKET_LEN + 1) as u32);
        assert!(matches!(try_extract_one(&buf), Err(Error::Framing(_))));
    }

    #[test]
    fn test_handshake_layout() {
        // id 0, protocol 767, "play", port 25565, next state 1
        let packet = handshake(767, "play", 25565);
        let expected = vec![
            0x0b, // payload length
            0x00, // handshake id
            0xff, 0x05, // 767
            0x04, b'p', b'l', b'a', b'y', // host string
            0x63, 0xdd, // port, big endian
            0x01, // next state: status
        ];
        assert_eq!(packet, expected);
    }

    #[test]
    fn test_status_request_layout() {
        assert_eq!(status_request(), vec![0x01, 0x00]);
    }
}
