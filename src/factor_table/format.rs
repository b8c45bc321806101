/*
 * This file is part of the factor-engine package.
 *
 * For the full copyright and license information, please view the LICENSE
 * file that was distributed with this source code.
 */

//! C10's on-disk layout (§4.10.5, §6): a fixed 12-byte little-endian
//! header followed by a bit-packed payload. `byteorder` handles the
//! header words; the payload is packed and unpacked by hand since it's a
//! stream of fixed-width sub-byte entries rather than aligned integers.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

use crate::error::Error;

pub const HEADER_LEN: u64 = 12;

/// `format_id` is simply the entry bit width; it is opaque to callers but
/// stable across versions that claim the same width.
pub fn format_id_for(small: bool) -> u32 {
    entry_bit_width(small)
}

pub fn entry_bit_width(small: bool) -> u32 {
    if small {
        14
    } else {
        16
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub format_id: u32,
    pub entry_count: u32,
    pub payload_bytes: u32,
}

pub fn payload_byte_len(entry_count: u32, bits: u32) -> Result<u32, Error> {
    let total_bits = entry_count as u64 * bits as u64;
    let bytes = total_bits.div_ceil(8);
    u32::try_from(bytes).map_err(|_| Error::IntegerOverflow { byte_count: bytes })
}

pub fn write_header<W: Write>(w: &mut W, h: &Header) -> std::io::Result<()> {
    w.write_u32::<LittleEndian>(h.format_id)?;
    w.write_u32::<LittleEndian>(h.entry_count)?;
    w.write_u32::<LittleEndian>(h.payload_bytes)?;
    Ok(())
}

pub fn read_header<R: Read>(r: &mut R) -> std::io::Result<Header> {
    let format_id = r.read_u32::<LittleEndian>()?;
    let entry_count = r.read_u32::<LittleEndian>()?;
    let payload_bytes = r.read_u32::<LittleEndian>()?;
    Ok(Header {
        format_id,
        entry_count,
        payload_bytes,
    })
}

/// Reads the `bits`-wide entry at dense index `idx` from a little-endian
/// bit-packed payload (bit `b` of the stream lives at byte `b/8`, bit
/// `b%8`, LSB first).
pub fn get_bits(payload: &[u8], idx: usize, bits: u32) -> u32 {
    let start = idx as u64 * bits as u64;
    let mut value: u32 = 0;
    for b in 0..bits {
        let bitpos = start + b as u64;
        let byte = payload[(bitpos / 8) as usize];
        let bit = (byte >> (bitpos % 8)) & 1;
        value |= (bit as u32) << b;
    }
    value
}

/// Writes the `bits`-wide `value` at dense index `idx` into a
/// little-endian bit-packed payload.
pub fn set_bits(payload: &mut [u8], idx: usize, bits: u32, value: u32) {
    let start = idx as u64 * bits as u64;
    for b in 0..bits {
        let bitpos = start + b as u64;
        let bit = (value >> b) & 1;
        let byte_idx = (bitpos / 8) as usize;
        let bit_idx = (bitpos % 8) as u32;
        if bit == 1 {
            payload[byte_idx] |= 1 << bit_idx;
        } else {
            payload[byte_idx] &= !(1 << bit_idx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_packing_round_trips_at_every_width() {
        for bits in [14u32, 16] {
            let entry_count = 100usize;
            let mut payload = vec![0u8; payload_byte_len(entry_count as u32, bits).unwrap() as usize];
            let max_value = (1u32 << bits) - 1;
            for idx in 0..entry_count {
                let value = ((idx as u32).wrapping_mul(2654435761)) & max_value;
                set_bits(&mut payload, idx, bits, value);
            }
            for idx in 0..entry_count {
                let expect = ((idx as u32).wrapping_mul(2654435761)) & max_value;
                assert_eq!(get_bits(&payload, idx, bits), expect, "bits={bits} idx={idx}");
            }
        }
    }

    #[test]
    fn header_round_trips_through_bytes() {
        let h = Header {
            format_id: 16,
            entry_count: 12345,
            payload_bytes: 24690,
        };
        let mut buf = Vec::new();
        write_header(&mut buf, &h).unwrap();
        assert_eq!(buf.len(), HEADER_LEN as usize);
        let read_back = read_header(&mut &buf[..]).unwrap();
        assert_eq!(read_back, h);
    }
}
