//! Byte <-> m-bit symbol packing for the wire-level codec widths.
//!
//! Supports the widths a codeword actually uses in practice (m in
//! {2,4,8,16,24}); any other width is a configuration error the file
//! wrapper surfaces as [`RsError::UnsupportedPackingWidth`].

use crate::error::RsError;

/// Packs `symbols` (each `< 2^m`) into bytes per the wire convention for `m`.
pub fn pack(m: u32, symbols: &[u32]) -> Result<Vec<u8>, RsError> {
    match m {
        2 => Ok(pack_sub_byte(symbols, 4, 2)),
        4 => Ok(pack_sub_byte(symbols, 2, 4)),
        8 => Ok(symbols.iter().map(|&s| s as u8).collect()),
        16 => {
            let mut out = Vec::with_capacity(symbols.len() * 2);
            for &s in symbols {
                out.extend_from_slice(&(s as u16).to_le_bytes());
            }
            Ok(out)
        }
        24 => {
            let mut out = Vec::with_capacity(symbols.len() * 3);
            for &s in symbols {
                let b = s.to_le_bytes();
                out.extend_from_slice(&b[..3]);
            }
            Ok(out)
        }
        _ => Err(RsError::UnsupportedPackingWidth { m }),
    }
}

/// Unpacks `bytes` into `count` symbols of width `m`.
pub fn unpack(m: u32, bytes: &[u8], count: usize) -> Result<Vec<u32>, RsError> {
    match m {
        2 => Ok(unpack_sub_byte(bytes, count, 4, 2)),
        4 => Ok(unpack_sub_byte(bytes, count, 2, 4)),
        8 => Ok(bytes.iter().take(count).map(|&b| b as u32).collect()),
        16 => Ok(bytes
            .chunks_exact(2)
            .take(count)
            .map(|c| u16::from_le_bytes([c[0], c[1]]) as u32)
            .collect()),
        24 => Ok(bytes
            .chunks_exact(3)
            .take(count)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], 0]))
            .collect()),
        _ => Err(RsError::UnsupportedPackingWidth { m }),
    }
}

/// `symbols_per_byte` symbols of `bits` width each, low-order symbol first.
fn pack_sub_byte(symbols: &[u32], symbols_per_byte: usize, bits: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity((symbols.len() + symbols_per_byte - 1) / symbols_per_byte);
    for chunk in symbols.chunks(symbols_per_byte) {
        let mut byte = 0u8;
        for (i, &s) in chunk.iter().enumerate() {
            byte |= ((s as u8) & ((1u8 << bits) - 1)) << (i as u32 * bits);
        }
        out.push(byte);
    }
    out
}

fn unpack_sub_byte(bytes: &[u8], count: usize, symbols_per_byte: usize, bits: u32) -> Vec<u32> {
    let mut out = Vec::with_capacity(count);
    'outer: for &byte in bytes {
        for i in 0..symbols_per_byte {
            if out.len() == count {
                break 'outer;
            }
            out.push(((byte >> (i as u32 * bits)) & ((1u8 << bits) - 1)) as u32);
        }
    }
    out
}
