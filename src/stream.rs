//! File-oriented byte-stream wrapper driving the block codec over a
//! `Read`/`Write` pair, built on the symbol packer (§4.10) and a CRC32
//! trailer (§4.13). Grounded in `schifra_reed_solomon_file_encoder.hpp` /
//! `_decoder.hpp`, expressed as a thin adapter over [`crate::encoder::Encoder`]
//! and [`crate::decoder::Decoder`] rather than a re-specified subsystem.

use std::io::{Read, Write};

use crate::block::Block;
use crate::crc32::crc32;
use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::RsError;
use crate::symbol;

/// Reads the whole of `input`, encodes it in fixed-size blocks, and writes
/// `u64_le(length) || [data_bytes crc32_be fec_bytes]*` to `output`.
///
/// The stream is fully buffered on encode (the length header must precede
/// the blocks); this trades true streaming for a simple, robust framing,
/// consistent with this being a convenience wrapper rather than a
/// performance-sensitive path (§5).
pub fn encode_stream<R: Read, W: Write>(encoder: &Encoder, m: u32, input: &mut R, output: &mut W) -> Result<(), RsError> {
    let mut plaintext = Vec::new();
    input.read_to_end(&mut plaintext)?;

    output.write_all(&(plaintext.len() as u64).to_le_bytes())?;

    let k = encoder.k();
    let data_chunk_bytes = symbol_byte_len(m, k);

    for chunk in plaintext.chunks(data_chunk_bytes) {
        let mut padded = chunk.to_vec();
        padded.resize(data_chunk_bytes, 0);
        let symbols = symbol::unpack(m, &padded, k)?;

        let mut block = Block::from_data(&symbols, encoder.r());
        encoder.encode(&mut block)?;

        let data_bytes = symbol::pack(m, block.data())?;
        let fec_bytes = symbol::pack(m, block.fec())?;

        output.write_all(&data_bytes)?;
        output.write_all(&crc32(&data_bytes).to_be_bytes())?;
        output.write_all(&fec_bytes)?;
    }

    Ok(())
}

/// Inverse of [`encode_stream`]: decodes each block, verifies its CRC32
/// against the corrected data, and writes exactly the original `length`
/// bytes (dropping the final block's zero padding).
pub fn decode_stream<R: Read, W: Write>(decoder: &Decoder, m: u32, input: &mut R, output: &mut W) -> Result<(), RsError> {
    let mut len_buf = [0u8; 8];
    input.read_exact(&mut len_buf)?;
    let total_len = u64::from_le_bytes(len_buf) as usize;

    let k = decoder.k();
    let data_chunk_bytes = symbol_byte_len(m, k);
    let fec_chunk_bytes = symbol_byte_len(m, decoder.r());

    let mut written = 0usize;
    let mut data_buf = vec![0u8; data_chunk_bytes];
    let mut crc_buf = [0u8; 4];
    let mut fec_buf = vec![0u8; fec_chunk_bytes];

    while written < total_len {
        input.read_exact(&mut data_buf)?;
        input.read_exact(&mut crc_buf)?;
        input.read_exact(&mut fec_buf)?;

        let data_symbols = symbol::unpack(m, &data_buf, k)?;
        let fec_symbols = symbol::unpack(m, &fec_buf, decoder.r())?;

        let mut block = Block::from_data(&data_symbols, decoder.r());
        block.fec_mut().copy_from_slice(&fec_symbols);

        let decoded_ok = decoder.decode(&mut block, &[]).unwrap_or(false);

        let corrected_bytes = symbol::pack(m, block.data())?;
        let expected_crc = u32::from_be_bytes(crc_buf);
        if decoded_ok && crc32(&corrected_bytes) != expected_crc {
            log::warn!("decode_stream: CRC32 mismatch on a block the decoder reported as recovered");
            return Err(RsError::ChecksumMismatch);
        }

        let remaining = total_len - written;
        let take = remaining.min(corrected_bytes.len());
        output.write_all(&corrected_bytes[..take])?;
        written += take;
    }

    Ok(())
}

fn symbol_byte_len(m: u32, count: usize) -> usize {
    ((count as u64 * m as u64 + 7) / 8) as usize
}
