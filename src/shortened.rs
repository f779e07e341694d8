//! Shortened-code wrapper: runs a natural-length `(2^m - 1, r)` codec
//! against a virtually zero-padded block, per `schifra_reed_solomon_encoder.hpp`'s
//! `shortened_encoder`/`shortened_decoder`.

use crate::block::Block;
use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::RsError;

/// Encodes a `(k, r)` block as if it were padded up to the field's natural
/// length `2^m - 1`, without actually transmitting the padding.
pub struct ShortenedEncoder {
    inner: Encoder,
    k: usize,
    padding: usize,
}

impl ShortenedEncoder {
    pub fn new(inner: Encoder, k: usize) -> Result<Self, RsError> {
        let natural_k = inner.k();
        if k > natural_k {
            return Err(RsError::InvalidGeometry { n: k + inner.r(), r: inner.r() });
        }
        Ok(ShortenedEncoder { inner, k, padding: natural_k - k })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn r(&self) -> usize {
        self.inner.r()
    }

    pub fn encode(&self, block: &mut Block) -> Result<(), RsError> {
        let mut natural = Block::new(self.inner.k(), self.inner.r());
        natural.data_mut()[self.padding..].copy_from_slice(block.data());
        self.inner.encode(&mut natural)?;
        block.fec_mut().copy_from_slice(natural.fec());
        Ok(())
    }
}

/// Decoder counterpart of [`ShortenedEncoder`].
pub struct ShortenedDecoder {
    inner: Decoder,
    k: usize,
    padding: usize,
}

impl ShortenedDecoder {
    pub fn new(inner: Decoder, k: usize) -> Result<Self, RsError> {
        let natural_k = inner.k();
        if k > natural_k {
            return Err(RsError::InvalidGeometry { n: k + inner.r(), r: inner.r() });
        }
        Ok(ShortenedDecoder { inner, k, padding: natural_k - k })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn r(&self) -> usize {
        self.inner.r()
    }

    pub fn decode(&self, block: &mut Block, erasures: &[usize]) -> Result<bool, RsError> {
        let mut natural = Block::new(self.inner.k(), self.inner.r());
        natural.data_mut()[self.padding..].copy_from_slice(block.data());
        natural.fec_mut().copy_from_slice(block.fec());

        let shifted: Vec<usize> = erasures.iter().map(|&e| e + self.padding).collect();

        let result = self.inner.decode(&mut natural, &shifted);
        block.data_mut().copy_from_slice(&natural.data()[self.padding..]);
        block.fec_mut().copy_from_slice(natural.fec());
        block.diagnostics = natural.diagnostics.clone();
        result
    }
}
