//! Reed-Solomon error-correcting codes over GF(2^m), m in 2..=16.
//!
//! A caller constructs a [`field::Field`], builds a [`generator::build_generator`]
//! polynomial over it, and derives an [`encoder::Encoder`]/[`decoder::Decoder`]
//! pair sharing that field. [`block::Block`] is the per-call working record;
//! [`shortened::ShortenedEncoder`]/[`ShortenedDecoder`] wrap a natural-length
//! codec for `K' < K`, and [`erasure_channel`] turns a square stack of
//! codewords into a whole-row erasure code via [`interleaver`].
//!
//! `symbol`/`crc32`/`stream` are the file-wrapper convenience layer; they sit
//! on top of the codec rather than inside its correctness contract.

pub mod block;
pub mod crc32;
pub mod decoder;
pub mod encoder;
pub mod erasure_channel;
pub mod error;
pub mod field;
pub mod field_element;
pub mod generator;
pub mod interleaver;
pub mod polynomial;
pub mod shortened;
pub mod stream;
pub mod symbol;
#[cfg(test)]
mod validator;

pub use block::Block;
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::{ErrorKind, RsError};
pub use field::{Field, TableMode};
pub use field_element::FieldElement;
pub use generator::build_generator;
pub use polynomial::FieldPolynomial;
