//! Error taxonomy for the codec.

use thiserror::Error;

/// Categorical error kind carried on a [`crate::block::Block`] after `encode`/`decode`,
/// mirrored 1:1 onto the variants of [`RsError`].
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    #[default]
    None,
    EncoderMisconfigured,
    EncoderBadGenerator,
    DecoderMisconfigured,
    DecoderSyndromeUnlocatable,
    DecoderTooManyErrors,
    DecoderBadSymbol,
    DecoderBadCodeword,
}

/// Every fallible operation in this crate returns one of these.
#[derive(Debug, Error)]
pub enum RsError {
    #[error("field exponent m = {m} is out of the supported range [2, 16]")]
    FieldExponentOutOfRange { m: u32 },

    #[error("primitive polynomial has {got} coefficients, expected {expected} for m = {m}")]
    PrimitivePolynomialWrongDegree { m: u32, expected: usize, got: usize },

    #[error("primitive polynomial for m = {m} is not primitive: index table did not fill all {size} nonzero symbols")]
    NotPrimitive { m: u32, size: u32 },

    #[error("full multiplication tables were requested for m = {m}, but that needs {bytes} bytes of memory; use log/anti-log tables instead")]
    TablesTooLarge { m: u32, bytes: u64 },

    #[error("generator polynomial root range [{i0}, {i0_plus_r}) exceeds field size {size}")]
    InvalidGenerator { i0: u32, i0_plus_r: u32, size: u32 },

    #[error("encoder misconfigured: field size {field_size} does not match codeword length N = {n}")]
    EncoderMisconfigured { field_size: u32, n: usize },

    #[error("encoder produced parities of degree {got}, expected {expected} (R - 1); generator or field mismatch")]
    EncoderBadGenerator { expected: usize, got: isize },

    #[error("decoder misconfigured: field size {field_size} does not match N = {n}, or erasure count {erasures} exceeds R = {r}")]
    DecoderMisconfigured { field_size: u32, n: usize, erasures: usize, r: usize },

    #[error("syndrome is non-zero but the error locator polynomial has no roots in range: unlocatable with this code")]
    DecoderSyndromeUnlocatable,

    #[error("2E + S = {two_e_plus_s} exceeds R = {r}: too many errors/erasures to correct")]
    DecoderTooManyErrors { two_e_plus_s: usize, r: usize },

    #[error("Forney denominator is zero at error location {location}: non-unique root, symbol is not correctable")]
    DecoderBadSymbol { location: usize },

    #[error("post-condition failed: deg(Lambda) = {lambda_deg} does not match errors_detected = {errors_detected}")]
    DecoderBadCodeword { lambda_deg: isize, errors_detected: usize },

    #[error("erasure list has duplicate position {position}")]
    DuplicateErasure { position: usize },

    #[error("erasure position {position} is out of range [0, {n})")]
    ErasureOutOfRange { position: usize, n: usize },

    #[error("code geometry invalid: N = {n}, R = {r} (need 0 < R < N)")]
    InvalidGeometry { n: usize, r: usize },

    #[error("erasure-channel fast path requires exactly R = {r} missing rows, got {got}")]
    WrongErasureCountForFastPath { r: usize, got: usize },

    #[error("symbol width m = {m} is not a supported packing width (expected one of 2, 4, 8, 16, 24)")]
    UnsupportedPackingWidth { m: u32 },

    #[error("I/O error while streaming a block: {0}")]
    Io(#[from] std::io::Error),

    #[error("checksum mismatch after decode: the block's CRC32 disagrees even though the decoder reported success")]
    ChecksumMismatch,
}

impl From<ErrorKind> for &'static str {
    fn from(kind: ErrorKind) -> &'static str {
        match kind {
            ErrorKind::None => "none",
            ErrorKind::EncoderMisconfigured => "encoder-misconfigured",
            ErrorKind::EncoderBadGenerator => "encoder-bad-generator",
            ErrorKind::DecoderMisconfigured => "decoder-misconfigured",
            ErrorKind::DecoderSyndromeUnlocatable => "decoder-syndrome-unlocatable",
            ErrorKind::DecoderTooManyErrors => "decoder-too-many-errors",
            ErrorKind::DecoderBadSymbol => "decoder-bad-symbol",
            ErrorKind::DecoderBadCodeword => "decoder-bad-codeword",
        }
    }
}
