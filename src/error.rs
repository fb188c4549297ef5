//! Error types for the LZKN1 codec.
//!
//! The codec's own failure signal is a *set* of independent conditions
//! ([`CodecErrors`]) rather than a single error, because buffer-boundary
//! problems can co-occur - a malformed stream can simultaneously overflow
//! the output and underflow the input on the same step. [`LzknError`] wraps
//! that set (and a few CLI-only conditions) for callers that want an
//! ordinary `std::error::Error`.

use bitflags::bitflags;
use thiserror::Error;

bitflags! {
    /// Independent failure conditions a single `compress`/`decompress` call
    /// can raise. Any combination may be set together; the caller should
    /// only trust the returned buffer's length when this is empty.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CodecErrors: u32 {
        /// The decoder could not allocate the output buffer.
        const ALLOC_FAILED = 0x1;
        /// The encoder or decoder read past the end of the input buffer.
        const INBUFF_OVERFLOW = 0x2;
        /// The decoder reached the terminator before consuming all input.
        const INBUFF_UNDERFLOW = 0x4;
        /// The decoder produced more bytes than the header declared.
        const OUTBUFF_OVERFLOW = 0x8;
        /// The decoder reached the terminator before reaching the declared length.
        const OUTBUFF_UNDERFLOW = 0x10;
    }
}

/// Errors surfaced by the CLI and library entry points on top of the raw
/// [`CodecErrors`] mask.
#[derive(Debug, Error)]
pub enum LzknError {
    /// `compress` was given an input longer than the format's 16-bit length field allows.
    #[error("input is {0} bytes, but the LZKN1 header can only address up to 65535")]
    InputTooLarge(usize),

    /// `decompress` detected one or more boundary violations in the stream.
    #[error("corrupt LZKN1 stream: {0:?}")]
    Corrupt(CodecErrors),

    /// A file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
