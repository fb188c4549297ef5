/*!
# LZKN1 codec core

Konami's LZSS variant 1: a compact LZ77-family format built from three
cooperating pieces, leaves first:

- [`bitstream`]: the interleaved description-bit protocol shared by encoder
  and decoder.
- [`matcher`]: the greedy longest-match search over the 1023-byte sliding
  window.
- [`encoder`] / [`decoder`]: the state machines that drive the above two
  into a byte-exact compressed stream and back.

Compression is purely single-threaded, synchronous, and allocates only the
growing output `Vec<u8>` - no internal parallelism, no streaming interface,
the whole input must be resident at once.
*/

pub mod bitstream;
pub mod decoder;
pub mod encoder;
pub mod matcher;

pub use decoder::decompress;
pub use encoder::{compress, EncodeStats};

/// Largest input `compress` can address: the format's size header is a
/// 16-bit big-endian integer.
pub const MAX_INPUT_LEN: usize = u16::MAX as usize;
