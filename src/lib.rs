/*!
# lzkn1

Lossless byte-stream codec for Konami's LZSS variant 1 (LZKN1), the compact
LZ77-family format used to pack ROM assets in several Konami titles.

The public surface is two pure operations:

- [`compress`] turns an arbitrary byte buffer (up to 65535 bytes) into a
  self-describing compressed stream.
- [`decompress`] turns a compressed stream back into the exact original
  bytes.

See [`codec`] for the encoder/decoder internals and [`error`] for the
failure-mode types both functions report through.
*/

pub mod codec;
pub mod error;
pub mod paths;

pub use codec::{compress, decompress, EncodeStats, MAX_INPUT_LEN};
pub use error::{CodecErrors, LzknError};
