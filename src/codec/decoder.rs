//! The decoder state machine: bitstream reader + flag dispatcher + back-copy loop.

use byteorder::{BigEndian, ReadBytesExt};
use log::debug;

use super::bitstream::BitReader;
use crate::error::CodecErrors;

const TERMINATOR: u8 = 0x1F;
const FLAG_COPY_MODE2: u8 = 0x80;
const FLAG_COPY_RAW: u8 = 0xC0;

/// Decompress an LZKN1 stream back into its original bytes.
///
/// The first two bytes of `input` are a big-endian length `M`; the returned
/// buffer always has that many bytes when the returned [`CodecErrors`] is
/// empty. On a truncated or otherwise malformed stream, decoding stops as
/// soon as the violation is detected and the corresponding flag(s) are set;
/// the partial buffer is still returned, but its length is only meaningful
/// when no error flag is set.
pub fn decompress(input: &[u8]) -> (Vec<u8>, CodecErrors) {
    let mut errors = CodecErrors::empty();

    let declared_len = match (&input[..]).read_u16::<BigEndian>() {
        Ok(v) => v as usize,
        Err(_) => {
            errors |= CodecErrors::INBUFF_UNDERFLOW;
            return (Vec::new(), errors);
        }
    };

    let mut output: Vec<u8> = Vec::with_capacity(declared_len);
    let mut pos = 2usize;
    let mut reader = BitReader::new();
    let mut done = false;

    while !done && output.len() <= declared_len {
        let bit = match reader.read_bit(input, &mut pos) {
            Some(b) => b,
            None => {
                errors |= CodecErrors::INBUFF_UNDERFLOW;
                break;
            }
        };

        if bit == 0 {
            // RAW: copy one literal byte.
            match input.get(pos) {
                Some(&b) => {
                    output.push(b);
                    pos += 1;
                }
                None => {
                    errors |= CodecErrors::INBUFF_UNDERFLOW;
                    break;
                }
            }
            continue;
        }

        // FLAG: decode the following flag byte.
        let flag = match input.get(pos) {
            Some(&f) => {
                pos += 1;
                f
            }
            None => {
                errors |= CodecErrors::INBUFF_UNDERFLOW;
                break;
            }
        };

        if flag == TERMINATOR {
            done = true;
        } else if flag >= FLAG_COPY_RAW {
            let count = (flag - FLAG_COPY_RAW) as usize + 8;
            if pos + count > input.len() {
                errors |= CodecErrors::INBUFF_OVERFLOW;
                break;
            }
            output.extend_from_slice(&input[pos..pos + count]);
            pos += count;
        } else if flag >= FLAG_COPY_MODE2 {
            let disp = (flag & 0x0F) as usize;
            let count = ((flag >> 4) - 6) as usize;
            if !back_copy(&mut output, disp, count) {
                errors |= CodecErrors::OUTBUFF_OVERFLOW;
                break;
            }
        } else {
            // MODE1: one more byte holds the low 8 bits of the displacement.
            let lo = match input.get(pos) {
                Some(&b) => {
                    pos += 1;
                    b
                }
                None => {
                    errors |= CodecErrors::INBUFF_UNDERFLOW;
                    break;
                }
            };
            let disp = (lo as usize) | (((flag as usize) << 3) & 0x300);
            let count = (flag & 0x1F) as usize + 3;
            if !back_copy(&mut output, disp, count) {
                errors |= CodecErrors::OUTBUFF_OVERFLOW;
                break;
            }
        }
    }

    if output.len() < declared_len {
        errors |= CodecErrors::OUTBUFF_UNDERFLOW;
    } else if output.len() > declared_len {
        errors |= CodecErrors::OUTBUFF_OVERFLOW;
    }

    if pos < input.len() {
        errors |= CodecErrors::INBUFF_UNDERFLOW;
    } else if pos > input.len() {
        errors |= CodecErrors::INBUFF_OVERFLOW;
    }

    debug!(
        "decompress: {} -> {} bytes (declared {}), terminator at input offset {}",
        input.len(),
        output.len(),
        declared_len,
        pos
    );

    (output, errors)
}

/// Copy `count` bytes from `disp` positions before the current end of
/// `output` to its end, one byte at a time. The byte-by-byte order (rather
/// than a block copy) is what lets `disp < count` replicate a short run -
/// each freshly-copied byte becomes a valid source for the next.
fn back_copy(output: &mut Vec<u8>, disp: usize, count: usize) -> bool {
    if disp == 0 || disp > output.len() {
        return false;
    }
    for _ in 0..count {
        let src = output.len() - disp;
        let byte = output[src];
        output.push(byte);
    }
    true
}
