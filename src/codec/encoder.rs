//! The encoder state machine: match finder + mode selector + raw-byte queue
//! + bitstream writer + terminator.

use byteorder::{BigEndian, WriteBytesExt};
use log::debug;

use super::bitstream::{BitWriter, FLAG, RAW};
use super::matcher::find_longest_match;
use crate::error::CodecErrors;

/// Maximum number of raw bytes a single RAW-run flag byte can carry
/// (`0xFF - 0xC0 + 8`... clamped by the 6-bit count field: `0x3F + 8`).
const MAX_RAW_RUN: usize = 0x47;
/// Above this many queued raw bytes a RAW-run flag is used instead of
/// individual RAW description bits.
const RAW_BIT_THRESHOLD: usize = 8;
/// Terminator flag byte. Numerically falls inside MODE1's range, but it's
/// reserved exclusively for end-of-stream - the decoder checks for it
/// before range-dispatching into MODE1/MODE2/RAW-run.
const TERMINATOR: u8 = 0x1F;

#[derive(Debug, Clone, Copy)]
enum SuggestedMode {
    Mode1 { displacement: u16, length: usize },
    Mode2 { displacement: u16, length: usize },
}

/// Per-invocation counts of what the encoder emitted, supplementing the raw
/// size/error-mask contract with the kind of summary the original test
/// harness printed when benchmarking compression across a batch of assets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeStats {
    pub mode1_count: usize,
    pub mode2_count: usize,
    pub raw_run_count: usize,
    pub raw_bit_count: usize,
}

fn classify(found: Option<super::matcher::Match>) -> Option<SuggestedMode> {
    let m = found?;
    if (2..=5).contains(&m.length) && m.displacement <= 15 {
        Some(SuggestedMode::Mode2 {
            displacement: m.displacement,
            length: m.length,
        })
    } else if m.length >= 3 {
        Some(SuggestedMode::Mode1 {
            displacement: m.displacement,
            length: m.length,
        })
    } else {
        None
    }
}

/// Compress `input` into a self-describing LZKN1 stream.
///
/// `input` must be at most 65535 bytes (the format's 16-bit length header
/// can't address more); callers should check this ahead of time, since
/// [`crate::error::LzknError::InputTooLarge`] is only raised at the CLI
/// layer. `INBUFF_OVERFLOW` in the returned [`CodecErrors`] should never be
/// set for well-formed input - it guards an invariant, not a real failure
/// mode.
pub fn compress(input: &[u8]) -> (Vec<u8>, EncodeStats, CodecErrors) {
    let n = input.len();
    let mut errors = CodecErrors::empty();

    let mut output = Vec::with_capacity(n + n / 8 + 16);
    output
        .write_u16::<BigEndian>(n as u16)
        .expect("writes to a Vec<u8> never fail");

    let mut writer = BitWriter::new();
    let mut stats = EncodeStats::default();
    let mut cursor = 0usize;
    let mut last_emit = 0usize;

    while cursor < n {
        let found = find_longest_match(input, cursor);
        let suggested = classify(found);

        let mut queued = cursor - last_emit;
        let is_last_step = cursor + 1 == n;
        let should_drain =
            (suggested.is_some() && queued >= 1) || queued >= MAX_RAW_RUN || is_last_step;

        if should_drain {
            if is_last_step {
                queued = n - last_emit;
            }

            if queued > RAW_BIT_THRESHOLD {
                writer.push(&mut output, FLAG);
                output.push(0xC0 | (queued - RAW_BIT_THRESHOLD) as u8);
                output.extend_from_slice(&input[last_emit..last_emit + queued]);
                last_emit += queued;
                stats.raw_run_count += 1;
            } else {
                for _ in 0..queued {
                    writer.push(&mut output, RAW);
                    output.push(input[last_emit]);
                    last_emit += 1;
                    stats.raw_bit_count += 1;
                }
            }
        }

        match suggested {
            Some(SuggestedMode::Mode1 {
                displacement,
                length,
            }) => {
                writer.push(&mut output, FLAG);
                let disp = displacement as u32;
                output.push((((disp & 0x300) >> 3) as u8) | ((length - 3) as u8));
                output.push((disp & 0xFF) as u8);
                cursor += length;
                last_emit = cursor;
                stats.mode1_count += 1;
            }
            Some(SuggestedMode::Mode2 {
                displacement,
                length,
            }) => {
                writer.push(&mut output, FLAG);
                output.push(0x80 | (displacement as u8 & 0x0F) | (((length - 2) as u8) << 4));
                cursor += length;
                last_emit = cursor;
                stats.mode2_count += 1;
            }
            None => {
                cursor += 1;
            }
        }
    }

    debug_assert_eq!(last_emit, cursor, "raw queue must be fully drained by a match emission or the final tail drain");

    if cursor > n {
        errors |= CodecErrors::INBUFF_OVERFLOW;
    }

    writer.push(&mut output, FLAG);
    output.push(TERMINATOR);

    debug!(
        "compress: {} -> {} bytes (mode1={}, mode2={}, raw_run={}, raw_bit={})",
        n,
        output.len(),
        stats.mode1_count,
        stats.mode2_count,
        stats.raw_run_count,
        stats.raw_bit_count
    );

    (output, stats, errors)
}
