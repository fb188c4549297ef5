/*!
# lzkn1 - Konami LZSS variant 1 compressor/decompressor

A small CLI around the [`lzkn1`] codec: compress a file, decompress one, or
recompress one (decompress then compress again) to regenerate a `.lzkn1`
asset after its uncompressed source changed.
*/

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;

// Use a faster memory allocator on Linux (optional optimization)
#[cfg(target_os = "linux")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use lzkn1::error::LzknError;
use lzkn1::paths::{derive_output_path, Operation};
use lzkn1::{compress, decompress, MAX_INPUT_LEN};

/// Command-line arguments. Exactly one of `-c`/`-d`/`-r` selects the
/// operation; if none is given, compression is the default.
#[derive(Parser)]
#[command(name = "lzkn1")]
#[command(author = "BGforge")]
#[command(version = "0.1.0")]
#[command(about = "Compress or decompress files in Konami's LZKN1 format")]
struct Cli {
    /// Compress `input_path` (default if no mode flag is given)
    #[arg(short = 'c', long, conflicts_with_all = ["decompress", "recompress"])]
    compress: bool,

    /// Decompress `input_path`
    #[arg(short = 'd', long, conflicts_with_all = ["compress", "recompress"])]
    decompress: bool,

    /// Decompress then recompress `input_path` (round-trips an existing asset)
    #[arg(short = 'r', long, conflicts_with_all = ["compress", "decompress"])]
    recompress: bool,

    /// Print the achieved compression ratio and per-mode emission counts to stderr
    #[arg(long)]
    stats: bool,

    /// Raise logging verbosity (equivalent to RUST_LOG=debug)
    #[arg(short = 'v', long)]
    verbose: bool,

    /// File to read
    input_path: PathBuf,

    /// File to write (derived from `input_path` if omitted)
    output_path: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let op = match (cli.compress, cli.decompress, cli.recompress) {
        (_, true, false) => Operation::Decompress,
        (_, false, true) => Operation::Recompress,
        _ => Operation::Compress,
    };
    log::info!("mode: {:?}", op);

    let output_path = derive_output_path(&cli.input_path, cli.output_path.clone(), op);

    let input = match std::fs::read(&cli.input_path) {
        Ok(data) => data,
        Err(e) => {
            log::error!("failed to read {}: {e}", cli.input_path.display());
            return Err(e).with_context(|| format!("failed to read {}", cli.input_path.display()));
        }
    };
    log::info!("read {} ({} bytes)", cli.input_path.display(), input.len());

    let result = match op {
        Operation::Compress => run_compress(&input, cli.stats)?,
        Operation::Decompress => run_decompress(&input)?,
        Operation::Recompress => {
            let (decoded, derrors) = decompress(&input);
            if !derrors.is_empty() {
                log::error!("{} failed to decompress cleanly: {derrors:?}", cli.input_path.display());
                bail!(LzknError::Corrupt(derrors));
            }
            run_compress(&decoded, cli.stats)?
        }
    };

    if let Err(e) = std::fs::write(&output_path, &result) {
        log::error!("failed to write {}: {e}", output_path.display());
        return Err(e).with_context(|| format!("failed to write {}", output_path.display()));
    }

    log::info!(
        "{} ({} bytes) -> {} ({} bytes)",
        cli.input_path.display(),
        input.len(),
        output_path.display(),
        result.len()
    );

    Ok(())
}

fn run_compress(input: &[u8], print_stats: bool) -> Result<Vec<u8>> {
    if input.len() > MAX_INPUT_LEN {
        log::error!("input is {} bytes, over the {} byte limit", input.len(), MAX_INPUT_LEN);
        bail!(LzknError::InputTooLarge(input.len()));
    }

    let (output, stats, errors) = compress(input);
    if !errors.is_empty() {
        log::warn!("compress produced a boundary violation: {errors:?}");
        bail!(LzknError::Corrupt(errors));
    }

    if print_stats {
        let ratio = if input.is_empty() {
            0.0
        } else {
            output.len() as f64 / input.len() as f64 * 100.0
        };
        eprintln!(
            "lzkn1: {} -> {} bytes ({:.1}%), mode1={} mode2={} raw_run={} raw_bit={}",
            input.len(),
            output.len(),
            ratio,
            stats.mode1_count,
            stats.mode2_count,
            stats.raw_run_count,
            stats.raw_bit_count
        );
    }

    Ok(output)
}

fn run_decompress(input: &[u8]) -> Result<Vec<u8>> {
    let (output, errors) = decompress(input);
    if !errors.is_empty() {
        log::warn!("decompress produced a boundary violation: {errors:?}");
        bail!(LzknError::Corrupt(errors));
    }
    Ok(output)
}
