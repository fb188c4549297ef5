/*!
# Output path derivation

Small, pure helpers for turning an input path and the chosen [`Operation`]
into the output path the CLI should write to when the user didn't supply
one explicitly.
*/

use std::path::{Path, PathBuf};

/// Which of the three CLI operations is being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Compress,
    Decompress,
    /// Decompress then immediately recompress, used to regenerate `.lzkn1`
    /// assets after editing their uncompressed source files.
    Recompress,
}

/// Derive the output path for `input` under `op`, given an optional explicit
/// `output` argument.
///
/// - Compress: append `.lzkn1` to the input path.
/// - Decompress: append `.unc` to the input path.
/// - Recompress: overwrite the input path in place.
pub fn derive_output_path(input: &Path, output: Option<PathBuf>, op: Operation) -> PathBuf {
    if let Some(output) = output {
        return output;
    }
    match op {
        Operation::Compress => append_extension(input, "lzkn1"),
        Operation::Decompress => append_extension(input, "unc"),
        Operation::Recompress => input.to_path_buf(),
    }
}

fn append_extension(path: &Path, extra: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(extra);
    PathBuf::from(name)
}
