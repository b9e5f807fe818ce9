use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::entropy::{shannon_entropy, EntropyBase};
use crate::error::EngineError;
use crate::results::AlgorithmOutcome;

pub mod brotli;
pub mod flate;
pub mod lz4;
pub mod snappy;
pub mod xz;
pub mod zstd;

/// Flags controlling the observable side effects of an invocation. None of
/// them change the returned measurements.
#[derive(Debug, Clone, Default)]
pub struct ExecutionConfig {
    /// Persist `<file>.compressed` / `<file>.decompressed` artifacts
    pub write_output_files: bool,
    /// Print a progress line per invocation
    pub print_progress: bool,
    /// Print per-invocation size/ratio statistics
    pub print_statistics: bool,
}

/// The codec-execution capability: one call benchmarks one algorithm
/// against one file. Implemented by [`CodecEngine`] in production and by
/// deterministic fakes in tests.
pub trait Engine {
    /// Runs `algorithm` over the file at `path` and reports the measured
    /// outcome. A returned outcome always has `failed == false`; failures
    /// are the `Err` branch.
    fn execute(
        &self,
        algorithm: &str,
        path: &Path,
        config: &ExecutionConfig,
    ) -> Result<AlgorithmOutcome, EngineError>;
}

/// A whole-file compressor binding.
pub trait Codec {
    fn name(&self) -> &'static str;

    /// Compresses `data` into a fresh buffer.
    fn compress(&self, data: &[u8]) -> io::Result<Vec<u8>>;

    /// Decompresses `data`. `original_len` is the size of the pre-compression
    /// input, for codecs whose format does not carry it.
    fn decompress(&self, data: &[u8], original_len: usize) -> io::Result<Vec<u8>>;
}

/// Algorithm identifiers understood by [`CodecEngine`], in suite order.
pub const ALGORITHMS: &[&str] = &[
    "deflate", "gzip", "zlib", "zstd", "lz4", "snappy", "brotli", "xz",
];

/// Resolves an algorithm identifier to its codec binding.
pub fn codec_by_name(name: &str) -> Option<Box<dyn Codec>> {
    match name {
        "deflate" => Some(Box::new(flate::DeflateCodec)),
        "gzip" => Some(Box::new(flate::GzipCodec)),
        "zlib" => Some(Box::new(flate::ZlibCodec)),
        "zstd" => Some(Box::new(zstd::ZstdCodec)),
        "lz4" => Some(Box::new(lz4::Lz4Codec)),
        "snappy" => Some(Box::new(snappy::SnappyCodec)),
        "brotli" => Some(Box::new(brotli::BrotliCodec)),
        "xz" => Some(Box::new(xz::XzCodec)),
        _ => None,
    }
}

/// Production engine over the bundled codec bindings.
///
/// For each invocation it reads the file, times the compression, computes
/// the entropy of both byte streams, then decompresses and compares
/// against the original to establish losslessness.
#[derive(Debug, Default)]
pub struct CodecEngine;

impl CodecEngine {
    pub fn new() -> Self {
        CodecEngine
    }
}

impl Engine for CodecEngine {
    fn execute(
        &self,
        algorithm: &str,
        path: &Path,
        config: &ExecutionConfig,
    ) -> Result<AlgorithmOutcome, EngineError> {
        let codec = codec_by_name(algorithm)
            .ok_or_else(|| EngineError::UnknownAlgorithm(algorithm.to_string()))?;

        let contents = fs::read(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let entropy_before = shannon_entropy(&contents, EntropyBase::Nats);

        let codec_err = |source| EngineError::Codec {
            algorithm: algorithm.to_string(),
            source,
        };

        // === Compression ===
        let start = Instant::now();
        let compressed = codec.compress(&contents).map_err(codec_err)?;
        let time_taken = start.elapsed();

        let ratio = if contents.is_empty() {
            0.0
        } else {
            compressed.len() as f64 / contents.len() as f64
        };
        let entropy_after = shannon_entropy(&compressed, EntropyBase::Nats);

        // === Lossless check ===
        let decompressed = codec.decompress(&compressed, contents.len()).map_err(codec_err)?;
        let lossless = decompressed == contents;

        if config.write_output_files {
            write_artifact(path, "compressed", &compressed)?;
            write_artifact(path, "decompressed", &decompressed)?;
        }

        if config.print_statistics {
            println!(
                "{}: {} -> {} bytes (ratio {:.4}), lossless: {}",
                algorithm,
                contents.len(),
                compressed.len(),
                ratio,
                lossless
            );
        }

        Ok(AlgorithmOutcome {
            algorithm: algorithm.to_string(),
            ratio,
            time_taken,
            entropy_before,
            entropy_after,
            lossless,
            failed: false,
        })
    }
}

fn write_artifact(input: &Path, suffix: &str, contents: &[u8]) -> Result<(), EngineError> {
    let mut name = input.as_os_str().to_owned();
    name.push(".");
    name.push(suffix);
    let artifact = PathBuf::from(name);
    fs::write(&artifact, contents).map_err(|source| EngineError::Io {
        path: artifact,
        source,
    })
}
