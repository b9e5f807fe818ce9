use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A corpus file could not be removed from storage.
#[derive(Error, Debug)]
#[error("failed to remove {path}: {source}")]
pub struct FileSystemError {
    /// Path of the file that could not be removed
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Errors raised while assembling the corpus. All of these are fatal:
/// a partially built corpus produces misleading benchmarks, so nothing
/// is benchmarked once assembly has failed.
#[derive(Error, Debug)]
pub enum CorpusError {
    /// Scanning the corpus directory failed
    #[error("failed to scan corpus directory {path}: {source}")]
    Discover {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A file survived the fresh-start reset
    #[error(transparent)]
    Reset(#[from] FileSystemError),

    /// A synthetic-file generator failed
    #[error("generator '{name}' failed: {source}")]
    Generate {
        name: String,
        #[source]
        source: io::Error,
    },

    /// Downloading a remote resource failed
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A downloaded archive could not be extracted
    #[error("failed to extract archive {path}: {source}")]
    Extract {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// Reading or writing a corpus file failed
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors raised by a single engine invocation. The executor absorbs
/// these: each one becomes a failed outcome and the run continues.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The engine does not know the requested algorithm
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// Reading the input or writing an output artifact failed
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The codec itself rejected the data
    #[error("codec '{algorithm}' failed: {source}")]
    Codec {
        algorithm: String,
        #[source]
        source: io::Error,
    },
}

/// Errors crossing the `benchmark::run` boundary. Both variants trigger
/// scoped corpus cleanup before propagating.
#[derive(Error, Debug)]
pub enum RunError {
    /// Corpus assembly failed before any benchmarking started
    #[error(transparent)]
    Corpus(#[from] CorpusError),

    /// The finished report could not be persisted
    #[error("failed to persist benchmark report: {0}")]
    Report(#[source] io::Error),
}
