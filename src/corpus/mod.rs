use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::entropy::{shannon_entropy, EntropyBase};
use crate::error::{CorpusError, FileSystemError};

pub mod generate;
pub mod remote;
pub mod sniff;

use generate::GeneratorSpec;
use remote::{Fetcher, RemoteSource};

/// Metadata for a single corpus file.
///
/// Size, type and entropy are read once at construction and never
/// invalidated; the underlying file must not be mutated while the
/// descriptor is alive.
#[derive(Debug, Clone)]
pub struct FileDescriptor {
    path: PathBuf,
    size: u64,
    mime_type: String,
    entropy: f64,
}

impl FileDescriptor {
    /// Reads the file at `path` and computes its metadata.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, CorpusError> {
        let path = path.into();
        let contents = fs::read(&path).map_err(|source| CorpusError::Io {
            path: path.clone(),
            source,
        })?;

        let entropy = shannon_entropy(&contents, EntropyBase::Nats);
        let mime_type = sniff::mime_type(&contents).to_string();
        let size = contents.len() as u64;

        Ok(FileDescriptor {
            path,
            size,
            mime_type,
            entropy,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name component, used as the identifier in serialized records.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn entropy(&self) -> f64 {
        self.entropy
    }
}

/// Owns the corpus directory and the lifecycle of every file in it.
///
/// All operations work on explicit full paths; the process working
/// directory is never consulted or changed.
pub struct CorpusManager {
    dir: PathBuf,
}

impl CorpusManager {
    /// Opens (creating if needed) the corpus directory.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, CorpusError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| CorpusError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(CorpusManager { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Lists the regular files currently present in the corpus directory,
    /// sorted by name. Re-invocable; reflects the on-disk state each call.
    pub fn discover(&self) -> Result<Vec<PathBuf>, CorpusError> {
        let entries = fs::read_dir(&self.dir).map_err(|source| CorpusError::Discover {
            path: self.dir.clone(),
            source,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| CorpusError::Discover {
                path: self.dir.clone(),
                source,
            })?;
            let file_type = entry.file_type().map_err(|source| CorpusError::Discover {
                path: entry.path(),
                source,
            })?;
            if file_type.is_file() {
                files.push(entry.path());
            }
        }

        // Sorted order keeps runs deterministic regardless of readdir order.
        files.sort();
        Ok(files)
    }

    /// Deletes every listed file before a fresh run. Unlike final cleanup,
    /// a failure here is fatal: the run must not start over a corpus it
    /// could not clear.
    pub fn reset(&self, files: &[PathBuf]) -> Result<(), FileSystemError> {
        for path in files {
            fs::remove_file(path).map_err(|source| FileSystemError {
                path: path.clone(),
                source,
            })?;
        }
        Ok(())
    }

    /// Runs each generator its requested number of times, appending the
    /// produced paths to `produced` as they materialize, so the caller's
    /// cleanup scope covers them even when a later generator fails. The
    /// first generator failure aborts assembly.
    pub fn generate(
        &self,
        specs: &mut [GeneratorSpec],
        produced: &mut Vec<PathBuf>,
    ) -> Result<(), CorpusError> {
        for spec in specs {
            for _ in 0..spec.quantity {
                let path = spec
                    .generator
                    .generate(&self.dir)
                    .map_err(|source| CorpusError::Generate {
                        name: spec.generator.name().to_string(),
                        source,
                    })?;
                debug!(path = %path.display(), "generated corpus file");
                produced.push(path);
            }
        }
        Ok(())
    }

    /// Fetches each remote source into the corpus directory, extracting
    /// archives where flagged and appending the resulting paths to
    /// `produced`. The first fetch failure aborts assembly.
    pub fn acquire_remote(
        &self,
        fetcher: &dyn Fetcher,
        sources: &[RemoteSource],
        produced: &mut Vec<PathBuf>,
    ) -> Result<(), CorpusError> {
        for source in sources {
            let mut paths = fetcher.fetch(&source.url, source.extract_archive, &self.dir)?;
            debug!(url = %source.url, files = paths.len(), "acquired remote resource");
            produced.append(&mut paths);
        }
        Ok(())
    }

    /// Builds descriptors for the assembled paths.
    pub fn describe(&self, paths: &[PathBuf]) -> Result<Vec<FileDescriptor>, CorpusError> {
        paths.iter().map(FileDescriptor::new).collect()
    }

    /// Removes the underlying file of every descriptor, returning how many
    /// were actually deleted. A file that is already gone indicates a
    /// broken invariant somewhere else, so it is reported as an anomaly,
    /// but never fails the run.
    pub fn cleanup(&self, files: &[FileDescriptor]) -> usize {
        let mut removed = 0;
        for file in files {
            if remove_reporting_anomalies(file.path()) {
                removed += 1;
            }
        }
        removed
    }
}

/// Shared removal primitive for cleanup paths: returns whether the file
/// was deleted, logging anomalies instead of failing.
pub(crate) fn remove_reporting_anomalies(path: &Path) -> bool {
    match fs::remove_file(path) {
        Ok(()) => true,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "cleanup anomaly: file already removed");
            false
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cleanup failed to remove file");
            false
        }
    }
}
