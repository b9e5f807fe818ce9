//! Remote corpus acquisition: blocking HTTP download plus optional zip
//! extraction, behind the [`Fetcher`] capability trait.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::CorpusError;

/// One remote resource: a URL and whether the payload is an archive to be
/// unpacked into individual corpus files.
#[derive(Debug, Clone)]
pub struct RemoteSource {
    pub url: String,
    pub extract_archive: bool,
}

impl RemoteSource {
    pub fn new(url: impl Into<String>, extract_archive: bool) -> Self {
        RemoteSource {
            url: url.into(),
            extract_archive,
        }
    }
}

/// Capability boundary for remote retrieval. Production code uses
/// [`HttpFetcher`]; tests substitute a local fake.
pub trait Fetcher {
    /// Retrieves `url` into `dest`, returning the local files produced.
    /// With `extract_archive` set, the payload is unpacked and the archive
    /// itself discarded; otherwise the single downloaded file is returned.
    fn fetch(
        &self,
        url: &str,
        extract_archive: bool,
        dest: &Path,
    ) -> Result<Vec<PathBuf>, CorpusError>;
}

/// Blocking HTTP fetcher.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        HttpFetcher {
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(
        &self,
        url: &str,
        extract_archive: bool,
        dest: &Path,
    ) -> Result<Vec<PathBuf>, CorpusError> {
        let fetch_err = |source| CorpusError::Fetch {
            url: url.to_string(),
            source,
        };

        debug!(url, "downloading remote resource");
        let response = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(fetch_err)?;
        let payload = response.bytes().map_err(fetch_err)?;

        let local_path = dest.join(filename_from_url(url));
        fs::write(&local_path, &payload).map_err(|source| CorpusError::Io {
            path: local_path.clone(),
            source,
        })?;

        if !extract_archive {
            return Ok(vec![local_path]);
        }

        let extracted = match extract_zip(&local_path, dest) {
            Ok(paths) => paths,
            Err(e) => {
                let _ = fs::remove_file(&local_path);
                return Err(e);
            }
        };
        fs::remove_file(&local_path).map_err(|source| CorpusError::Io {
            path: local_path.clone(),
            source,
        })?;
        Ok(extracted)
    }
}

/// Last path segment of the URL, with any query string stripped.
fn filename_from_url(url: &str) -> String {
    let trimmed = url.split(['?', '#']).next().unwrap_or(url);
    trimmed
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("download")
        .to_string()
}

/// Unpacks a zip archive into `dest`, returning the extracted file paths.
/// Entries with unsafe names (absolute or parent-escaping) are skipped.
/// On failure, files extracted so far are removed again, so a broken
/// archive never leaves fragments in the corpus.
pub fn extract_zip(archive_path: &Path, dest: &Path) -> Result<Vec<PathBuf>, CorpusError> {
    let mut extracted = Vec::new();
    match extract_zip_into(archive_path, dest, &mut extracted) {
        Ok(()) => Ok(extracted),
        Err(e) => {
            for path in &extracted {
                let _ = fs::remove_file(path);
            }
            Err(e)
        }
    }
}

fn extract_zip_into(
    archive_path: &Path,
    dest: &Path,
    extracted: &mut Vec<PathBuf>,
) -> Result<(), CorpusError> {
    let extract_err = |source| CorpusError::Extract {
        path: archive_path.to_path_buf(),
        source,
    };

    let file = File::open(archive_path).map_err(|source| CorpusError::Io {
        path: archive_path.to_path_buf(),
        source,
    })?;
    let mut archive = zip::ZipArchive::new(file).map_err(extract_err)?;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(extract_err)?;
        if entry.is_dir() {
            continue;
        }

        let Some(relative) = entry.enclosed_name() else {
            warn!(name = entry.name(), "skipping unsafe archive entry");
            continue;
        };
        let out_path = dest.join(relative);

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent).map_err(|source| CorpusError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut out = File::create(&out_path).map_err(|source| CorpusError::Io {
            path: out_path.clone(),
            source,
        })?;
        io::copy(&mut entry, &mut out).map_err(|source| CorpusError::Io {
            path: out_path.clone(),
            source,
        })?;
        extracted.push(out_path);
    }

    Ok(())
}

/// The Canterbury corpus archives used as the default download set.
pub fn canterbury_sources() -> Vec<RemoteSource> {
    [
        "http://corpus.canterbury.ac.nz/resources/cantrbry.zip",
        "http://corpus.canterbury.ac.nz/resources/artificl.zip",
        "http://corpus.canterbury.ac.nz/resources/large.zip",
        "http://corpus.canterbury.ac.nz/resources/misc.zip",
        "http://corpus.canterbury.ac.nz/resources/calgary.zip",
    ]
    .iter()
    .map(|url| RemoteSource::new(*url, true))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn build_archive(path: &Path, entries: &[(&str, &[u8])]) {
        let file = File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        for (name, contents) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(contents).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn extract_zip_unpacks_every_file() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("bundle.zip");
        build_archive(&archive, &[("alpha.txt", b"alpha"), ("beta.txt", b"beta")]);

        let mut extracted = extract_zip(&archive, dir.path()).unwrap();
        extracted.sort();
        assert_eq!(extracted.len(), 2);
        assert_eq!(fs::read(&extracted[0]).unwrap(), b"alpha");
        assert_eq!(fs::read(&extracted[1]).unwrap(), b"beta");
    }

    #[test]
    fn filename_from_url_takes_the_last_segment() {
        assert_eq!(
            filename_from_url("http://corpus.canterbury.ac.nz/resources/cantrbry.zip"),
            "cantrbry.zip"
        );
        assert_eq!(filename_from_url("http://host/file.bin?token=1"), "file.bin");
        assert_eq!(filename_from_url("http://host/"), "download");
    }
}
