//! End-to-end runs over a temporary corpus with deterministic fake
//! collaborators: a scripted engine and a local fetcher.

use std::cell::Cell;
use std::fs;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::time::Duration;

use corpus_benchmark_rs::benchmark::{run, RunOptions};
use corpus_benchmark_rs::corpus::generate::{GeneratorSpec, NoiseGenerator};
use corpus_benchmark_rs::corpus::remote::Fetcher;
use corpus_benchmark_rs::corpus::CorpusManager;
use corpus_benchmark_rs::engine::{Engine, ExecutionConfig};
use corpus_benchmark_rs::error::{CorpusError, EngineError};
use corpus_benchmark_rs::results::AlgorithmOutcome;

/// Generate `len` deterministic bytes using a simple LCG.
fn pseudo_random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = seed;
    (0..len)
        .map(|_| {
            rng = rng
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (rng >> 56) as u8
        })
        .collect()
}

/// `x` succeeds with ratio 0.5, `y` always raises.
struct FakeEngine;

impl Engine for FakeEngine {
    fn execute(
        &self,
        algorithm: &str,
        _path: &Path,
        _config: &ExecutionConfig,
    ) -> Result<AlgorithmOutcome, EngineError> {
        if algorithm == "y" {
            return Err(EngineError::UnknownAlgorithm(algorithm.to_string()));
        }
        Ok(AlgorithmOutcome {
            algorithm: algorithm.to_string(),
            ratio: 0.5,
            time_taken: Duration::from_millis(2),
            entropy_before: 3.0,
            entropy_after: 4.0,
            lossless: true,
            failed: false,
        })
    }
}

/// Panics partway through the run, simulating a failure of the
/// benchmarking machinery itself rather than of a single algorithm.
struct ExplodingEngine {
    calls_before_panic: Cell<usize>,
}

impl Engine for ExplodingEngine {
    fn execute(
        &self,
        algorithm: &str,
        _path: &Path,
        _config: &ExecutionConfig,
    ) -> Result<AlgorithmOutcome, EngineError> {
        let remaining = self.calls_before_panic.get();
        if remaining == 0 {
            panic!("engine lost its mind");
        }
        self.calls_before_panic.set(remaining - 1);
        Ok(AlgorithmOutcome {
            algorithm: algorithm.to_string(),
            ratio: 0.9,
            time_taken: Duration::from_millis(1),
            entropy_before: 1.0,
            entropy_after: 1.0,
            lossless: true,
            failed: false,
        })
    }
}

/// Fetcher that writes fixed local files instead of touching the network.
struct LocalFetcher;

impl Fetcher for LocalFetcher {
    fn fetch(
        &self,
        url: &str,
        _extract_archive: bool,
        dest: &Path,
    ) -> Result<Vec<PathBuf>, CorpusError> {
        let name = url.rsplit('/').next().unwrap();
        let path = dest.join(name);
        fs::write(&path, b"remote payload").map_err(|source| CorpusError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(vec![path])
    }
}

fn no_generators() -> Vec<GeneratorSpec> {
    Vec::new()
}

#[test]
fn end_to_end_run_selects_best_and_cleans_up() {
    let dir = tempfile::tempdir().unwrap();
    let manager = CorpusManager::new(dir.path()).unwrap();

    let path_a = dir.path().join("a.bin");
    let path_b = dir.path().join("b.bin");
    fs::write(&path_a, pseudo_random_bytes(1024, 42)).unwrap();
    fs::write(&path_b, vec![0u8; 1024]).unwrap();

    let out_dir = tempfile::tempdir().unwrap();
    let report_path = out_dir.path().join("data.json");
    let opts = RunOptions {
        delete_at_end: true,
        report_path: Some(report_path.clone()),
        ..Default::default()
    };

    let report = run(
        &manager,
        &mut no_generators(),
        &LocalFetcher,
        &[],
        &FakeEngine,
        &["x", "y"],
        &opts,
    )
    .unwrap();

    assert_eq!(report.files.len(), 2);
    for record in &report.files {
        assert_eq!(record.results.len(), 2);
        assert_eq!(record.results[0].engine, "x");
        assert!(!record.results[0].failed);
        assert_eq!(record.results[1].engine, "y");
        assert!(record.results[1].failed);

        let best = record.best_result.as_ref().unwrap();
        assert_eq!(best.engine, "x");
        assert_eq!(best.compressed_ratio, 0.5);
    }

    // Discovery is name-sorted, so a.bin comes first.
    assert_eq!(report.files[0].name, "a.bin");
    assert_eq!(report.files[1].name, "b.bin");
    assert!(report.files[0].entropy > 0.0);
    assert_eq!(report.files[1].entropy, 0.0);

    // Scoped cleanup removed the corpus; the report itself survives.
    assert!(!path_a.exists());
    assert!(!path_b.exists());
    assert!(report_path.exists());

    let written = fs::read_to_string(&report_path).unwrap();
    assert!(written.contains("\"files\""));
}

#[test]
fn cleanup_runs_even_when_the_benchmark_phase_panics() {
    let dir = tempfile::tempdir().unwrap();
    let manager = CorpusManager::new(dir.path()).unwrap();

    let path_a = dir.path().join("a.bin");
    let path_b = dir.path().join("b.bin");
    fs::write(&path_a, b"first").unwrap();
    fs::write(&path_b, b"second").unwrap();

    let engine = ExplodingEngine {
        calls_before_panic: Cell::new(1),
    };
    let opts = RunOptions {
        delete_at_end: true,
        ..Default::default()
    };

    let result = catch_unwind(AssertUnwindSafe(|| {
        run(
            &manager,
            &mut no_generators(),
            &LocalFetcher,
            &[],
            &engine,
            &["x"],
            &opts,
        )
    }));

    assert!(result.is_err());
    assert!(!path_a.exists());
    assert!(!path_b.exists());
}

#[test]
fn all_failed_outcomes_serialize_best_as_explicit_null() {
    let dir = tempfile::tempdir().unwrap();
    let manager = CorpusManager::new(dir.path()).unwrap();
    fs::write(dir.path().join("doomed.bin"), b"payload").unwrap();

    let report = run(
        &manager,
        &mut no_generators(),
        &LocalFetcher,
        &[],
        &FakeEngine,
        &["y", "y"],
        &RunOptions::default(),
    )
    .unwrap();

    let record = &report.files[0];
    assert_eq!(record.results.len(), 2);
    assert!(record.best_result.is_none());

    let value = serde_json::to_value(&report).unwrap();
    let best = value
        .get("files")
        .and_then(|f| f.get(0))
        .and_then(|r| r.get("best_result"))
        .expect("best_result field must be present");
    assert!(best.is_null());
}

#[test]
fn fresh_run_resets_the_corpus_before_generating() {
    let dir = tempfile::tempdir().unwrap();
    let manager = CorpusManager::new(dir.path()).unwrap();
    let stale = dir.path().join("stale.bin");
    fs::write(&stale, b"left over from a previous run").unwrap();

    let mut generators = vec![GeneratorSpec::new(
        NoiseGenerator::with_len_range(9, 64, 128),
        2,
    )];
    let opts = RunOptions {
        fresh: true,
        generate: true,
        ..Default::default()
    };

    let report = run(
        &manager,
        &mut generators,
        &LocalFetcher,
        &[],
        &FakeEngine,
        &["x"],
        &opts,
    )
    .unwrap();

    assert!(!stale.exists());
    assert_eq!(report.files.len(), 2);
    for record in &report.files {
        assert!(record.name.ends_with(".bin"));
        assert_eq!(record.best_result.as_ref().unwrap().engine, "x");
    }
}

#[test]
fn downloaded_files_are_benchmarked_and_cleaned() {
    let dir = tempfile::tempdir().unwrap();
    let manager = CorpusManager::new(dir.path()).unwrap();

    let sources = vec![corpus_benchmark_rs::corpus::remote::RemoteSource::new(
        "http://example.org/remote.bin",
        false,
    )];
    let opts = RunOptions {
        download: true,
        delete_at_end: true,
        ..Default::default()
    };

    let report = run(
        &manager,
        &mut no_generators(),
        &LocalFetcher,
        &sources,
        &FakeEngine,
        &["x"],
        &opts,
    )
    .unwrap();

    assert_eq!(report.files.len(), 1);
    assert_eq!(report.files[0].name, "remote.bin");
    assert!(!dir.path().join("remote.bin").exists());
}
