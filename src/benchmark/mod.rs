use std::path::PathBuf;

use tracing::{debug, warn};

use crate::corpus::generate::GeneratorSpec;
use crate::corpus::remote::{Fetcher, RemoteSource};
use crate::corpus::{self, CorpusManager, FileDescriptor};
use crate::engine::{Engine, ExecutionConfig};
use crate::error::{CorpusError, RunError};
use crate::results::{self, AlgorithmOutcome, BenchmarkReport, SelectionPolicy};

/// Per-run settings.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Delete every pre-existing corpus file before assembly
    pub fresh: bool,
    /// Run the synthetic generators
    pub generate: bool,
    /// Fetch the remote sources
    pub download: bool,
    /// Remove every corpus file once the run finishes, however it finishes
    pub delete_at_end: bool,
    /// Side-effect flags forwarded to each engine invocation
    pub execution: ExecutionConfig,
    /// Best-outcome comparison policy
    pub policy: SelectionPolicy,
    /// Where to persist the JSON report; `None` keeps it in memory only
    pub report_path: Option<PathBuf>,
}

/// Runs every requested algorithm against every file, in the given order.
///
/// Each invocation yields exactly one outcome: an engine error is logged,
/// recorded as a failed outcome, and never aborts the loop. With N files
/// and M algorithms the result always holds N lists of M outcomes.
pub fn benchmark_files(
    files: &[FileDescriptor],
    algorithms: &[&str],
    engine: &dyn Engine,
    config: &ExecutionConfig,
) -> Vec<Vec<AlgorithmOutcome>> {
    let mut all_outcomes = Vec::with_capacity(files.len());

    for file in files {
        let mut outcomes = Vec::with_capacity(algorithms.len());
        for &algorithm in algorithms {
            if config.print_progress {
                println!("Running {} on {}", algorithm, file.name());
            }
            match engine.execute(algorithm, file.path(), config) {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    warn!(
                        algorithm,
                        file = %file.name(),
                        error = %e,
                        "algorithm invocation failed"
                    );
                    outcomes.push(AlgorithmOutcome::failure(algorithm));
                }
            }
        }
        all_outcomes.push(outcomes);
    }

    all_outcomes
}

/// Removes the tracked corpus files when dropped while armed. Dropping
/// happens on normal return, on `?` propagation and on unwind alike, so
/// no termination path of [`run`] leaks files.
struct CleanupGuard {
    files: Vec<PathBuf>,
    armed: bool,
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut removed = 0;
        for path in &self.files {
            if corpus::remove_reporting_anomalies(path) {
                removed += 1;
            }
        }
        debug!(removed, tracked = self.files.len(), "corpus cleanup finished");
    }
}

/// Executes a full benchmark run: assemble the corpus, measure every
/// (file, algorithm) pair, aggregate, and optionally persist the report.
///
/// Assembly failures abort before any benchmarking. Once benchmarking has
/// started, per-invocation failures are absorbed into the report; only a
/// failure to persist the finished report propagates. With
/// `delete_at_end` set, every file the run touched — discovered,
/// generated or downloaded — is removed on the way out, regardless of
/// which path the run takes.
pub fn run(
    manager: &CorpusManager,
    generators: &mut [GeneratorSpec],
    fetcher: &dyn Fetcher,
    downloads: &[RemoteSource],
    engine: &dyn Engine,
    algorithms: &[&str],
    opts: &RunOptions,
) -> Result<BenchmarkReport, RunError> {
    let mut tracked = CleanupGuard {
        files: Vec::new(),
        armed: opts.delete_at_end,
    };

    // === Corpus assembly ===
    let discovered = manager.discover()?;
    if opts.fresh {
        manager.reset(&discovered).map_err(CorpusError::from)?;
    } else {
        tracked.files.extend(discovered);
    }

    if opts.generate {
        manager.generate(generators, &mut tracked.files)?;
    }
    if opts.download {
        manager.acquire_remote(fetcher, downloads, &mut tracked.files)?;
    }

    let descriptors = manager.describe(&tracked.files)?;
    debug!(files = descriptors.len(), algorithms = algorithms.len(), "corpus assembled");

    // === Benchmarking ===
    let outcome_lists = benchmark_files(&descriptors, algorithms, engine, &opts.execution);

    // === Aggregation ===
    let sets = results::collect(&descriptors, outcome_lists);
    let report = results::to_report(&sets, opts.policy);

    if opts.execution.print_statistics {
        results::print_report(&report);
    }

    if let Some(path) = &opts.report_path {
        results::write_report(&report, path).map_err(RunError::Report)?;
    }

    Ok(report)
}
