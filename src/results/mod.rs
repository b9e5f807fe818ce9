use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use prettytable::{row, Table};
use serde::{Deserialize, Serialize};

use crate::corpus::FileDescriptor;

/// The recorded result of applying one algorithm to one file.
///
/// When `failed` is true the invocation raised an error instead of
/// completing; the numeric fields are filler and carry no meaning for
/// ranking.
#[derive(Debug, Clone)]
pub struct AlgorithmOutcome {
    pub algorithm: String,
    /// Compressed size ÷ original size; smaller is better
    pub ratio: f64,
    pub time_taken: Duration,
    pub entropy_before: f64,
    pub entropy_after: f64,
    pub lossless: bool,
    pub failed: bool,
}

impl AlgorithmOutcome {
    /// Placeholder outcome for an invocation that raised an error.
    pub fn failure(algorithm: impl Into<String>) -> Self {
        AlgorithmOutcome {
            algorithm: algorithm.into(),
            ratio: 0.0,
            time_taken: Duration::ZERO,
            entropy_before: 0.0,
            entropy_after: 0.0,
            lossless: false,
            failed: true,
        }
    }

    fn to_record(&self) -> OutcomeRecord {
        OutcomeRecord {
            engine: self.algorithm.clone(),
            time_taken: self.time_taken.as_secs_f64(),
            compressed_ratio: self.ratio,
            entropy: self.entropy_before,
            compressed_entropy: self.entropy_after,
            lossless: self.lossless,
            failed: self.failed,
        }
    }
}

/// How the best outcome of a file is chosen.
///
/// `SmallestRatio` is the default for ratios reported as compressed ÷
/// original. `LargestRatio` serves engines reporting the inverse
/// convention (original ÷ compressed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionPolicy {
    #[default]
    SmallestRatio,
    LargestRatio,
}

/// All outcomes recorded for one file, in algorithm execution order.
#[derive(Debug, Clone)]
pub struct FileResultSet {
    pub file: FileDescriptor,
    pub outcomes: Vec<AlgorithmOutcome>,
}

impl FileResultSet {
    /// Selects the best non-failed outcome under `policy`.
    ///
    /// A left-fold with strict comparison: on exact ties the
    /// first-encountered outcome wins, which is why per-file execution
    /// order must be deterministic. `None` when every outcome failed or
    /// none were recorded.
    pub fn best_outcome(&self, policy: SelectionPolicy) -> Option<&AlgorithmOutcome> {
        let mut best: Option<&AlgorithmOutcome> = None;
        for outcome in self.outcomes.iter().filter(|o| !o.failed) {
            best = match best {
                None => Some(outcome),
                Some(current) => {
                    let better = match policy {
                        SelectionPolicy::SmallestRatio => outcome.ratio < current.ratio,
                        SelectionPolicy::LargestRatio => outcome.ratio > current.ratio,
                    };
                    if better {
                        Some(outcome)
                    } else {
                        Some(current)
                    }
                }
            };
        }
        best
    }
}

/// Flattened outcome as it appears in the serialized report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutcomeRecord {
    pub engine: String,
    /// Seconds
    pub time_taken: f64,
    pub compressed_ratio: f64,
    /// Entropy of the original bytes
    pub entropy: f64,
    /// Entropy of the transformed bytes
    pub compressed_entropy: f64,
    pub lossless: bool,
    pub failed: bool,
}

/// One serialized per-file entry. `best_result` is an explicit `null`
/// (not an omitted field) when no algorithm produced a usable outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub file_type: String,
    pub entropy: f64,
    pub size: u64,
    pub best_result: Option<OutcomeRecord>,
    pub results: Vec<OutcomeRecord>,
}

/// The persisted unit: every attempted file of one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub files: Vec<BenchmarkRecord>,
}

/// Pairs each descriptor with the outcomes recorded for it.
pub fn collect(
    files: &[FileDescriptor],
    outcome_lists: Vec<Vec<AlgorithmOutcome>>,
) -> Vec<FileResultSet> {
    debug_assert_eq!(files.len(), outcome_lists.len());
    files
        .iter()
        .cloned()
        .zip(outcome_lists)
        .map(|(file, outcomes)| FileResultSet { file, outcomes })
        .collect()
}

/// Flattens result sets into the serialized report form.
pub fn to_report(sets: &[FileResultSet], policy: SelectionPolicy) -> BenchmarkReport {
    let files = sets
        .iter()
        .map(|set| BenchmarkRecord {
            name: set.file.name(),
            file_type: set.file.mime_type().to_string(),
            entropy: set.file.entropy(),
            size: set.file.size(),
            best_result: set.best_outcome(policy).map(AlgorithmOutcome::to_record),
            results: set.outcomes.iter().map(AlgorithmOutcome::to_record).collect(),
        })
        .collect();

    BenchmarkReport { files }
}

/// Writes the report as pretty-printed JSON.
pub fn write_report(report: &BenchmarkReport, path: &Path) -> io::Result<()> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    fs::write(path, json)
}

/// Reads a report previously written with [`write_report`].
pub fn read_report(path: &Path) -> io::Result<BenchmarkReport> {
    let contents = fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Prints a per-file summary table of the report.
pub fn print_report(report: &BenchmarkReport) {
    let mut table = Table::new();
    table.add_row(row![
        "File",
        "Type",
        "Size (B)",
        "Entropy",
        "Best Engine",
        "Ratio",
        "Time (s)"
    ]);

    for record in &report.files {
        match &record.best_result {
            Some(best) => table.add_row(row![
                record.name,
                record.file_type,
                record.size,
                format!("{:.4}", record.entropy),
                best.engine,
                format!("{:.4}", best.compressed_ratio),
                format!("{:.6}", best.time_taken),
            ]),
            None => table.add_row(row![
                record.name,
                record.file_type,
                record.size,
                format!("{:.4}", record.entropy),
                "-",
                "-",
                "-",
            ]),
        };
    }

    table.printstd();
}
