use std::env;
use std::path::PathBuf;
use std::process;

use corpus_benchmark_rs::benchmark::{run, RunOptions};
use corpus_benchmark_rs::corpus::generate::{GeneratorSpec, NoiseGenerator, TextGenerator};
use corpus_benchmark_rs::corpus::remote::{canterbury_sources, HttpFetcher};
use corpus_benchmark_rs::corpus::CorpusManager;
use corpus_benchmark_rs::engine::{CodecEngine, ExecutionConfig, ALGORITHMS};

/// Benchmarks the built-in algorithm suite over a corpus directory and
/// writes the results to data.json.
fn main() {
    let args: Vec<String> = env::args().collect();

    let mut dir = String::from("files");
    let mut opts = RunOptions {
        execution: ExecutionConfig {
            write_output_files: false,
            print_progress: true,
            print_statistics: true,
        },
        report_path: Some(PathBuf::from("data.json")),
        ..Default::default()
    };

    for arg in &args[1..] {
        match arg.as_str() {
            "--fresh" => opts.fresh = true,
            "--generate" => opts.generate = true,
            "--download" => opts.download = true,
            "--delete" => opts.delete_at_end = true,
            flag if flag.starts_with("--") => {
                eprintln!("Unknown flag: {}", flag);
                eprintln!(
                    "Usage: {} [directory] [--fresh] [--generate] [--download] [--delete]",
                    args[0]
                );
                process::exit(1);
            }
            path => dir = path.to_string(),
        }
    }

    let manager = match CorpusManager::new(&dir) {
        Ok(manager) => manager,
        Err(e) => {
            eprintln!("Error: could not open corpus directory {}: {}", dir, e);
            process::exit(1);
        }
    };

    let mut generators = vec![
        GeneratorSpec::new(TextGenerator::new(1), 10),
        GeneratorSpec::new(NoiseGenerator::new(2), 5),
    ];
    let downloads = canterbury_sources();
    let fetcher = HttpFetcher::new();
    let engine = CodecEngine::new();

    match run(
        &manager,
        &mut generators,
        &fetcher,
        &downloads,
        &engine,
        ALGORITHMS,
        &opts,
    ) {
        Ok(report) => {
            println!(
                "Finished benchmarks: {} files, results written to data.json",
                report.files.len()
            );
        }
        Err(e) => {
            eprintln!("Benchmark run failed: {}", e);
            process::exit(1);
        }
    }
}
