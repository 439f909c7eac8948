#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Standalone harness entrypoint: runs the record parser target on one input
//! file and exits with its status. Fuzzers that restart the process per input
//! (AFL-style `@@` runners) invoke this binary directly.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::info;

use recfuzz::harness::{Harness, HarnessConfig, RecordParserTarget, STATUS_OK};
use recfuzz::monitoring::logging;

fn print_usage(argv0: &str) {
    println!("Fuzzing harness for the record stream parser");
    println!("Usage: {argv0} <input_file> [config.toml]");
    println!();
    println!("Config is read from the second argument or $RECFUZZ_CONFIG;");
    println!("RECFUZZ_MAX_INPUT / RECFUZZ_ITERATIONS / RECFUZZ_STRICT /");
    println!("RECFUZZ_LOG_FORMAT / RECFUZZ_LOG_LEVEL override it.");
    println!();
    println!("To fuzz:");
    println!("  1. Build a seed corpus:");
    println!("     cargo run --bin mkseed -- corpus");
    println!("  2. In-process with libFuzzer:");
    println!("     cargo fuzz run fuzz_decode_stream corpus");
    println!("  3. Out-of-process with an AFL-style runner:");
    println!("     afl-fuzz -i corpus -o findings -- target/release/{argv0} @@");
}

fn run(input: &Path, config_path: Option<&Path>) -> Result<i32> {
    let cfg = HarnessConfig::load(config_path).context("load config")?;
    logging::init(&cfg.log).context("init logging")?;

    info!(input = %input.display(), iterations = cfg.iterations, strict = cfg.strict, "testing input");

    let iterations = cfg.iterations;
    let mut harness = Harness::new(RecordParserTarget::new(cfg.strict), cfg);
    harness.init().context("harness init")?;

    let status = if iterations > 1 {
        harness.run_persistent(input)
    } else {
        harness.entry_status(input)
    };

    let target = harness.shutdown();
    info!(status, records = target.total_records(), "result");
    Ok(status)
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let argv0 = args
        .first()
        .and_then(|a| Path::new(a).file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "recfuzz".to_string());

    let Some(input) = args.get(1) else {
        print_usage(&argv0);
        return ExitCode::FAILURE;
    };

    match run(Path::new(input), args.get(2).map(Path::new)) {
        Ok(STATUS_OK) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{argv0}: {e:#}");
            ExitCode::FAILURE
        }
    }
}
