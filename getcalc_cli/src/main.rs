//! # getcalculation CLI
//!
//! Runs a calculator from the command line and prints the outcome as
//! pretty JSON, the same shape the HTTP layer would return.
//!
//! ```text
//! getcalc                                  list available calculators
//! getcalc MIDPOINT '{"x1":0,"y1":0,"x2":4,"y2":6}'
//! getcalc MIDPOINT -                       read inputs from stdin
//! getcalc --manifest tool.json '{...}'     full manifest-driven run
//! ```

use std::env;
use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

use getcalc_core::engine::CalculationEngine;
use getcalc_core::manifest::Manifest;
use getcalc_core::pipeline::Outcome;
use serde_json::Value;

fn read_inputs(arg: Option<&str>) -> io::Result<String> {
    match arg {
        Some("-") | None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
        Some(text) => Ok(text.to_string()),
    }
}

fn list_calculators(engine: &CalculationEngine) {
    println!("Available calculators:");
    for key in engine.registry().available_calculators() {
        println!("  {}", key);
    }
}

fn run() -> Result<Option<Outcome>, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    let engine = CalculationEngine::new();

    if args.is_empty() {
        list_calculators(&engine);
        return Ok(None);
    }

    let (manifest, inputs_arg) = if args[0] == "--manifest" {
        let path = args
            .get(1)
            .ok_or_else(|| "--manifest requires a file path".to_string())?;
        let text = fs::read_to_string(path)
            .map_err(|e| format!("cannot read manifest {}: {}", path, e))?;
        let manifest: Manifest =
            serde_json::from_str(&text).map_err(|e| format!("invalid manifest: {}", e))?;
        let report = manifest.validate();
        for warning in &report.warnings {
            eprintln!("manifest warning: {}", warning);
        }
        if !report.is_valid() {
            return Err(format!("invalid manifest: {}", report.errors.join(", ")));
        }
        (Some(manifest), args.get(2).map(String::as_str))
    } else {
        (None, args.get(1).map(String::as_str))
    };

    let raw = read_inputs(inputs_arg).map_err(|e| format!("cannot read inputs: {}", e))?;
    let inputs: Value =
        serde_json::from_str(raw.trim()).map_err(|e| format!("invalid input JSON: {}", e))?;

    let result = match &manifest {
        Some(manifest) => engine.calculate_with_manifest(manifest, inputs),
        None => engine.calculate(&args[0], inputs),
    };
    result.map(Some).map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(None) => ExitCode::SUCCESS,
        Ok(Some(outcome)) => {
            match serde_json::to_string_pretty(&outcome) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::FAILURE;
                }
            }
            if outcome.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(message) => {
            eprintln!("Error: {}", message);
            ExitCode::FAILURE
        }
    }
}
