//! Binary entrypoint: read one JSON request from stdin, write one JSON response to stdout.
//!
//! Configuration overrides are read from the JSON file named by
//! `RISK_ENGINE_CONFIG` when set. Rejected requests produce an ErrorOutput on
//! stdout, a diagnostic line on stderr, and exit status 1.

use operation_risk_engine::types::ErrorOutput;
use operation_risk_engine::{run, Config, EngineError, Request, RiskEngine};
use std::io::{self, Read, Write};

const CONFIG_ENV: &str = "RISK_ENGINE_CONFIG";

fn main() {
  if let Err(e) = run_binary() {
    let _ = writeln!(io::stderr(), "operation-risk-engine: {}", e);

    let mut err = ErrorOutput::new(e.to_string());
    if let Some(field) = e.field() {
      err = err.with_field(field);
    }
    let mut out = io::stdout().lock();
    let _ = serde_json::to_writer(&mut out, &err);
    let _ = writeln!(out);
    let _ = out.flush();
    std::process::exit(1);
  }
}

fn load_engine() -> Result<RiskEngine, EngineError> {
  match std::env::var(CONFIG_ENV) {
    Ok(path) if !path.trim().is_empty() => RiskEngine::new(Config::from_path(path.trim())?),
    _ => Ok(RiskEngine::with_defaults()),
  }
}

fn run_binary() -> Result<(), EngineError> {
  let engine = load_engine()?;

  let mut raw = String::new();
  io::stdin().lock().read_to_string(&mut raw)?;
  let request: Request = serde_json::from_str(&raw)?;

  let out = run(&request, &engine)?;
  let json = serde_json::to_vec(&out)?;
  let mut stdout = io::stdout().lock();
  stdout.write_all(&json)?;
  writeln!(stdout)?;
  Ok(())
}
