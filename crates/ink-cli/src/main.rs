//! ink-replay — replay a recorded canvas session against a live solve service.
//!
//! Reads a JSON script on stdin (see `script.rs`), plays it through a
//! session, and prints the resulting overlays and variables as JSON.
//!
//! Usage:
//!   ink-replay < session.json
//!   ink-replay --health
//!
//! The service location comes from `INK_SOLVE_URL` (default
//! `http://localhost:8900`) and `INK_SOLVE_TIMEOUT_SECS`. Logging follows
//! `RUST_LOG`.

mod script;

use ink_solve::{HttpSolveService, SolverConfig};
use std::io::Read;

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("ink-replay error: {msg}");
    std::process::exit(1);
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = SolverConfig::from_env().unwrap_or_else(|e| fail(e));
    let service = HttpSolveService::new(&config).unwrap_or_else(|e| fail(e));

    if std::env::args().any(|arg| arg == "--health") {
        match service.health_check().await {
            Ok(message) => println!("{message}"),
            Err(e) => fail(e),
        }
        return;
    }

    let mut text = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut text) {
        fail(format!("failed to read stdin: {e}"));
    }
    let script: script::Script =
        serde_json::from_str(&text).unwrap_or_else(|e| fail(format!("bad script: {e}")));

    log::info!(
        "replaying {} commands against {}",
        script.commands.len(),
        service.solve_url()
    );
    let report = script::run(&script, service).await;

    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(e) => fail(e),
    }
}
