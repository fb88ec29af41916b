//! Replays a recorded drag scenario and prints every drag event as a JSON line.

mod scenario;

use scenario::{ReplayError, ReplayResult, Scenario};
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let Some(path) = std::env::args_os().nth(1) else {
        eprintln!("usage: dragkit-replay <scenario.json>");
        return ExitCode::from(2);
    };

    match replay(Path::new(&path)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn replay(path: &Path) -> ReplayResult<()> {
    log::info!("Loading scenario from {}", path.display());
    let scenario = Scenario::load(path)?;
    let records = scenario.run()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for record in &records {
        serde_json::to_writer(&mut out, record)?;
        writeln!(out).map_err(ReplayError::Write)?;
    }
    out.flush().map_err(ReplayError::Write)
}
