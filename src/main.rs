//! Entry point: wires a buffered stdin/stdout transport to the turn driver
//! and installs structured diagnostic logging. See SPEC_FULL.md §2, §4.7.

use std::io::{self, BufWriter};
use std::process::ExitCode;

use mad_pod_racing::driver::Driver;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("mad pod racing core starting");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let reader = stdin.lock();
    let writer = BufWriter::new(stdout.lock());

    let mut driver = match Driver::new(reader, writer) {
        Ok(driver) => driver,
        Err(err) => {
            tracing::error!(error = %err, "failed to initialize driver from track header");
            return ExitCode::FAILURE;
        }
    };

    match driver.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "terminating on fatal error");
            ExitCode::FAILURE
        }
    }
}
