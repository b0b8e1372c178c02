use std::{io, process::ExitCode};

use chess_engine::{attacks::init_attack_tables, engine::Engine, uci};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // stdout carries the protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(e) = init_attack_tables() {
        error!(error = %e, "failed to build attack tables");
        return ExitCode::FAILURE;
    }

    let mut engine = Engine::default();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    match uci::uci_loop(&mut engine, stdin.lock(), &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "protocol loop failed");
            ExitCode::FAILURE
        }
    }
}
