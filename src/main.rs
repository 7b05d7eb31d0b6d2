use std::process::ExitCode;
use terminus::{cli, config};

fn main() -> ExitCode {
    // Do as little as possible in main.rs as it can't contain any tests
    config::init_logging();
    log::info!("#Start main()");

    match cli::run() {
        Ok(code) => code,
        Err(e) => {
            log::debug!("run() failed: {e:?}");
            eprintln!("{}: {e}", config::PROGRAM_NAME);
            ExitCode::FAILURE
        }
    }
}
