// src/bin/topodag-serial.rs

use topodag::{cli, logging, run_serial, EXIT_FAILURE};

fn main() {
    let args = cli::try_parse_serial(std::env::args_os())
        .unwrap_or_else(|err| cli::exit_on_parse_error(err));

    if let Err(err) = run_main(args) {
        eprintln!("topodag-serial error: {err:?}");
        std::process::exit(EXIT_FAILURE);
    }
}

fn run_main(args: cli::SerialArgs) -> anyhow::Result<()> {
    logging::init_logging(args.common.log_level)?;
    run_serial(args)?;
    Ok(())
}
