// src/bin/topodag-parallel.rs

use topodag::{cli, logging, run_parallel, EXIT_FAILURE};

fn main() {
    let args = cli::try_parse_parallel(std::env::args_os())
        .unwrap_or_else(|err| cli::exit_on_parse_error(err));

    if let Err(err) = run_main(args) {
        eprintln!("topodag-parallel error: {err:?}");
        std::process::exit(EXIT_FAILURE);
    }
}

fn run_main(args: cli::ParallelArgs) -> anyhow::Result<()> {
    logging::init_logging(args.common.log_level)?;
    run_parallel(args)?;
    Ok(())
}
