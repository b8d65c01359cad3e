mod cli;
mod error;
mod pipeline;
mod records;

use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use cli::Args;
use env_logger::{Builder, Env};
use log::{debug, error, info};
use sysinfo::{get_current_pid, ProcessExt, System, SystemExt};

fn monitor_memory() -> u64 {
    // Resident memory of this process in bytes, 0 when it cannot be read.
    let Ok(pid) = get_current_pid() else {
        return 0;
    };
    let mut system = System::new();
    system.refresh_process(pid);

    system.process(pid).map_or(0, |process| process.memory())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    let env = Env::new().filter("CLEVELAND_LOG");
    Builder::new()
        .filter(Some("cleveland_clean"), args.log_level())
        .parse_env(env)
        .init();

    info!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    debug!("Arguments {:#?}", args);

    let start_time = Instant::now();
    let start_memory = monitor_memory();

    let result = pipeline::clean(&args).await;

    let end_memory = monitor_memory();
    let duration = start_time.elapsed();

    match result {
        Ok(summary) => {
            debug!("{:?}", summary);
            info!("Time elapsed: {:?}", duration);
            info!("Memory used: {} bytes", end_memory.saturating_sub(start_memory));
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
