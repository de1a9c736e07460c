//! Demo command
//!
//! Usage: loglib demo [--threads <N>] [--count <N>]

use clap::Args;
use loglib::{c_log_st, debug_log, info_log, trace_function, LogFacade, Severity};
use std::thread;

#[derive(Debug, Args)]
pub struct DemoArgs {
    /// Number of worker threads
    #[arg(short, long, default_value_t = 2)]
    pub threads: usize,

    /// Records each worker emits
    #[arg(short, long, default_value_t = 3)]
    pub count: usize,
}

/// Execute demo command
pub fn execute(facade: &LogFacade, args: DemoArgs) -> Result<(), Box<dyn std::error::Error>> {
    trace_function!(facade);
    info_log!(facade: facade, "starting {} workers", args.threads);

    thread::scope(|scope| {
        for worker_id in 0..args.threads {
            scope.spawn(move || worker(facade, worker_id, args.count));
        }
    });

    for level in Severity::ALL {
        facade.log(level, &format!("sample record at {level}"));
    }
    c_log_st!(facade)
        .append("demo finished with ")
        .append(args.threads)
        .append(" workers");
    Ok(())
}

fn worker(facade: &LogFacade, worker_id: usize, count: usize) {
    trace_function!(facade);
    for seq in 0..count {
        debug_log!(facade: facade, "worker {worker_id} record {seq}");
    }
}
