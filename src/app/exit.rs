//! What happens after the UI loop has stopped and the terminal is restored.
use crate::ui::LoopExit;
use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing::{debug, info};

/// Reports the outcome to the user and turns it into the process exit code.
///
/// If the download is still running the process is terminated right here
/// with `std::process::exit`. Dropping the runtime would block on the
/// blocking pool until the transfer finishes, and there is no way to cancel
/// it, so destructors and the remaining runtime teardown are skipped on
/// purpose in that case.
pub fn finish(exit: LoopExit, runtime: Runtime) -> Result<ExitCode> {
    if let Some(diagnostic) = reportable_diagnostic(&exit) {
        eprintln!("{}", diagnostic);
        wait_for_enter()?;
    }

    if let Some(name) = &exit.selected {
        println!("{}", name);
    }

    match shutdown_path(&exit) {
        Shutdown::Immediate(code) => {
            info!("Catalog download still running, exiting immediately");
            let _ = io::stdout().flush();
            std::process::exit(code);
        }
        Shutdown::Graceful(status) => {
            debug!("Shutting down runtime");
            drop(runtime);
            Ok(ExitCode::from(status))
        }
    }
}

/// How the process leaves once the loop is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shutdown {
    /// `std::process::exit` with this code, skipping runtime teardown.
    Immediate(i32),
    /// Drop the runtime and return this status from `main`.
    Graceful(u8),
}

fn shutdown_path(exit: &LoopExit) -> Shutdown {
    if exit.fetch_in_flight {
        Shutdown::Immediate(exit.code)
    } else {
        Shutdown::Graceful(status_byte(exit.code))
    }
}

fn reportable_diagnostic(exit: &LoopExit) -> Option<&str> {
    if exit.code == 0 {
        return None;
    }
    exit.diagnostic.as_deref()
}

fn wait_for_enter() -> Result<()> {
    eprint!("Press Enter to quit.");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(())
}

/// Exit statuses outside 0..=255 collapse to 1.
fn status_byte(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(1)
}
