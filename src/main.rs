//! Terminal theme picker: downloads the theme catalog in the background and
//! lets the user browse it once it arrives.
mod app;
mod catalog;
mod config;
mod fetch;
mod logging;
#[cfg(test)]
mod testing;
mod ui;

use anyhow::Result;
use app::AppArgs;
use std::process::ExitCode;

/// The runtime is built by hand so that `app::finish` owns it and decides
/// whether it gets dropped at all.
fn main() -> Result<ExitCode> {
    let prepared = app::prepare(AppArgs::from_cli())?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let exit = runtime.block_on(app::run(prepared))?;

    app::finish(exit, runtime)
}
