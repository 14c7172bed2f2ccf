//! Resolves configuration and builds the catalog source before the UI starts.
use super::args::AppArgs;
use crate::catalog::{CatalogSource, FileCatalogSource, HttpCatalogSource};
use crate::config::Options;
use crate::logging;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// Everything `run` needs.
pub struct PreparedApp {
    pub options: Options,
    pub source: Arc<dyn CatalogSource>,
}

/// Sets up logging, merges the config file, `-o` overrides and dedicated
/// flags (in that order), then picks the catalog source.
///
/// # Errors
///
/// Fails on an unreadable or invalid config, a bad override, or a log file
/// that cannot be opened.
pub fn prepare(args: AppArgs) -> Result<PreparedApp> {
    logging::init(args.log_file.as_deref())?;

    let options = resolve_options(&args)?;
    let source = build_source(&options);
    info!("Using theme catalog at {}", source.describe());

    Ok(PreparedApp { options, source })
}

fn resolve_options(args: &AppArgs) -> Result<Options> {
    let mut options = Options::default();

    if let Some(path) = &args.config {
        options.merge_file(path)?;
    }
    for assignment in &args.overrides {
        options
            .apply_override(assignment)
            .with_context(|| format!("invalid override '{}'", assignment))?;
    }
    if let Some(url) = &args.catalog_url {
        options.set("catalog_url", url)?;
    }
    if let Some(path) = &args.catalog_file {
        options.catalog_file = Some(path.clone());
    }
    if let Some(delay) = &args.fetch_delay {
        options.set("fetch_delay", delay)?;
    }

    Ok(options)
}

fn build_source(options: &Options) -> Arc<dyn CatalogSource> {
    match &options.catalog_file {
        Some(path) => Arc::new(FileCatalogSource::new(path)),
        None => Arc::new(HttpCatalogSource::new(
            options.catalog_url.clone(),
            options.request_timeout,
        )),
    }
}
