//! Application entry point for the Aether Flora garden viewer.
//!
//! This binary parses the command line, initializes logging, loads the
//! species catalog, and delegates all interactive logic and rendering to
//! [`Viewer`] from the `viewer` module.

mod viewer;

use std::path::PathBuf;

use clap::Parser;
use flora_core::species::Catalog;
use tracing_subscriber::EnvFilter;
use viewer::Viewer;

#[derive(Debug, Parser)]
#[command(author, version, about = "Aether Flora, a gesture-tended particle garden")]
struct Cli {
    /// Path to a YAML species catalog (built-in library when omitted)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Species id to pot first (first catalog entry when omitted)
    #[arg(long)]
    species: Option<String>,

    /// Seed for the session's random stream (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
}

/// Starts the native eframe application.
///
/// A broken catalog file is logged and replaced by the built-in library
/// rather than aborting; the garden should always open.
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if eframe fails to create the native window or event loop.
fn main() -> eframe::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    let catalog = match &cli.catalog {
        Some(path) => Catalog::load(path).unwrap_or_else(|err| {
            tracing::error!(error = %err, "catalog rejected, using built-in library");
            Catalog::builtin()
        }),
        None => Catalog::builtin(),
    };

    let options = eframe::NativeOptions::default();

    eframe::run_native(
        "Aether Flora",
        options,
        Box::new(move |_cc| {
            // Construct the root app state for the viewer.
            Ok(Box::new(Viewer::new(
                catalog,
                cli.species.as_deref(),
                cli.seed,
            )))
        }),
    )
}
