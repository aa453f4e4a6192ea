//! Tether CLI library
//!
//! This module contains the core CLI logic for the Tether layout tool.

pub mod error_adapter;

mod args;
mod config;
mod error;
mod graph_file;

pub use args::Args;
pub use error::{CliError, ParseFailure};
pub use graph_file::{GraphFileError, GraphFormat, load_graph};

use std::fs;

use log::info;

use tether::LayoutBuilder;

/// Run the Tether CLI application
///
/// This function loads the input graph, computes its layout and writes the
/// resulting SVG to the output file. The final positions are also written as
/// JSON when `args.positions` is set.
///
/// # Errors
///
/// Returns `CliError` for:
/// - Configuration loading errors
/// - Graph file reading or parsing errors
/// - Invalid graphs or layout parameters
/// - Rendering errors
/// - Output I/O errors
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing graph"
    );

    // Load configuration and apply command-line overrides
    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(seed) = args.seed {
        app_config.layout_mut().set_seed(Some(seed));
    }
    if let Some(iterations) = args.iterations {
        app_config.layout_mut().set_iterations(iterations);
    }

    let graph = load_graph(&args.input)?;

    let builder = LayoutBuilder::new(app_config);
    let outcome = builder.layout(&graph)?;
    info!(
        iterations_run = outcome.summary().iterations_run,
        stop_reason:? = outcome.summary().stop_reason;
        "Layout finished"
    );

    let svg = if args.single {
        builder.render_svg(&graph, &outcome)?
    } else {
        builder.render_comparison_svg(&graph, &outcome)?
    };
    fs::write(&args.output, svg)?;
    info!(output_file = args.output; "SVG exported successfully");

    if let Some(path) = &args.positions {
        let json = serde_json::to_string_pretty(outcome.positions())?;
        fs::write(path, json)?;
        info!(positions_file = path.as_str(); "Positions written");
    }

    Ok(())
}
