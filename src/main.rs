//! uvmgen's entry point.
//! Parses the command line, sets up logging and runs the generation pipeline.

use uvmgen::{
    cli::{get_args, Args},
    error::{default_error_handler, Result},
    pipeline::generate,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Info
        })
        .format_target(false)
        .format_timestamp(None)
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Runs the generator and prints a summary of what it produced.
fn run(args: Args) -> Result<()> {
    let options = args.command.into_options();
    let output_root = options.output_root.clone();
    let report = generate(options)?;

    println!(
        "Generation complete: {} files written, {} directories created under {}.",
        report.manifest.len(),
        report.created_dirs.len(),
        output_root.display()
    );
    Ok(())
}
