//! Command-line interface implementation for uvmgen.
//! Provides argument parsing and help text formatting using clap.

use crate::constants::{DEFAULT_CONFIG_FILE, DEFAULT_TEMPLATES_DIR};
use crate::pipeline::GenerateOptions;
use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments structure for uvmgen.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "uvmgen: UVM verification environment generator",
    long_about = None
)]
pub struct Args {
    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate the verification environment described by a configuration file
    Generate {
        /// Path to the YAML or JSON configuration file
        #[arg(short, long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,

        /// Directory containing the component templates
        #[arg(short, long, value_name = "DIR", default_value = DEFAULT_TEMPLATES_DIR)]
        templates: PathBuf,

        /// Directory the configured output directories are created under
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output: PathBuf,
    },
}

impl Command {
    pub fn into_options(self) -> GenerateOptions {
        match self {
            Command::Generate {
                config,
                templates,
                output,
            } => GenerateOptions {
                config_path: config,
                templates_dir: templates,
                output_root: output,
            },
        }
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 and the help text if no subcommand is given
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if matches!(
                e.kind(),
                ErrorKind::MissingRequiredArgument
                    | ErrorKind::MissingSubcommand
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help()
                    .unwrap();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
