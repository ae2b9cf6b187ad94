//! uvmgen generates a UVM verification environment for one hardware module
//! from a configuration file and a library of SystemVerilog templates.

/// Package, testbench and simulation run files
pub mod artifacts;

/// Command-line interface module for the uvmgen application
pub mod cli;

/// Configuration loading and validation
/// Supports JSON and YAML formats
pub mod config;

/// Common constants
pub mod constants;

/// Error types and handling for the uvmgen application
pub mod error;

/// Output directory tree creation
pub mod layout;

/// Record of generated files
pub mod manifest;

/// Step sequencing for a generation run
pub mod pipeline;

/// MiniJinja rendering of built-in artifact templates
pub mod renderer;

/// Token substitution map derived from the configuration
pub mod substitution;

/// Component templates and literal token expansion
pub mod template;
