//! Configuration handling for uvmgen.
//! This module loads the generator configuration (JSON or YAML), checks that the
//! required sections and fields are present and turns the raw document into a
//! typed [`ValidatedConfig`].

use crate::constants::{
    DEFAULT_RTL_HDL, DEFAULT_RTL_INTERFACES, DEFAULT_SIM_EXEC, DEFAULT_SIM_TB, DEFAULT_SIM_UVM,
    DEFAULT_SIGNALS, DEFAULT_TIMEOUT, DEFAULT_TIMESCALE, DEFAULT_WAVE_FORMAT, REQUIRED_DUT_FIELDS,
    REQUIRED_SECTIONS,
};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;
use std::path::{Component, Path, PathBuf};

/// Raw configuration document, top-level sections in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    sections: IndexMap<String, serde_json::Value>,
}

impl Config {
    pub fn new(sections: IndexMap<String, serde_json::Value>) -> Self {
        Self { sections }
    }

    pub fn section(&self, name: &str) -> Option<&serde_json::Value> {
        self.sections.get(name)
    }
}

/// Directories named by the `directories` section.
#[derive(Debug, Clone, PartialEq)]
pub struct Directories {
    pub sim_uvm: PathBuf,
    pub sim_tb: PathBuf,
    pub sim_exec: PathBuf,
    pub rtl_interfaces: PathBuf,
    pub rtl_hdl: PathBuf,
    /// Every string entry of the section, in file order. These are the
    /// directories materialized alongside the UVM subdirectories.
    pub configured: IndexMap<String, PathBuf>,
}

/// Configuration after presence checks, defaults and type checks.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedConfig {
    pub project_name: String,
    pub module_name: String,
    pub interface_name: String,
    pub timescale: String,
    pub wave_format: String,
    /// Simulation timeout used by the generated testbench, e.g. `10ms`.
    pub timeout: String,
    /// Interface signals wired between the interface instance and the DUT.
    pub signals: Vec<String>,
    pub interface: serde_json::Value,
    pub directories: Directories,
}

/// Parses configuration content, trying JSON first and YAML second.
///
/// # Errors
/// * `Error::ConfigParseError` if the content is neither, or if its top level
///   is not a mapping
pub fn parse_config<P: AsRef<Path>>(content: &str, path: P) -> Result<Config> {
    let sections: IndexMap<String, serde_json::Value> = match serde_json::from_str(content) {
        Ok(v) => v,
        Err(_) => {
            let value: Option<IndexMap<String, serde_json::Value>> =
                serde_yaml::from_str(content).map_err(|e| Error::ConfigParseError {
                    path: path.as_ref().to_path_buf(),
                    reason: e.to_string(),
                })?;
            // An empty YAML document parses as null.
            value.unwrap_or_default()
        }
    };

    Ok(Config::new(sections))
}

/// Reads and parses the configuration file at `path`.
///
/// # Errors
/// * `Error::ConfigNotFound` if the path does not name a file
/// * `Error::ConfigParseError` if the file cannot be read or parsed
pub fn load<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    debug!("Loading configuration from {}", path.display());
    let content = std::fs::read_to_string(path).map_err(|e| Error::ConfigParseError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    parse_config(&content, path)
}

fn required_string(
    section: &serde_json::Value,
    section_name: &str,
    field: &str,
) -> Result<String> {
    match section.get(field) {
        None => Err(Error::missing_field(section_name, field)),
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        Some(_) => Err(Error::invalid_field(section_name, field, "a non-empty string")),
    }
}

fn optional_string(
    section: Option<&serde_json::Value>,
    section_name: &str,
    field: &str,
    default: &str,
) -> Result<String> {
    match section.and_then(|s| s.get(field)) {
        None | Some(serde_json::Value::Null) => Ok(default.to_string()),
        Some(serde_json::Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(Error::invalid_field(section_name, field, "a string")),
    }
}

/// Reads `interface.signals`, a list of names or of mappings with a `name` key.
/// The clock is wired separately and is skipped.
fn parse_signals(interface: Option<&serde_json::Value>) -> Result<Vec<String>> {
    let Some(entries) = interface
        .and_then(|i| i.get("signals"))
        .filter(|v| !v.is_null())
    else {
        return Ok(DEFAULT_SIGNALS.iter().map(|s| s.to_string()).collect());
    };
    let entries = entries
        .as_array()
        .ok_or_else(|| Error::invalid_field("interface", "signals", "a list of signals"))?;

    let mut signals = Vec::with_capacity(entries.len());
    for entry in entries {
        let name = match entry {
            serde_json::Value::String(name) => name.as_str(),
            serde_json::Value::Object(obj) => obj
                .get("name")
                .and_then(|n| n.as_str())
                .ok_or_else(|| {
                    Error::invalid_field("interface", "signals", "signals with a 'name'")
                })?,
            _ => return Err(Error::invalid_field("interface", "signals", "a list of signals")),
        };
        if name != "clk" {
            signals.push(name.to_string());
        }
    }
    Ok(signals)
}

/// Directories are resolved against the output root, and generated files
/// refer to each other by relative paths, so only plain relative paths are
/// accepted.
fn is_plain_relative(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

fn parse_directories(section: &serde_json::Value) -> Result<Directories> {
    let mut configured = IndexMap::new();
    if let Some(entries) = section.as_object() {
        for (key, value) in entries {
            let serde_json::Value::String(dir) = value else {
                return Err(Error::invalid_field("directories", key, "a directory path"));
            };
            let dir = PathBuf::from(dir);
            if !is_plain_relative(&dir) {
                return Err(Error::invalid_field(
                    "directories",
                    key,
                    "a relative path without '..'",
                ));
            }
            configured.insert(key.clone(), dir);
        }
    }

    let dir = |key: &str, default: &str| {
        configured
            .get(key)
            .cloned()
            .unwrap_or_else(|| PathBuf::from(default))
    };

    Ok(Directories {
        sim_uvm: dir("sim_uvm", DEFAULT_SIM_UVM),
        sim_tb: dir("sim_tb", DEFAULT_SIM_TB),
        sim_exec: dir("sim_exec", DEFAULT_SIM_EXEC),
        rtl_interfaces: dir("rtl_interfaces", DEFAULT_RTL_INTERFACES),
        rtl_hdl: dir("rtl_hdl", DEFAULT_RTL_HDL),
        configured,
    })
}

/// Checks the raw configuration and produces a [`ValidatedConfig`].
///
/// Sections are checked in the order `project`, `dut`, `interface`,
/// `simulation`, `directories`; then `dut.module_name` and
/// `dut.interface_name`. Everything else falls back to a default.
///
/// # Errors
/// * `Error::MissingSection` for the first absent section
/// * `Error::MissingField` for the first absent `dut` field
/// * `Error::InvalidField` for a present value of the wrong type
pub fn validate(config: &Config) -> Result<ValidatedConfig> {
    for section in REQUIRED_SECTIONS {
        if config.section(section).is_none() {
            return Err(Error::MissingSection(section.to_string()));
        }
    }

    let dut = config.section("dut").cloned().unwrap_or_default();
    for field in REQUIRED_DUT_FIELDS {
        if dut.get(field).is_none() {
            return Err(Error::missing_field("dut", field));
        }
    }
    let module_name = required_string(&dut, "dut", "module_name")?;
    let interface_name = required_string(&dut, "dut", "interface_name")?;

    let simulation = config.section("simulation");
    let timescale = optional_string(simulation, "simulation", "timescale", DEFAULT_TIMESCALE)?;
    let wave_format =
        optional_string(simulation, "simulation", "wave_format", DEFAULT_WAVE_FORMAT)?;
    let timeout = optional_string(simulation, "simulation", "timeout", DEFAULT_TIMEOUT)?;
    let signals = parse_signals(config.section("interface"))?;

    let project_name =
        optional_string(config.section("project"), "project", "name", &module_name)?;

    let directories = parse_directories(
        config
            .section("directories")
            .unwrap_or(&serde_json::Value::Null),
    )?;

    debug!("Configuration validation passed for module '{module_name}'");

    Ok(ValidatedConfig {
        project_name,
        module_name,
        interface_name,
        timescale,
        wave_format,
        timeout,
        signals,
        interface: config.section("interface").cloned().unwrap_or_default(),
        directories,
    })
}
