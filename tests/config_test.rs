mod common;

use std::path::PathBuf;
use tempfile::TempDir;
use uvmgen::config::{load, parse_config, validate};
use uvmgen::error::Error;

const FULL: &str = r#"
project: { name: demo }
dut: { module_name: alu, interface_name: alu_if }
interface: {}
simulation: { timescale: "1ps/1ps" }
directories: { sim_uvm: "verif/uvm" }
"#;

fn without_line(content: &str, prefix: &str) -> String {
    content
        .lines()
        .filter(|line| !line.starts_with(prefix))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_load_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let result = load(temp_dir.path().join("absent.yaml"));
    assert!(matches!(result, Err(Error::ConfigNotFound { .. })));
}

#[test]
fn test_load_directory_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let result = load(temp_dir.path());
    assert!(matches!(result, Err(Error::ConfigNotFound { .. })));
}

#[test]
fn test_load_invalid_yaml() {
    let temp_dir = TempDir::new().unwrap();
    let path = common::write_config(temp_dir.path(), "dut: [unclosed");
    match load(&path) {
        Err(Error::ConfigParseError { path: p, .. }) => assert_eq!(p, path),
        other => panic!("Expected ConfigParseError, got {other:?}"),
    }
}

#[test]
fn test_scalar_document_is_parse_error() {
    assert!(matches!(
        parse_config("42", "config.yaml"),
        Err(Error::ConfigParseError { .. })
    ));
}

#[test]
fn test_json_config() {
    let json = r#"{"project": {}, "dut": {"module_name": "fifo", "interface_name": "fifo_if"},
                   "interface": {}, "simulation": {}, "directories": {}}"#;
    let validated = validate(&parse_config(json, "config.json").unwrap()).unwrap();
    assert_eq!(validated.module_name, "fifo");
    assert_eq!(validated.interface_name, "fifo_if");
}

#[test]
fn test_validate_full_config() {
    let validated = validate(&parse_config(FULL, "config.yaml").unwrap()).unwrap();
    assert_eq!(validated.project_name, "demo");
    assert_eq!(validated.timescale, "1ps/1ps");
    assert_eq!(validated.wave_format, "mxd");
    assert_eq!(validated.timeout, "10ms");
    assert_eq!(validated.directories.sim_uvm, PathBuf::from("verif/uvm"));
    assert_eq!(validated.directories.sim_tb, PathBuf::from("sim/tb"));
    assert_eq!(validated.directories.configured.len(), 1);
    assert_eq!(validated.signals.len(), 7);
}

#[test]
fn test_each_missing_section_is_reported() {
    for section in ["project", "dut", "interface", "simulation", "directories"] {
        let content = without_line(FULL, &format!("{section}:"));
        let result = validate(&parse_config(&content, "config.yaml").unwrap());
        match result {
            Err(Error::MissingSection(name)) => assert_eq!(name, section),
            other => panic!("Expected MissingSection({section}), got {other:?}"),
        }
    }
}

#[test]
fn test_each_missing_dut_field_is_reported() {
    let cases = [
        ("dut: { interface_name: alu_if }", "module_name"),
        ("dut: { module_name: alu }", "interface_name"),
        ("dut: {}", "module_name"),
    ];
    for (dut, field) in cases {
        let content = FULL.replace("dut: { module_name: alu, interface_name: alu_if }", dut);
        let result = validate(&parse_config(&content, "config.yaml").unwrap());
        match result {
            Err(Error::MissingField { section, field: f }) => {
                assert_eq!(section, "dut");
                assert_eq!(f, field);
            }
            other => panic!("Expected MissingField(dut, {field}), got {other:?}"),
        }
    }
}

#[test]
fn test_non_string_module_name_is_invalid() {
    let content = FULL.replace("module_name: alu", "module_name: 7");
    let result = validate(&parse_config(&content, "config.yaml").unwrap());
    assert!(matches!(result, Err(Error::InvalidField { ref field, .. }) if field == "module_name"));
}

#[test]
fn test_signals_accept_names_and_mappings() {
    let content = FULL.replace(
        "interface: {}",
        "interface:\n  signals:\n    - clk\n    - { name: valid, width: 1 }\n    - data",
    );
    let validated = validate(&parse_config(&content, "config.yaml").unwrap()).unwrap();
    assert_eq!(validated.signals, vec!["valid", "data"]);
}

#[test]
fn test_non_string_directory_is_invalid() {
    let content = FULL.replace("sim_uvm: \"verif/uvm\"", "sim_uvm: [a, b]");
    let result = validate(&parse_config(&content, "config.yaml").unwrap());
    assert!(matches!(
        result,
        Err(Error::InvalidField { ref section, .. }) if section == "directories"
    ));
}

#[test]
fn test_directory_outside_output_root_is_invalid() {
    for dir in ["/abs/uvm", "../uvm", "sim/../../uvm"] {
        let content = FULL.replace("sim_uvm: \"verif/uvm\"", &format!("sim_uvm: \"{dir}\""));
        let result = validate(&parse_config(&content, "config.yaml").unwrap());
        match result {
            Err(Error::InvalidField { section, field, .. }) => {
                assert_eq!(section, "directories");
                assert_eq!(field, "sim_uvm");
            }
            other => panic!("Expected InvalidField for {dir}, got {other:?}"),
        }
    }
}

#[test]
fn test_dot_prefixed_directory_is_accepted() {
    let content = FULL.replace("sim_uvm: \"verif/uvm\"", "sim_uvm: \"./verif/uvm\"");
    let validated = validate(&parse_config(&content, "config.yaml").unwrap()).unwrap();
    assert_eq!(validated.directories.sim_uvm, PathBuf::from("./verif/uvm"));
}
