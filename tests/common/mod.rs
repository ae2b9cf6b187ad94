#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// Template library shipped with the crate.
pub fn templates_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("templates")
}

pub fn reg_file_config() -> &'static str {
    r#"
project:
  name: "Register File"
dut:
  module_name: "reg_file"
  interface_name: "reg_if"
interface:
  signals: [reset, write_enable, address, write_data, read_enable, read_data, ready]
simulation:
  timescale: "1ns/1ps"
  wave_format: "vcd"
directories:
  sim_uvm: "sim/uvm"
  sim_tb: "sim/tb"
  sim_exec: "sim/exec"
"#
}

pub fn write_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("config.yaml");
    std::fs::write(&path, content).unwrap();
    path
}
