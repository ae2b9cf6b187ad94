//! Common constants used throughout uvmgen.

/// Configuration file used when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Template library directory used when `--templates` is not given.
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";

/// Top-level sections every configuration must carry, in check order.
pub const REQUIRED_SECTIONS: [&str; 5] =
    ["project", "dut", "interface", "simulation", "directories"];

/// Fields required inside the `dut` section.
pub const REQUIRED_DUT_FIELDS: [&str; 2] = ["module_name", "interface_name"];

/// Subdirectories created under `sim_uvm`, one per component group.
pub const UVM_SUBDIRS: [&str; 6] = ["base", "transactions", "sequences", "agents", "env", "tests"];

pub const DEFAULT_TIMESCALE: &str = "1ns/1ps";
pub const DEFAULT_WAVE_FORMAT: &str = "mxd";
pub const DEFAULT_TIMEOUT: &str = "10ms";

/// Signals of the register-file interface the template library targets.
pub const DEFAULT_SIGNALS: [&str; 7] = [
    "reset",
    "write_enable",
    "address",
    "write_data",
    "read_enable",
    "read_data",
    "ready",
];

pub const DEFAULT_SIM_UVM: &str = "sim/uvm";
pub const DEFAULT_SIM_TB: &str = "sim/tb";
pub const DEFAULT_SIM_EXEC: &str = "sim/exec";
pub const DEFAULT_RTL_INTERFACES: &str = "rtl/interfaces";
pub const DEFAULT_RTL_HDL: &str = "rtl/hdl";

/// Module name the template library is written against.
pub const TEMPLATE_MODULE_TOKEN: &str = "register_file";

/// Timescale directive as it appears in the template library.
pub const TEMPLATE_TIMESCALE_TOKEN: &str = "`timescale 1ns / 1ps";

pub const RUN_SCRIPT_FILE: &str = "run.bat";
pub const RUN_CONFIG_FILE: &str = "test_config.cfg";
