//! Generated files that do not come from the component template library:
//! the package (aggregator), the testbench top (entry file) and the
//! simulation run files.

use crate::config::ValidatedConfig;
use crate::constants::{RUN_CONFIG_FILE, RUN_SCRIPT_FILE, UVM_SUBDIRS};
use crate::error::{Error, Result};
use crate::manifest::{Artifact, GeneratedFileManifest};
use crate::renderer::TemplateRenderer;
use crate::template::write_file;
use log::debug;
use serde::Serialize;
use serde_json::json;
use std::path::{Component, Path, PathBuf};

const PACKAGE_TEMPLATE: &str = include_str!("builtin/package.sv.j2");
const TESTBENCH_TEMPLATE: &str = include_str!("builtin/testbench.sv.j2");
const RUN_SCRIPT_TEMPLATE: &str = include_str!("builtin/run.bat.j2");
const RUN_CONFIG_TEMPLATE: &str = include_str!("builtin/test_config.cfg.j2");
const FILE_LIST_TEMPLATE: &str = include_str!("builtin/filelist.f.j2");

const CLOCK_MHZ: u32 = 100;
const RESET_NS: u32 = 50;

/// One named simulation run listed in the run configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scenario {
    pub name: String,
    pub label: String,
    pub summary: String,
    pub filelist: String,
    /// UVM test class started by the entry file for this scenario.
    pub test_class: String,
    pub wave_file: String,
    pub verbosity: String,
}

/// The basic and random scenarios of a generated environment.
pub fn scenarios(config: &ValidatedConfig) -> Vec<Scenario> {
    let module = &config.module_name;
    [
        ("basic", "Basic", "Write/Read operations", "UVM_MEDIUM"),
        ("random", "Random", "Random operations", "UVM_HIGH"),
    ]
    .into_iter()
    .map(|(kind, label, summary, verbosity)| Scenario {
        name: format!("{module}_{kind}"),
        label: label.to_string(),
        summary: summary.to_string(),
        filelist: file_list_name(config),
        test_class: format!("{module}_{kind}_test"),
        wave_file: format!("{module}_{kind}.{}", config.wave_format),
        verbosity: verbosity.to_string(),
    })
    .collect()
}

fn file_list_name(config: &ValidatedConfig) -> String {
    format!("{}.f", config.module_name)
}

fn package_name(config: &ValidatedConfig) -> String {
    format!("{}_pkg", config.module_name)
}

fn testbench_name(config: &ValidatedConfig) -> String {
    format!("{}_tb", config.module_name)
}

/// Path from directory `from` to `to`, both relative to the same root, with
/// forward slashes. Neither path may be absolute or contain `..`; configured
/// directories are checked for this during validation.
pub fn relative_to(from: &Path, to: &Path) -> String {
    let normal = |p: &Path| -> Vec<String> {
        p.components()
            .filter(|c| !matches!(c, Component::CurDir))
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect()
    };
    let from = normal(from);
    let to = normal(to);
    let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();

    let mut parts: Vec<String> = vec!["..".to_string(); from.len() - common];
    parts.extend(to[common..].iter().cloned());
    parts.join("/")
}

/// Writes the generated artifacts under `root` for one configuration.
pub struct ArtifactWriter<'a> {
    renderer: &'a dyn TemplateRenderer,
    config: &'a ValidatedConfig,
    root: &'a Path,
}

impl<'a> ArtifactWriter<'a> {
    pub fn new(
        renderer: &'a dyn TemplateRenderer,
        config: &'a ValidatedConfig,
        root: &'a Path,
    ) -> Self {
        Self {
            renderer,
            config,
            root,
        }
    }

    pub fn aggregator_path(&self) -> PathBuf {
        self.root
            .join(&self.config.directories.sim_uvm)
            .join("base")
            .join(format!("{}.sv", package_name(self.config)))
    }

    pub fn entry_path(&self) -> PathBuf {
        self.root
            .join(&self.config.directories.sim_tb)
            .join(format!("{}.sv", testbench_name(self.config)))
    }

    fn exec_path(&self, file: &str) -> PathBuf {
        self.root.join(&self.config.directories.sim_exec).join(file)
    }

    /// Renders the package content. Every include points at a component
    /// recorded in `manifest`, in include order.
    ///
    /// # Errors
    /// * `Error::DependencyError` if any component is unrecorded or missing
    pub fn render_aggregator(&self, manifest: &GeneratedFileManifest) -> Result<String> {
        let components = manifest.require_components("package")?;
        let includes: Vec<String> = components
            .iter()
            .filter_map(|entry| entry.relative_path.as_deref())
            .map(|rel| relative_to(Path::new("base"), Path::new(rel)))
            .collect();

        let context = json!({
            "timescale": self.config.timescale,
            "module_name": self.config.module_name,
            "package_name": package_name(self.config),
            "includes": includes,
        });
        self.renderer.render(PACKAGE_TEMPLATE, &context)
    }

    pub fn write_aggregator(&self, manifest: &GeneratedFileManifest) -> Result<PathBuf> {
        let content = self.render_aggregator(manifest)?;
        let path = self.aggregator_path();
        write_file(&path, &content)?;
        Ok(path)
    }

    /// Renders the testbench top.
    ///
    /// # Errors
    /// * `Error::DependencyError` if the package has not been generated
    pub fn render_entry(&self, manifest: &GeneratedFileManifest) -> Result<String> {
        let package = manifest
            .get(Artifact::Aggregator)
            .filter(|entry| entry.path.is_file())
            .ok_or_else(|| Error::DependencyError {
                step: "testbench".to_string(),
                missing: vec![Artifact::Aggregator.to_string()],
            })?;
        let package_file = package
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let context = json!({
            "timescale": self.config.timescale,
            "module_name": self.config.module_name,
            "interface_name": self.config.interface_name,
            "package_file": package_file,
            "package_name": package_name(self.config),
            "tb_name": testbench_name(self.config),
            "ports": self.config.signals,
            "wave_format": self.config.wave_format,
            "timeout": self.config.timeout,
            "clock_mhz": CLOCK_MHZ,
            "half_period_ns": 1000 / CLOCK_MHZ / 2,
            "reset_ns": RESET_NS,
        });
        self.renderer.render(TESTBENCH_TEMPLATE, &context)
    }

    pub fn write_entry(&self, manifest: &GeneratedFileManifest) -> Result<PathBuf> {
        let content = self.render_entry(manifest)?;
        let path = self.entry_path();
        write_file(&path, &content)?;
        Ok(path)
    }

    pub fn render_run_script(&self) -> Result<String> {
        let dirs = &self.config.directories;
        let incdirs: Vec<String> = UVM_SUBDIRS
            .iter()
            .map(|subdir| relative_to(&dirs.sim_exec, &dirs.sim_uvm.join(subdir)))
            .collect();

        let context = json!({
            "module_name": self.config.module_name,
            "run_config": RUN_CONFIG_FILE,
            "incdirs": incdirs,
            "tb_name": testbench_name(self.config),
        });
        self.renderer.render(RUN_SCRIPT_TEMPLATE, &context)
    }

    pub fn write_run_script(&self) -> Result<PathBuf> {
        let content = self.render_run_script()?;
        let path = self.exec_path(RUN_SCRIPT_FILE);
        write_file(&path, &content)?;
        Ok(path)
    }

    pub fn render_run_config(&self) -> Result<String> {
        let context = json!({
            "module_name": self.config.module_name,
            "scenarios": scenarios(self.config),
        });
        self.renderer.render(RUN_CONFIG_TEMPLATE, &context)
    }

    pub fn write_run_config(&self) -> Result<PathBuf> {
        let content = self.render_run_config()?;
        let path = self.exec_path(RUN_CONFIG_FILE);
        write_file(&path, &content)?;
        Ok(path)
    }

    /// Renders the compilation file list: interface source, module source,
    /// the UVM switch, then the testbench top.
    pub fn render_file_list(&self) -> Result<String> {
        let dirs = &self.config.directories;
        let rtl_sources = vec![
            relative_to(
                &dirs.sim_exec,
                &dirs.rtl_interfaces.join(format!("{}.sv", self.config.interface_name)),
            ),
            relative_to(
                &dirs.sim_exec,
                &dirs.rtl_hdl.join(format!("{}.sv", self.config.module_name)),
            ),
        ];
        let testbench = relative_to(
            &dirs.sim_exec,
            &dirs.sim_tb.join(format!("{}.sv", testbench_name(self.config))),
        );
        debug!("File list sources: {rtl_sources:?}, {testbench}");

        let context = json!({
            "module_name": self.config.module_name,
            "rtl_sources": rtl_sources,
            "testbench": testbench,
        });
        self.renderer.render(FILE_LIST_TEMPLATE, &context)
    }

    pub fn write_file_list(&self) -> Result<PathBuf> {
        let content = self.render_file_list()?;
        let path = self.exec_path(&file_list_name(self.config));
        write_file(&path, &content)?;
        Ok(path)
    }
}
