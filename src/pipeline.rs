//! Core generation orchestration.
//! Drives the fixed step sequence, one state per completed step:
//!
//! ```text
//! Init → ConfigValidated → DirectoriesReady → ComponentsGenerated
//!      → AggregateGenerated → EntryGenerated → AuxGenerated → Done
//! ```
//!
//! Any step may move the run to `Failed` instead. Files written by completed
//! steps are left on disk.

use crate::artifacts::ArtifactWriter;
use crate::config::{self, ValidatedConfig};
use crate::error::{Error, Result};
use crate::layout::{self, DirectoryTree};
use crate::manifest::{Artifact, GeneratedFileManifest};
use crate::renderer::{MiniJinjaRenderer, TemplateRenderer};
use crate::substitution::{self, SubstitutionMap};
use crate::template::{self, TemplateDescriptor, TemplateLibrary};
use log::{debug, error, info};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    Init,
    ConfigValidated,
    DirectoriesReady,
    ComponentsGenerated,
    AggregateGenerated,
    EntryGenerated,
    AuxGenerated,
    Done,
    Failed(String),
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Init => f.write_str("init"),
            Stage::ConfigValidated => f.write_str("config-validated"),
            Stage::DirectoriesReady => f.write_str("directories-ready"),
            Stage::ComponentsGenerated => f.write_str("components-generated"),
            Stage::AggregateGenerated => f.write_str("aggregate-generated"),
            Stage::EntryGenerated => f.write_str("entry-generated"),
            Stage::AuxGenerated => f.write_str("aux-generated"),
            Stage::Done => f.write_str("done"),
            Stage::Failed(reason) => write!(f, "failed ({reason})"),
        }
    }
}

/// Inputs of one generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub config_path: PathBuf,
    pub templates_dir: PathBuf,
    /// Root the configured directories are resolved against.
    pub output_root: PathBuf,
}

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub created_dirs: Vec<PathBuf>,
    pub manifest: GeneratedFileManifest,
}

/// One generation run.
///
/// Owns the validated configuration, the substitution map and the manifest
/// for the duration of the run. Steps can be driven one by one, and each
/// refuses to run unless the previous step completed.
pub struct Generator {
    options: GenerateOptions,
    renderer: Box<dyn TemplateRenderer>,
    stage: Stage,
    config: Option<ValidatedConfig>,
    substitutions: Option<SubstitutionMap>,
    manifest: GeneratedFileManifest,
    created_dirs: Vec<PathBuf>,
}

impl Generator {
    pub fn new(options: GenerateOptions) -> Self {
        Self::with_renderer(options, Box::new(MiniJinjaRenderer::new()))
    }

    pub fn with_renderer(options: GenerateOptions, renderer: Box<dyn TemplateRenderer>) -> Self {
        Self {
            options,
            renderer,
            stage: Stage::Init,
            config: None,
            substitutions: None,
            manifest: GeneratedFileManifest::new(),
            created_dirs: Vec::new(),
        }
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn config(&self) -> Option<&ValidatedConfig> {
        self.config.as_ref()
    }

    pub fn substitutions(&self) -> Option<&SubstitutionMap> {
        self.substitutions.as_ref()
    }

    pub fn manifest(&self) -> &GeneratedFileManifest {
        &self.manifest
    }

    /// Runs every remaining step in order.
    pub fn run(mut self) -> Result<GenerateReport> {
        self.validate_config()?;
        self.materialize_directories()?;
        self.generate_components()?;
        self.generate_aggregator()?;
        self.generate_entry()?;
        self.generate_auxiliary()?;
        self.finish()?;

        Ok(GenerateReport {
            created_dirs: self.created_dirs,
            manifest: self.manifest,
        })
    }

    fn expect_stage(&self, step: &str, expected: Stage) -> Result<()> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(Error::StepOrder {
                step: step.to_string(),
                expected: expected.to_string(),
                actual: self.stage.to_string(),
            })
        }
    }

    /// Moves to `next` on success, to `Failed` on error.
    fn advance<T>(&mut self, step: &str, result: Result<T>, next: Stage) -> Result<T> {
        match result {
            Ok(value) => {
                debug!("Step '{step}' complete, now {next}");
                self.stage = next;
                Ok(value)
            }
            Err(err) => {
                error!("Step '{step}' failed: {err}");
                self.stage = Stage::Failed(err.to_string());
                Err(err)
            }
        }
    }

    fn validated(&self) -> Result<&ValidatedConfig> {
        self.config.as_ref().ok_or_else(|| Error::StepOrder {
            step: "generate".to_string(),
            expected: Stage::ConfigValidated.to_string(),
            actual: self.stage.to_string(),
        })
    }

    /// Step 1: load and validate the configuration, derive the substitutions.
    pub fn validate_config(&mut self) -> Result<()> {
        self.expect_stage("validate", Stage::Init)?;
        let result = config::load(&self.options.config_path).and_then(|raw| {
            let validated = config::validate(&raw)?;
            let map = substitution::build(&validated)?;
            Ok((validated, map))
        });
        let (validated, map) = self.advance("validate", result, Stage::ConfigValidated)?;

        info!("Project: {}", validated.project_name);
        info!("Module: {}", validated.module_name);
        self.substitutions = Some(map);
        self.config = Some(validated);
        Ok(())
    }

    /// Step 2: create the output directory tree.
    pub fn materialize_directories(&mut self) -> Result<()> {
        self.expect_stage("directories", Stage::ConfigValidated)?;
        let tree = DirectoryTree::from_config(self.validated()?, &self.options.output_root);
        let result = layout::materialize(&tree);
        self.created_dirs = self.advance("directories", result, Stage::DirectoriesReady)?;
        Ok(())
    }

    fn expand_components(&mut self) -> Result<()> {
        let config = self.validated()?.clone();
        let map = match self.substitutions.clone() {
            Some(map) => map,
            None => substitution::build(&config)?,
        };
        let library = TemplateLibrary::new(&self.options.templates_dir);
        let sim_uvm_dir = self.options.output_root.join(&config.directories.sim_uvm);

        for descriptor in TemplateDescriptor::all(&config.module_name) {
            let path = template::expand_to_file(&library, &descriptor, &map, &sim_uvm_dir)?;
            info!("Generated: {}", path.display());
            self.manifest
                .record_component(descriptor.role, path, &descriptor.output_relative_path);
        }
        Ok(())
    }

    /// Step 3: expand the seven component templates.
    pub fn generate_components(&mut self) -> Result<()> {
        self.expect_stage("components", Stage::DirectoriesReady)?;
        let result = self.expand_components();
        self.advance("components", result, Stage::ComponentsGenerated)
    }

    fn emit<F>(&mut self, step: &str, artifact: Artifact, next: Stage, write: F) -> Result<()>
    where
        F: FnOnce(&ArtifactWriter<'_>, &GeneratedFileManifest) -> Result<PathBuf>,
    {
        let result = match self.validated() {
            Ok(config) => {
                let writer =
                    ArtifactWriter::new(&*self.renderer, config, &self.options.output_root);
                write(&writer, &self.manifest)
            }
            Err(err) => Err(err),
        };
        let path = self.advance(step, result, next)?;
        info!("Generated: {}", path.display());
        self.manifest.record(artifact, path);
        Ok(())
    }

    /// Step 4: emit the package that includes every component.
    pub fn generate_aggregator(&mut self) -> Result<()> {
        self.expect_stage("package", Stage::ComponentsGenerated)?;
        self.emit("package", Artifact::Aggregator, Stage::AggregateGenerated, |w, m| {
            w.write_aggregator(m)
        })
    }

    /// Step 5: emit the testbench top.
    pub fn generate_entry(&mut self) -> Result<()> {
        self.expect_stage("testbench", Stage::AggregateGenerated)?;
        self.emit("testbench", Artifact::Entry, Stage::EntryGenerated, |w, m| {
            w.write_entry(m)
        })
    }

    fn write_auxiliary(&self) -> Result<Vec<(Artifact, PathBuf)>> {
        let config = self.validated()?;
        let writer = ArtifactWriter::new(&*self.renderer, config, &self.options.output_root);
        Ok(vec![
            (Artifact::RunScript, writer.write_run_script()?),
            (Artifact::RunConfig, writer.write_run_config()?),
            (Artifact::FileList, writer.write_file_list()?),
        ])
    }

    /// Step 6: emit the run script, run configuration and file list.
    pub fn generate_auxiliary(&mut self) -> Result<()> {
        self.expect_stage("run files", Stage::EntryGenerated)?;
        let result = self.write_auxiliary();
        let written = self.advance("run files", result, Stage::AuxGenerated)?;
        for (artifact, path) in written {
            info!("Generated: {}", path.display());
            self.manifest.record(artifact, path);
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.expect_stage("finish", Stage::AuxGenerated)?;
        self.stage = Stage::Done;
        Ok(())
    }
}

/// Runs a complete generation with the given options.
pub fn generate(options: GenerateOptions) -> Result<GenerateReport> {
    Generator::new(options).run()
}
