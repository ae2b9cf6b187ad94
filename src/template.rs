//! Component templates and literal token expansion.
//! Templates are plain SystemVerilog files; expansion rewrites the tokens of a
//! [`SubstitutionMap`] and nothing else. There are no conditionals, loops or
//! includes.

use crate::error::{Error, Result};
use crate::substitution::SubstitutionMap;
use log::debug;
use std::fmt;
use std::path::{Path, PathBuf};

/// The seven per-role component files of a generated environment.
///
/// Declaration order is the aggregator include order, which is also the
/// compile-dependency order of the generated classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentRole {
    Transaction,
    Sequence,
    Driver,
    Monitor,
    Agent,
    Environment,
    Test,
}

impl ComponentRole {
    pub const ALL: [ComponentRole; 7] = [
        ComponentRole::Transaction,
        ComponentRole::Sequence,
        ComponentRole::Driver,
        ComponentRole::Monitor,
        ComponentRole::Agent,
        ComponentRole::Environment,
        ComponentRole::Test,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentRole::Transaction => "transaction",
            ComponentRole::Sequence => "sequence",
            ComponentRole::Driver => "driver",
            ComponentRole::Monitor => "monitor",
            ComponentRole::Agent => "agent",
            ComponentRole::Environment => "environment",
            ComponentRole::Test => "test",
        }
    }

    /// Template file name inside the library.
    pub fn template_name(&self) -> &'static str {
        match self {
            ComponentRole::Transaction => "transaction_template.sv",
            ComponentRole::Sequence => "sequence_template.sv",
            ComponentRole::Driver => "driver_template.sv",
            ComponentRole::Monitor => "monitor_template.sv",
            ComponentRole::Agent => "agent_template.sv",
            ComponentRole::Environment => "env_template.sv",
            ComponentRole::Test => "test_template.sv",
        }
    }

    /// `sim_uvm` subdirectory and file suffix of the generated file.
    fn output_parts(&self) -> (&'static str, &'static str) {
        match self {
            ComponentRole::Transaction => ("transactions", "transaction"),
            ComponentRole::Sequence => ("sequences", "sequence"),
            ComponentRole::Driver => ("agents", "driver"),
            ComponentRole::Monitor => ("agents", "monitor"),
            ComponentRole::Agent => ("agents", "agent"),
            ComponentRole::Environment => ("env", "env"),
            ComponentRole::Test => ("tests", "test"),
        }
    }
}

impl fmt::Display for ComponentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which template produces which file, relative to `sim_uvm`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDescriptor {
    pub role: ComponentRole,
    pub template_name: &'static str,
    /// Forward-slash separated so it can be used verbatim in include paths.
    pub output_relative_path: String,
}

impl TemplateDescriptor {
    pub fn new(role: ComponentRole, module_name: &str) -> Self {
        let (subdir, suffix) = role.output_parts();
        Self {
            role,
            template_name: role.template_name(),
            output_relative_path: format!("{subdir}/{module_name}_{suffix}.sv"),
        }
    }

    /// Descriptors for all seven roles, in include order.
    pub fn all(module_name: &str) -> Vec<TemplateDescriptor> {
        ComponentRole::ALL
            .iter()
            .map(|role| TemplateDescriptor::new(*role, module_name))
            .collect()
    }
}

/// Rewrites every token of `map` found in `content` in one left-to-right pass.
///
/// At each position the longest matching token wins, so `register_file_if` is
/// never read as `register_file` followed by `_if`. Replacement text is never
/// scanned again. Content without any token comes back unchanged.
pub fn expand(content: &str, map: &SubstitutionMap) -> String {
    let Some(pattern) = map.pattern() else {
        return content.to_string();
    };
    pattern
        .replace_all(content, |caps: &regex::Captures<'_>| {
            let token = &caps[0];
            map.get(token).unwrap_or(token).to_string()
        })
        .into_owned()
}

/// Directory holding the named template files.
#[derive(Debug, Clone)]
pub struct TemplateLibrary {
    root: PathBuf,
}

impl TemplateLibrary {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Reads the template called `name`.
    ///
    /// # Errors
    /// * `Error::TemplateNotFound` if the file is absent
    /// * `Error::TemplateReadError` if it exists but cannot be read as UTF-8 text
    pub fn load(&self, name: &str) -> Result<String> {
        let path = self.path_of(name);
        if !path.is_file() {
            return Err(Error::TemplateNotFound {
                name: name.to_string(),
                path,
            });
        }
        debug!("Reading template {}", path.display());
        std::fs::read_to_string(&path).map_err(|source| Error::TemplateReadError {
            name: name.to_string(),
            path,
            source,
        })
    }
}

/// Writes `content` to `path`, creating missing parent directories.
///
/// # Errors
/// * `Error::WriteError` if the parent cannot be created or the file written
pub fn write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::write(path, e))?;
    }
    std::fs::write(path, content).map_err(|e| Error::write(path, e))
}

/// Expands one component template into its file under `sim_uvm_dir`.
///
/// Returns the path written.
pub fn expand_to_file(
    library: &TemplateLibrary,
    descriptor: &TemplateDescriptor,
    map: &SubstitutionMap,
    sim_uvm_dir: &Path,
) -> Result<PathBuf> {
    let content = library.load(descriptor.template_name)?;
    let output = expand(&content, map);
    let target = sim_uvm_dir.join(&descriptor.output_relative_path);
    write_file(&target, &output)?;
    Ok(target)
}
