//! Record of the files produced during one run.

use crate::error::{Error, Result};
use crate::template::ComponentRole;
use std::fmt;
use std::path::{Path, PathBuf};

/// Kind of generated artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    Component(ComponentRole),
    Aggregator,
    Entry,
    RunScript,
    RunConfig,
    FileList,
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Artifact::Component(role) => write!(f, "{role} component"),
            Artifact::Aggregator => f.write_str("package"),
            Artifact::Entry => f.write_str("testbench"),
            Artifact::RunScript => f.write_str("run script"),
            Artifact::RunConfig => f.write_str("test configuration"),
            Artifact::FileList => f.write_str("file list"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub artifact: Artifact,
    pub path: PathBuf,
    /// Path relative to `sim_uvm` for components, `None` otherwise.
    pub relative_path: Option<String>,
}

/// Generated files, in the order they were written.
#[derive(Debug, Clone, Default)]
pub struct GeneratedFileManifest {
    entries: Vec<ManifestEntry>,
}

impl GeneratedFileManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_component<P: Into<PathBuf>>(
        &mut self,
        role: ComponentRole,
        path: P,
        relative_path: &str,
    ) {
        self.entries.push(ManifestEntry {
            artifact: Artifact::Component(role),
            path: path.into(),
            relative_path: Some(relative_path.to_string()),
        });
    }

    pub fn record<P: Into<PathBuf>>(&mut self, artifact: Artifact, path: P) {
        self.entries.push(ManifestEntry {
            artifact,
            path: path.into(),
            relative_path: None,
        });
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(|e| e.path.as_path())
    }

    pub fn get(&self, artifact: Artifact) -> Option<&ManifestEntry> {
        self.entries.iter().find(|e| e.artifact == artifact)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the seven component entries in include order.
    ///
    /// # Errors
    /// * `Error::DependencyError` naming every role that is unrecorded or
    ///   whose file is no longer on disk
    pub fn require_components(&self, step: &str) -> Result<Vec<&ManifestEntry>> {
        let mut found = Vec::with_capacity(ComponentRole::ALL.len());
        let mut missing = Vec::new();

        for role in ComponentRole::ALL {
            match self.get(Artifact::Component(role)) {
                Some(entry) if entry.path.is_file() => found.push(entry),
                Some(entry) => missing.push(format!("{role} ({})", entry.path.display())),
                None => missing.push(role.to_string()),
            }
        }

        if missing.is_empty() {
            Ok(found)
        } else {
            Err(Error::DependencyError {
                step: step.to_string(),
                missing,
            })
        }
    }
}
