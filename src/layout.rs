//! Output directory tree and its materialization.

use crate::config::ValidatedConfig;
use crate::constants::UVM_SUBDIRS;
use crate::error::{Error, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Directories a run needs, resolved against the output root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryTree {
    dirs: Vec<PathBuf>,
}

impl DirectoryTree {
    /// Builds a tree from explicit paths, dropping duplicates.
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut tree = Self::default();
        for dir in dirs {
            tree.push(dir.into());
        }
        tree
    }

    /// Configured directories, the defaulted simulation directories, then the
    /// UVM component subdirectories.
    pub fn from_config<P: AsRef<Path>>(config: &ValidatedConfig, root: P) -> Self {
        let root = root.as_ref();
        let dirs = &config.directories;
        let mut tree = Self::default();

        for dir in dirs.configured.values() {
            tree.push(root.join(dir));
        }
        for dir in [&dirs.sim_uvm, &dirs.sim_tb, &dirs.sim_exec] {
            tree.push(root.join(dir));
        }
        for subdir in UVM_SUBDIRS {
            tree.push(root.join(&dirs.sim_uvm).join(subdir));
        }
        tree
    }

    fn push(&mut self, dir: PathBuf) {
        if !self.dirs.contains(&dir) {
            self.dirs.push(dir);
        }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }
}

/// Creates every directory of `tree`, including parents.
///
/// Already existing directories are fine. Returns the directories that did not
/// exist before this call, in tree order.
///
/// # Errors
/// * `Error::FileSystemError` if a directory cannot be created, or if the
///   path exists and is not a directory
pub fn materialize(tree: &DirectoryTree) -> Result<Vec<PathBuf>> {
    let mut created = Vec::new();

    for dir in tree.dirs() {
        if dir.is_dir() {
            debug!("Directory already exists: {}", dir.display());
            continue;
        }
        std::fs::create_dir_all(dir).map_err(|e| Error::file_system(dir, e))?;
        info!("Created directory: {}", dir.display());
        created.push(dir.clone());
    }

    Ok(created)
}
