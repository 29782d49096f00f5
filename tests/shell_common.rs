//! Shared fixture for shell integration tests

use lazyfw::{Framework, ShellConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct ShellFixture {
    pub temp_dir: TempDir,
    pub modules_dir: PathBuf,
    pub examples_dir: PathBuf,
}

impl ShellFixture {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let modules_dir = temp_dir.path().join("modules");
        let examples_dir = temp_dir.path().join("examples");
        fs::create_dir_all(&modules_dir)?;
        fs::create_dir_all(&examples_dir)?;
        Ok(ShellFixture {
            temp_dir,
            modules_dir,
            examples_dir,
        })
    }

    /// Write a module source file under the given root
    pub fn write_module(
        &self,
        root: &Path,
        rel: &str,
        source: &str,
    ) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, source)?;
        Ok(path)
    }

    /// Build a framework over this fixture's roots (runs the initial scan)
    pub fn framework(&self) -> Framework {
        Framework::new(&ShellConfig::default(), self.temp_dir.path())
    }
}
