//! Common test utilities for stack-filters integration tests

// Not every helper is used by every test module
#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// An isolated working directory for running the binary.
///
/// The binary runs with the project as its current directory and with
/// `XDG_CONFIG_HOME`/`HOME` pointed inside it, so no user configuration leaks
/// into a test.
pub struct TestProject {
    _temp_dir: TempDir,
    project_dir: PathBuf,
    home_dir: PathBuf,
}

impl TestProject {
    pub fn new() -> Result<Self> {
        stack_filters::test_utils::init_test_logging(None);

        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().join("project");
        let home_dir = temp_dir.path().join("home");
        fs::create_dir_all(&project_dir)?;
        fs::create_dir_all(&home_dir)?;

        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
            home_dir,
        })
    }

    pub fn project_path(&self) -> &Path {
        &self.project_dir
    }

    /// Write a file relative to the project directory, creating parents.
    pub fn write_file(&self, path: &str, content: &str) -> Result<PathBuf> {
        let full = self.project_dir.join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&full, content)?;
        Ok(full)
    }

    /// Write `stack-filters.toml` in the project directory.
    pub fn write_config(&self, content: &str) -> Result<PathBuf> {
        self.write_file("stack-filters.toml", content)
    }

    /// Write the user-wide configuration file.
    pub fn write_global_config(&self, content: &str) -> Result<PathBuf> {
        let path = self.home_dir.join(".config").join("stack-filters").join("config.toml");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        Ok(fs::read_to_string(self.project_dir.join(path))?)
    }

    /// A `stack-filters` command running inside the project.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("stack-filters").unwrap();
        cmd.current_dir(&self.project_dir)
            .env("HOME", &self.home_dir)
            .env("XDG_CONFIG_HOME", self.home_dir.join(".config"))
            .env("NO_COLOR", "1")
            .env_remove("STACK_FILTERS_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }
}
