use pkm_mode::tooling::cli::{CliContext, StartupFlags};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temp workspace with its own config file and session log.
pub struct TestWorkspace {
    pub temp: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("workspace")).unwrap();
        let workspace = Self { temp };
        workspace.write_config("");
        workspace
    }

    pub fn root(&self) -> PathBuf {
        self.temp.path().join("workspace")
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp.path().join("config.toml")
    }

    pub fn session_path(&self) -> PathBuf {
        self.temp.path().join("state").join("session.jsonl")
    }

    pub fn write_config(&self, toml: &str) {
        fs::write(self.config_path(), toml).unwrap();
    }

    /// Write a file relative to the workspace root.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(relative);
        write_file(&path, content);
        path
    }

    pub fn context(&self, startup: StartupFlags) -> CliContext {
        CliContext::new(self.root(), Some(self.config_path()))
            .unwrap()
            .with_session_path(Some(self.session_path()))
            .with_startup(startup)
    }
}

pub fn write_file(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}
