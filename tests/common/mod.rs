//! Shared test fixtures
//!
//! Provides a temp-dir environment with a studio configuration pointing at
//! the bundled demo catalog with zero generator latency.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Test environment with an isolated configuration file
pub struct TestEnvironment {
    pub root: TempDir,
    pub config_path: PathBuf,
}

impl TestEnvironment {
    /// Create a new test environment with the default test configuration
    pub fn new() -> Self {
        Self::with_config(
            r#"
[catalog]
base_url = ""
api_key = ""
timeout_secs = 5

[generator]
latency_ms = 0
default_count = 2
max_count = 10

[logging]
level = "info"
"#,
        )
    }

    /// Create a test environment with custom configuration content
    pub fn with_config(config_content: &str) -> Self {
        let root = TempDir::new().expect("Failed to create temp directory");
        let config_path = root.path().join("studio.toml");
        fs::write(&config_path, config_content).expect("Failed to write config");

        Self { root, config_path }
    }

    /// Get the config path as a string
    pub fn config(&self) -> &str {
        self.config_path.to_str().unwrap()
    }

    /// Get a bare adlab command
    pub fn studio_cmd(&self) -> assert_cmd::Command {
        assert_cmd::Command::cargo_bin("adlab").unwrap()
    }

    /// Get an adlab generate command configured with this environment
    pub fn generate_cmd(&self) -> assert_cmd::Command {
        let mut cmd = self.studio_cmd();
        cmd.arg("generate").arg("--config").arg(self.config());
        cmd
    }

    /// Get an adlab catalog command configured with this environment
    pub fn catalog_cmd(&self) -> assert_cmd::Command {
        let mut cmd = self.studio_cmd();
        cmd.arg("catalog").arg("--config").arg(self.config());
        cmd
    }
}

impl Default for TestEnvironment {
    fn default() -> Self {
        Self::new()
    }
}
