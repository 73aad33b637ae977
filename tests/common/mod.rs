//! Shared testing utilities for ignitool CLI tests.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Testing harness providing an isolated project directory for CLI
/// exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated project directory.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        Self { root }
    }

    /// Absolute path to the project root.
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Write a file relative to the project root, creating parents.
    pub fn write(&self, rel: &str, content: &str) {
        let path = self.root().join(rel);
        fs::create_dir_all(path.parent().expect("file path has a parent"))
            .expect("Failed to create parent directories");
        fs::write(path, content).expect("Failed to write test file");
    }

    /// Read a file relative to the project root.
    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.root().join(rel)).expect("Failed to read test file")
    }

    /// Whether a path relative to the project root exists.
    pub fn exists(&self, rel: &str) -> bool {
        self.root().join(rel).exists()
    }

    /// Path to the built ignition config.
    pub fn built_config(&self) -> PathBuf {
        self.root().join("_build/ignition/config.ign")
    }

    /// Build a command for invoking the compiled `ignitool` binary in the
    /// project root, with no recognized variables in the environment.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("ignitool").expect("Failed to locate ignitool binary");
        cmd.current_dir(self.root());
        for name in [
            "ROOT_PASSWD",
            "ADMIN_PASSWD",
            "ADMIN_SSH_KEYS",
            "ADMIN_TOTP",
            "DISK_PASSWD",
            "ADGUARD_MAC",
        ] {
            cmd.env_remove(name);
        }
        cmd
    }

    /// Like [`Self::cli`], but with all required secrets supplied.
    pub fn cli_with_secrets(&self) -> Command {
        let mut cmd = self.cli();
        cmd.env("ROOT_PASSWD", "root-secret")
            .env("ADMIN_PASSWD", "admin-secret")
            .env("ADMIN_SSH_KEYS", "ssh-ed25519 AAAA admin@host")
            .env("ADMIN_TOTP", "totp-secret")
            .env("DISK_PASSWD", "disk-secret");
        cmd
    }

    /// Write minimal templates so a build can succeed without further setup.
    pub fn write_minimal_templates(&self) {
        self.write(
            "ignition/config.ign",
            r#"{"ignition": {"version": "3.4.0"}, "storage": {"files": []}, "systemd": {"units": []}}"#,
        );
        self.write("combustion/script", "#!/bin/bash\ntrue\n");
    }
}
