//! Common test utilities for CLI integration tests.
//!
//! Each [`TestEnv`] owns a temporary data directory, so tests never touch
//! `~/.fleetbook` and can run in parallel.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

/// Environment variables that would leak the developer's settings into a test.
const ISOLATED_VARS: [&str; 7] = [
    "FLEETBOOK_DATA_DIR",
    "FLEETBOOK_ACTOR",
    "FLEETBOOK_LOG_MODE",
    "FLEETBOOK_OUTPUT_FORMAT",
    "FLEETBOOK_DEFAULT_PAGE_SIZE",
    "FLEETBOOK_MAXIMUM_LOCK_WAIT_SECONDS",
    "FLEETBOOK_DISABLE_AUTOINIT",
];

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    temp_dir: TempDir,
    /// Path to the fleetbook data directory
    pub data_dir: PathBuf,
}

impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory is not created; the first command does that.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join("fleetbook-data");

        Self { temp_dir, data_dir }
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// A command with no flags and a clean environment.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("fleetbook").expect("Failed to find fleetbook binary");
        for var in ISOLATED_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// A command with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// A command acting as `actor`.
    pub fn as_actor(&self, actor: i64) -> Command {
        let mut cmd = self.command();
        cmd.arg("--actor").arg(actor.to_string());
        cmd
    }

    /// A privileged command.
    pub fn as_admin(&self) -> Command {
        let mut cmd = self.as_actor(0);
        cmd.arg("--privileged");
        cmd
    }

    /// Add a car and return its id.
    pub fn add_car(&self, model: &str, price: &str) -> i64 {
        let output = self
            .as_admin()
            .args(["resource", "add", "--brand", "Toyota", "--model", model])
            .args(["--price", price, "--format", "json"])
            .output()
            .expect("Failed to run resource add");
        assert!(
            output.status.success(),
            "resource add failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        json_of(&output.stdout)["id"]
            .as_i64()
            .expect("resource id in output")
    }

    /// Book `car` for `actor`, returning the reservation as JSON.
    pub fn reserve(&self, actor: i64, car: i64, start: &str, end: &str) -> Value {
        let output = self
            .as_actor(actor)
            .args(["reserve", "--resource", &car.to_string()])
            .args(["--start", start, "--end", end, "--format", "json"])
            .output()
            .expect("Failed to run reserve");
        assert!(
            output.status.success(),
            "reserve failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        json_of(&output.stdout)
    }

    /// Fetch a car as JSON.
    pub fn car(&self, id: i64) -> Value {
        let output = self
            .command()
            .args(["resource", "show", &id.to_string(), "--format", "json"])
            .output()
            .expect("Failed to run resource show");
        assert!(output.status.success());
        json_of(&output.stdout)
    }
}

/// Parse command stdout as JSON.
pub fn json_of(stdout: &[u8]) -> Value {
    serde_json::from_slice(stdout).expect("stdout is not JSON")
}
