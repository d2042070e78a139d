//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers for common patterns
//! - Inventory fixtures

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Passenger identifier used by the booking helpers.
#[allow(dead_code)]
pub const PASSENGER_ID: &str = "1234 56789 0101";

/// Environment variables that would leak host settings into a test run.
const SEATBOOK_ENV: [&str; 12] = [
    "SEATBOOK_DATA_DIR",
    "SEATBOOK_BUSY_TIMEOUT",
    "SEATBOOK_OUTPUT_FORMAT",
    "SEATBOOK_LOG_MODE",
    "SEATBOOK_USER",
    "SEATBOOK_DISCOUNT_RATE",
    "SEATBOOK_SURCHARGE_RATE",
    "SEATBOOK_VIP_THRESHOLD",
    "SEATBOOK_DEDUP_TTL_MS",
    "SEATBOOK_NOTIFICATION_SINK",
    "SEATBOOK_REQUIRE_VALID_IDENTIFIER",
    "SEATBOOK_MAXIMUM_LOCK_WAIT_SECONDS",
];

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the seatbook data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory is not created; the first command creates it.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join("seatbook-data");
        Self { temp_dir, data_dir }
    }

    /// The seatbook binary with a scrubbed environment and no flags.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("seatbook").expect("Failed to find seatbook binary");
        for var in SEATBOOK_ENV {
            cmd.env_remove(var);
        }
        cmd
    }

    /// The seatbook binary pointed at this environment's data directory.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Path of a file inside the data directory.
    pub fn data_file(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }

    /// Path to the database file.
    pub fn db_path(&self) -> PathBuf {
        self.data_file("seatbook.db")
    }

    /// Write `config.yaml` into the data directory.
    pub fn write_config(&self, contents: &str) {
        std::fs::create_dir_all(&self.data_dir).expect("Failed to create data dir");
        std::fs::write(self.data_file("config.yaml"), contents).expect("Failed to write config");
    }

    pub fn add_seat(&self, id: &str, class: &str) {
        self.command()
            .args(["seat", "add", id, "--class", class])
            .assert()
            .success();
    }

    pub fn add_user(&self, email: &str, name: &str) {
        self.command()
            .args(["user", "add", email, "--name", name])
            .assert()
            .success();
    }

    /// Book a seat and return the reservation id printed on stdout.
    pub fn book(&self, seat: &str, email: &str, price: &str) -> i64 {
        let output = self
            .command()
            .args(["book", seat, "--user", email, "--passenger", "Ana Lopez"])
            .args(["--identifier", PASSENGER_ID, "--price", price])
            .output()
            .expect("Failed to run book command");

        assert!(
            output.status.success(),
            "Book failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout)
            .expect("Invalid UTF-8 in output")
            .trim()
            .parse()
            .expect("Output is not a reservation id")
    }

    /// Run a command with `--format json` and parse stdout.
    pub fn json(&self, args: &[&str]) -> serde_json::Value {
        let output = self
            .command()
            .args(["--format", "json"])
            .args(args)
            .output()
            .expect("Failed to run command");

        assert!(
            output.status.success(),
            "Command {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        serde_json::from_slice(&output.stdout).expect("Output is not JSON")
    }

    /// Seats A1, A2 (economy) and B1 (business), and one user.
    pub fn with_inventory(self) -> Self {
        self.add_seat("A1", "economy");
        self.add_seat("A2", "economy");
        self.add_seat("B1", "business");
        self.add_user("ana@example.com", "Ana Lopez");
        self
    }

    /// Notification kinds written to the outbox, in order.
    pub fn outbox_kinds(&self) -> Vec<String> {
        let contents = std::fs::read_to_string(self.data_file("outbox.jsonl")).unwrap_or_default();
        contents
            .lines()
            .map(|line| {
                let value: serde_json::Value =
                    serde_json::from_str(line).expect("Outbox line is not JSON");
                value["kind"].as_str().unwrap_or_default().to_string()
            })
            .collect()
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
