use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test harness for running CLI commands against a temporary data directory
pub struct CliTestHarness {
    temp_dir: TempDir,
    data_dir: PathBuf,
}

impl CliTestHarness {
    /// Create a harness whose roster holds Alice, Bob and Carol
    pub fn new() -> Self {
        Self::with_roster(&["Alice", "Bob", "Carol"])
    }

    pub fn with_roster(names: &[&str]) -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let data_dir = temp_dir.path().join("data");
        fs::create_dir_all(&data_dir).expect("Failed to create data directory");

        let mut roster = String::from("name\n");
        for name in names {
            roster.push_str(name);
            roster.push('\n');
        }
        fs::write(data_dir.join("team_members.csv"), roster).expect("Failed to write roster");

        Self { temp_dir, data_dir }
    }

    /// Get a Command instance configured for testing
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("weekplan").expect("Failed to find weekplan binary");

        cmd.current_dir(self.temp_dir.path())
            .env("WEEKPLAN_CONFIG", self.temp_dir.path().join("weekplan.toml"))
            .env("WEEKPLAN_DATA_DIR", &self.data_dir)
            .env("WEEKPLAN_YEAR", "2026")
            .env_remove("WEEKPLAN_DEFAULT_MEMBER")
            .env_remove("WEEKPLAN_LOG");

        cmd
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Write a `weekplan.toml` next to the data directory
    pub fn write_config(&self, content: &str) {
        fs::write(self.temp_dir.path().join("weekplan.toml"), content)
            .expect("Failed to write config");
    }

    pub fn write_table(&self, name: &str, content: &str) {
        fs::write(self.data_dir.join(name), content).expect("Failed to write table");
    }

    pub fn read_table(&self, name: &str) -> String {
        fs::read_to_string(self.data_dir.join(name)).expect("Failed to read table")
    }

    /// Helper to run a command and assert success
    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    /// Helper to run a command and assert failure
    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }

    pub fn add_task(&self, week: &str, member: &str, label: &str) -> assert_cmd::assert::Assert {
        self.run_success(&[
            "task", "add", "--week", week, "--member", member, "--label", label,
            "--description", "Some work",
        ])
    }
}

/// Utility functions for test assertions
pub mod assertions {
    use predicates::prelude::*;

    pub fn has_task_table_headers() -> impl Predicate<str> {
        predicate::str::contains("ID")
            .and(predicate::str::contains("Member"))
            .and(predicate::str::contains("Status"))
    }

    pub fn has_error() -> impl Predicate<str> {
        predicate::str::contains("Error").or(predicate::str::contains("error"))
    }
}
