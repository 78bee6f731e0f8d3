// Shared helpers for kpiboard integration tests
#![allow(dead_code)]

use std::path::PathBuf;

/// Path of a snapshot fixture under tests/data/snapshots.
pub fn snapshot_fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data/snapshots")
        .join(name)
}

/// Command for the kpiboard binary with color and data env vars cleared.
pub fn kpiboard() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(env!("CARGO_BIN_EXE_kpiboard"));
    cmd.env_remove("KPIBOARD_DATA")
        .env_remove("CLICOLOR_FORCE")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}
