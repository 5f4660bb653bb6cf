mod case;
mod runner;

pub use case::{ExpectedStatus, FixtureCase, FIXTURE_SCHEMA_V1};
pub use runner::{assert_fixture, list_fixtures, read_case, run_fixture, FixtureReport};

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Failed to read file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse fixture case {path}: {source}")]
    ParseCase {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid fixture schema version \"{found}\", expected \"{expected}\".")]
    InvalidSchemaVersion { expected: String, found: String },
    #[error("No fixture directories under {path}.")]
    FixturesEmpty { path: PathBuf },
    #[error("Status mismatch: expected {expected:?}, got {actual:?} ({error}).")]
    StatusMismatch {
        expected: ExpectedStatus,
        actual: ExpectedStatus,
        error: String,
    },
    #[error("Field {field} mismatch: expected {expected:?}, got {actual:?}.")]
    FieldMismatch {
        field: &'static str,
        expected: String,
        actual: String,
    },
}

pub fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

pub fn fixtures_root() -> PathBuf {
    workspace_root().join("fixtures").join("forms")
}

pub fn fixture_dir(name: &str) -> PathBuf {
    fixtures_root().join(name)
}
