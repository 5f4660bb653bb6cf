use serde::{Deserialize, Serialize};

pub const FIXTURE_SCHEMA_V1: &str = "ff-fixture.v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpectedStatus {
    Success,
    Error,
}

/// Expectations stored next to a snapshot as `case.json`. The diagram text
/// itself lives in `expected.mmd` when the case succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureCase {
    pub schema_version: String,
    pub expected_status: ExpectedStatus,
    #[serde(default)]
    pub expected_title: Option<String>,
    #[serde(default)]
    pub expected_theme_primary_color: Option<String>,
    #[serde(default)]
    pub expected_error: Option<String>,
}
