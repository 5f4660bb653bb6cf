use std::fs;
use std::path::{Path, PathBuf};

use ff_api::{generate_diagram, GenerateOptions};
use ff_core::{DiagramResult, ResultStatus};
use walkdir::WalkDir;

use crate::{ExpectedStatus, FixtureCase, FixtureError, FIXTURE_SCHEMA_V1};

const CASE_FILE: &str = "case.json";
const SNAPSHOT_FILE: &str = "snapshot.xhtml";
const EXPECTED_DIAGRAM_FILE: &str = "expected.mmd";

#[derive(Debug, Clone)]
pub struct FixtureReport {
    pub case: FixtureCase,
    pub result: DiagramResult,
    pub expected_diagram: Option<String>,
}

pub fn list_fixtures(root: &Path) -> Result<Vec<PathBuf>, FixtureError> {
    let mut directories = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_dir() && entry.path().join(CASE_FILE).is_file())
        .map(|entry| entry.into_path())
        .collect::<Vec<_>>();
    directories.sort();

    if directories.is_empty() {
        return Err(FixtureError::FixturesEmpty {
            path: root.to_path_buf(),
        });
    }
    Ok(directories)
}

fn read_file(path: PathBuf) -> Result<String, FixtureError> {
    fs::read_to_string(&path).map_err(|source| FixtureError::ReadFile { path, source })
}

pub fn read_case(fixture_dir: &Path) -> Result<FixtureCase, FixtureError> {
    let path = fixture_dir.join(CASE_FILE);
    let raw = read_file(path.clone())?;
    let case: FixtureCase =
        serde_json::from_str(&raw).map_err(|source| FixtureError::ParseCase { path, source })?;
    if case.schema_version != FIXTURE_SCHEMA_V1 {
        return Err(FixtureError::InvalidSchemaVersion {
            expected: FIXTURE_SCHEMA_V1.to_string(),
            found: case.schema_version,
        });
    }
    Ok(case)
}

pub fn run_fixture(fixture_dir: &Path) -> Result<FixtureReport, FixtureError> {
    let case = read_case(fixture_dir)?;
    let snapshot = read_file(fixture_dir.join(SNAPSHOT_FILE))?;
    let expected_path = fixture_dir.join(EXPECTED_DIAGRAM_FILE);
    let expected_diagram = if expected_path.is_file() {
        Some(read_file(expected_path)?)
    } else {
        None
    };
    let result = generate_diagram(&snapshot, &GenerateOptions::default());
    Ok(FixtureReport {
        case,
        result,
        expected_diagram,
    })
}

fn observed_status(result: &DiagramResult) -> ExpectedStatus {
    match result.status {
        ResultStatus::Success => ExpectedStatus::Success,
        ResultStatus::Error => ExpectedStatus::Error,
    }
}

fn check_field(
    field: &'static str,
    expected: Option<&str>,
    actual: Option<&str>,
) -> Result<(), FixtureError> {
    match expected {
        Some(expected) if Some(expected) != actual => Err(FixtureError::FieldMismatch {
            field,
            expected: expected.to_string(),
            actual: actual.unwrap_or_default().to_string(),
        }),
        _ => Ok(()),
    }
}

pub fn assert_fixture(report: &FixtureReport) -> Result<(), FixtureError> {
    let actual = observed_status(&report.result);
    if actual != report.case.expected_status {
        return Err(FixtureError::StatusMismatch {
            expected: report.case.expected_status,
            actual,
            error: report.result.error.clone(),
        });
    }

    match actual {
        ExpectedStatus::Success => {
            check_field(
                "diagramTitle",
                report.case.expected_title.as_deref(),
                Some(&report.result.diagram_title),
            )?;
            check_field(
                "themePrimaryColor",
                report.case.expected_theme_primary_color.as_deref(),
                report.result.theme_primary_color.as_deref(),
            )?;
            check_field(
                "diagramText",
                report.expected_diagram.as_deref(),
                Some(&report.result.diagram_text),
            )
        }
        ExpectedStatus::Error => check_field(
            "error",
            report.case.expected_error.as_deref(),
            Some(&report.result.error),
        ),
    }
}
