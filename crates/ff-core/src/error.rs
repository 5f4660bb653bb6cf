use crate::types::SourceSpan;
use thiserror::Error;

pub mod codes {
    pub const SNAPSHOT_PARSE_ERROR: &str = "SNAPSHOT_PARSE_ERROR";
    pub const SCREEN_HEADING_MISSING: &str = "SCREEN_HEADING_MISSING";
    pub const SCREEN_HEADING_MISMATCH: &str = "SCREEN_HEADING_MISMATCH";
    pub const QUESTION_LABEL_MISSING: &str = "QUESTION_LABEL_MISSING";
    pub const QUESTION_LABEL_INVALID: &str = "QUESTION_LABEL_INVALID";
    pub const QUESTION_NUMBERING_GAP: &str = "QUESTION_NUMBERING_GAP";
    pub const CHOICE_LABEL_MISSING: &str = "CHOICE_LABEL_MISSING";
    pub const SECTION_LABEL_MISSING: &str = "SECTION_LABEL_MISSING";
    pub const SECTION_CONTAINER_MISSING: &str = "SECTION_CONTAINER_MISSING";
    pub const DESTINATION_UNRESOLVED: &str = "DESTINATION_UNRESOLVED";
    pub const DESTINATION_OUT_OF_RANGE: &str = "DESTINATION_OUT_OF_RANGE";
    pub const FRONT_MATTER_INVALID: &str = "FRONT_MATTER_INVALID";
}

/// Coarse classification of an error code, used by hosts that need to tell
/// a broken snapshot apart from a stale destination reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Input,
    Precondition,
    Structure,
    Resolution,
    Host,
}

#[derive(Debug, Error, Clone)]
#[error("{code}: {message}")]
pub struct FormFlowError {
    pub code: String,
    pub message: String,
    pub span: Option<SourceSpan>,
}

impl FormFlowError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            span: None,
        }
    }

    pub fn with_span(
        code: impl Into<String>,
        message: impl Into<String>,
        span: SourceSpan,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            span: Some(span),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self.code.as_str() {
            codes::SNAPSHOT_PARSE_ERROR => ErrorKind::Input,
            codes::SCREEN_HEADING_MISSING | codes::SCREEN_HEADING_MISMATCH => {
                ErrorKind::Precondition
            }
            codes::DESTINATION_UNRESOLVED | codes::DESTINATION_OUT_OF_RANGE => {
                ErrorKind::Resolution
            }
            codes::QUESTION_LABEL_MISSING
            | codes::QUESTION_LABEL_INVALID
            | codes::QUESTION_NUMBERING_GAP
            | codes::CHOICE_LABEL_MISSING
            | codes::SECTION_LABEL_MISSING
            | codes::SECTION_CONTAINER_MISSING => ErrorKind::Structure,
            _ => ErrorKind::Host,
        }
    }
}
