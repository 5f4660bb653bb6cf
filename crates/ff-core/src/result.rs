use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultStatus {
    Success,
    Error,
}

/// The record handed to whatever transports the diagram to a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramResult {
    pub status: ResultStatus,
    pub error: String,
    pub diagram_title: String,
    pub diagram_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_primary_color: Option<String>,
}

impl DiagramResult {
    pub fn success(
        diagram_title: impl Into<String>,
        diagram_text: impl Into<String>,
        theme_primary_color: Option<String>,
    ) -> Self {
        Self {
            status: ResultStatus::Success,
            error: String::new(),
            diagram_title: diagram_title.into(),
            diagram_text: diagram_text.into(),
            theme_primary_color,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            status: ResultStatus::Error,
            error: error.into(),
            diagram_title: String::new(),
            diagram_text: String::new(),
            theme_primary_color: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ResultStatus::Success
    }
}
