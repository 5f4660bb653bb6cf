use std::fs;
use std::path::Path;

use ff_api::GenerateOptions;
use ff_core::{DiagramResult, FormFlowError};
use ff_render::{with_front_matter, ThemeSettings};
use serde::Deserialize;

use crate::{map_cli_config_read, map_cli_config_invalid};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct CliConfig {
    pub(crate) screen: ScreenConfig,
    pub(crate) theme: Option<ThemeSettings>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct ScreenConfig {
    pub(crate) heading: String,
    pub(crate) theme_color_property: String,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        let defaults = GenerateOptions::default();
        Self {
            heading: defaults.expected_heading,
            theme_color_property: defaults.theme_color_property,
        }
    }
}

impl CliConfig {
    pub(crate) fn generate_options(&self) -> GenerateOptions {
        GenerateOptions {
            expected_heading: self.screen.heading.clone(),
            theme_color_property: self.screen.theme_color_property.clone(),
        }
    }

    /// Diagram text as written to disk: front matter first when a theme is
    /// configured, falling back to the snapshot's colour.
    pub(crate) fn decorate(&self, result: &DiagramResult) -> Result<String, FormFlowError> {
        let Some(theme) = &self.theme else {
            return Ok(result.diagram_text.clone());
        };
        let mut theme = theme.clone();
        if theme.primary_color.is_none() {
            theme.primary_color = result.theme_primary_color.clone();
        }
        with_front_matter(&theme, &result.diagram_text)
    }
}

pub(crate) fn load_config(path: Option<&str>) -> Result<CliConfig, FormFlowError> {
    let Some(path) = path else {
        return Ok(CliConfig::default());
    };
    if !Path::new(path).exists() {
        return Err(FormFlowError::new(
            "CLI_CONFIG_NOT_FOUND",
            format!("Config file does not exist: {}", path),
        ));
    }
    let raw = fs::read_to_string(path).map_err(map_cli_config_read)?;
    toml::from_str(&raw).map_err(map_cli_config_invalid)
}
