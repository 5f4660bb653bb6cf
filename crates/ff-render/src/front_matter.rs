use ff_core::{codes, FormFlowError};
use serde::{Deserialize, Serialize};

/// Renderer theme a host may put in front of the flowchart text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    pub name: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub border_color: Option<String>,
    pub curve: Option<String>,
}

#[derive(Debug, Serialize)]
struct FrontMatter<'a> {
    config: FrontMatterConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FrontMatterConfig<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    theme: Option<&'a str>,
    #[serde(skip_serializing_if = "ThemeVariables::is_empty")]
    theme_variables: ThemeVariables<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    flowchart: Option<FlowchartConfig<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    primary_color: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    secondary_color: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    primary_border_color: Option<&'a str>,
}

impl ThemeVariables<'_> {
    fn is_empty(&self) -> bool {
        self.primary_color.is_none()
            && self.secondary_color.is_none()
            && self.primary_border_color.is_none()
    }
}

#[derive(Debug, Serialize)]
struct FlowchartConfig<'a> {
    curve: &'a str,
}

pub fn compose_front_matter(theme: &ThemeSettings) -> Result<String, FormFlowError> {
    let front_matter = FrontMatter {
        config: FrontMatterConfig {
            theme: theme.name.as_deref(),
            theme_variables: ThemeVariables {
                primary_color: theme.primary_color.as_deref(),
                secondary_color: theme.secondary_color.as_deref(),
                primary_border_color: theme.border_color.as_deref(),
            },
            flowchart: theme
                .curve
                .as_deref()
                .map(|curve| FlowchartConfig { curve }),
        },
    };
    let yaml = serde_yaml::to_string(&front_matter)
        .map_err(|error| FormFlowError::new(codes::FRONT_MATTER_INVALID, error.to_string()))?;
    Ok(format!("---\n{}---\n", yaml))
}

pub fn with_front_matter(
    theme: &ThemeSettings,
    diagram_text: &str,
) -> Result<String, FormFlowError> {
    Ok(format!("{}{}", compose_front_matter(theme)?, diagram_text))
}

#[cfg(test)]
mod front_matter_tests {
    use super::*;

    #[test]
    fn full_theme_renders_all_blocks() {
        let theme = ThemeSettings {
            name: Some("base".to_string()),
            primary_color: Some("#03787c".to_string()),
            secondary_color: Some("#e1f2f2".to_string()),
            border_color: Some("#025a5d".to_string()),
            curve: Some("basis".to_string()),
        };
        let text = compose_front_matter(&theme).expect("front matter should compose");
        assert!(text.starts_with("---\nconfig:\n"));
        assert!(text.ends_with("---\n"));
        assert!(text.contains("theme: base"));
        assert!(text.contains("themeVariables:"));
        assert!(text.contains("primaryColor:"));
        assert!(text.contains("#03787c"));
        assert!(text.contains("secondaryColor:"));
        assert!(text.contains("primaryBorderColor:"));
        assert!(text.contains("curve: basis"));
    }

    #[test]
    fn missing_fields_are_omitted() {
        let theme = ThemeSettings {
            name: Some("dark".to_string()),
            ..ThemeSettings::default()
        };
        let text = compose_front_matter(&theme).expect("front matter should compose");
        assert!(text.contains("theme: dark"));
        assert!(!text.contains("themeVariables"));
        assert!(!text.contains("flowchart"));
    }

    #[test]
    fn with_front_matter_prepends_block() {
        let theme = ThemeSettings {
            curve: Some("linear".to_string()),
            ..ThemeSettings::default()
        };
        let text = with_front_matter(&theme, "graph TD\n").expect("front matter should compose");
        assert!(text.starts_with("---\n"));
        assert!(text.ends_with("---\ngraph TD\n"));
    }
}
