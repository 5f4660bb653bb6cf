use ff_core::{codes, DiagramResult, ErrorKind, FormFlowError};
use ff_extract::conventions::{document_title, screen_heading, BRANCHING_SCREEN_HEADING};
use ff_extract::parse_form;
use ff_parser::{parse_snapshot, DomDocument, DomElement, Matcher};
use ff_render::serialize_form;
use log::{debug, warn};

pub const DEFAULT_THEME_COLOR_PROPERTY: &str = "--primary-color";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Text the screen heading must carry for the snapshot to be accepted.
    pub expected_heading: String,
    /// CSS custom property read from `style` attributes as the theme colour.
    pub theme_color_property: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            expected_heading: BRANCHING_SCREEN_HEADING.to_string(),
            theme_color_property: DEFAULT_THEME_COLOR_PROPERTY.to_string(),
        }
    }
}

/// Runs the whole pipeline on one snapshot. Never fails: problems come
/// back as an `Error` result carrying the diagnostic.
pub fn generate_diagram(snapshot: &str, options: &GenerateOptions) -> DiagramResult {
    match try_generate_diagram(snapshot, options) {
        Ok(result) => result,
        Err(error) => {
            warn!(code = error.code.as_str(); "Diagram generation failed");
            DiagramResult::failure(error_text(&error))
        }
    }
}

/// Like [`generate_diagram`] but hands the error back to the caller.
pub fn try_generate_diagram(
    snapshot: &str,
    options: &GenerateOptions,
) -> Result<DiagramResult, FormFlowError> {
    let document = parse_snapshot(snapshot)?;
    generate_from_document(&document, options)
}

pub fn generate_from_document(
    document: &DomDocument,
    options: &GenerateOptions,
) -> Result<DiagramResult, FormFlowError> {
    check_screen(&document.root, &options.expected_heading)?;

    let form = parse_form(&document.root)?;
    let diagram_text = serialize_form(&form)?;
    let diagram_title = read_document_title(&document.root);
    let theme_color = read_theme_color(&document.root, &options.theme_color_property);
    debug!(title = diagram_title.as_str(), themed = theme_color.is_some(); "Generated diagram");

    Ok(DiagramResult::success(diagram_title, diagram_text, theme_color))
}

pub fn check_screen(root: &DomElement, expected_heading: &str) -> Result<(), FormFlowError> {
    let Some(heading) = root.select_first(&screen_heading().into()) else {
        return Err(FormFlowError::new(
            codes::SCREEN_HEADING_MISSING,
            "Not on Branching Options screen (check 1)",
        ));
    };

    if heading.inner_text() != expected_heading {
        return Err(FormFlowError::with_span(
            codes::SCREEN_HEADING_MISMATCH,
            "Not on Branching Options screen (check 2)",
            heading.location.clone(),
        ));
    }
    Ok(())
}

/// Text shown to the user for a failed run. Screen checks are reported
/// verbatim, everything else with its code.
pub fn error_text(error: &FormFlowError) -> String {
    match error.kind() {
        ErrorKind::Precondition => error.message.clone(),
        _ => error.to_string(),
    }
}

fn read_document_title(root: &DomElement) -> String {
    root.select_first(&document_title().into())
        .map(DomElement::inner_text)
        .unwrap_or_default()
}

fn read_theme_color(root: &DomElement, property: &str) -> Option<String> {
    std::iter::once(root)
        .chain(root.select_all(&Matcher::any().with_attr_present("style").into()))
        .find_map(|element| style_property(element.attr("style")?, property))
}

fn style_property(style: &str, property: &str) -> Option<String> {
    style
        .split(';')
        .filter_map(|declaration| declaration.split_once(':'))
        .find(|(name, _)| name.trim() == property)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
