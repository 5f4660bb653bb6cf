use ff_core::{codes, normalize_section_label, sanitize_label, FormFlowError, Section};
use ff_parser::{DomElement, ElementPath};

use crate::conventions::{destination_placeholder, labelled, question_marker, NEXT_KEYWORD};
use crate::question::parse_question;

/// Builds section `ordinal` from the path to its title marker.
///
/// The marker's nearest `aria-label` ancestor names the section; that
/// element's grandparent holds the section's questions and its own
/// "after this section" dropdown.
pub fn parse_section(marker: &ElementPath<'_>, ordinal: usize) -> Result<Section, FormFlowError> {
    let Some((levels, label_element)) = marker.closest(&labelled()) else {
        return Err(FormFlowError::with_span(
            codes::SECTION_LABEL_MISSING,
            format!("Section {} title has no labelled ancestor.", ordinal),
            marker.element.location.clone(),
        ));
    };
    let Some(container) = marker.ancestor(levels + 2) else {
        return Err(FormFlowError::with_span(
            codes::SECTION_CONTAINER_MISSING,
            format!("Section {} has no enclosing container.", ordinal),
            label_element.location.clone(),
        ));
    };

    let raw_label = label_element.attr("aria-label").unwrap_or_default();
    let title = sanitize_label(normalize_section_label(raw_label));

    let mut questions = Vec::new();
    for element in container.select_all(&question_marker().into()) {
        questions.push(parse_question(element, Some(ordinal))?);
    }

    let destination = container
        .select_first_outside(&destination_placeholder(), &question_marker())
        .map(DomElement::inner_text)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| NEXT_KEYWORD.to_string());

    Ok(Section {
        ordinal,
        title,
        questions,
        destination,
        location: label_element.location.clone(),
    })
}
