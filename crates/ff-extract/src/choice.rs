use ff_core::{codes, sanitize_label, Choice, FormFlowError};
use ff_parser::DomElement;

use crate::branch::DestinationStrategy;
use crate::conventions::content_span;

pub fn parse_choice(
    element: &DomElement,
    strategy: DestinationStrategy,
) -> Result<Choice, FormFlowError> {
    let Some(label) = element.select_first(&content_span().into()) else {
        return Err(FormFlowError::with_span(
            codes::CHOICE_LABEL_MISSING,
            "Branch choice has no label text.",
            element.location.clone(),
        ));
    };

    let destination = strategy
        .locate(element)
        .map(DomElement::inner_text)
        .unwrap_or_default();

    Ok(Choice {
        label: sanitize_label(&label.inner_text()),
        destination,
    })
}
