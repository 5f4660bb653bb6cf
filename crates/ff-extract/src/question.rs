use ff_core::{codes, parse_numbered_label, sanitize_label, FormFlowError, Question};
use ff_parser::DomElement;
use log::debug;

use crate::branch::{BranchProbe, BranchShape};
use crate::choice::parse_choice;
use crate::conventions::{
    branch_choice, branch_group, destination_placeholder, first_branch_label, question_title,
    MISSING_TITLE,
};

pub fn parse_question(
    element: &DomElement,
    section: Option<usize>,
) -> Result<Question, FormFlowError> {
    let id = parse_question_number(element)?;

    let title_text = element
        .select_first(&question_title())
        .map(DomElement::inner_text)
        .unwrap_or_else(|| MISSING_TITLE.to_string());
    let title = format!("{}. {}", id, sanitize_label(&title_text))
        .trim_end()
        .to_string();

    let is_being_edited = element.attr("role") != Some("button");
    let group = element.select_first(&branch_group().into());
    let first_label = group.and_then(|group| group.select_first(&first_branch_label()));
    let dropdown = element.select_first(&destination_placeholder().into());

    let shape = BranchShape::classify(BranchProbe {
        has_branch_group: group.is_some(),
        has_first_branch_label: first_label.is_some(),
        is_being_edited,
        has_single_destination: dropdown.is_some(),
    });
    debug!(question = id, shape:?; "Classified question branching");

    let mut choices = Vec::new();
    let mut single_destination = String::new();
    match group {
        Some(group) if shape.is_multi_branch() => {
            let strategy = shape.destination_strategy();
            for choice in group.select_all(&branch_choice().into()) {
                choices.push(parse_choice(choice, strategy)?);
            }
        }
        _ => {
            single_destination = dropdown.map(DomElement::inner_text).unwrap_or_default();
        }
    }

    Ok(Question {
        id,
        title,
        is_being_edited,
        has_multiple_branches: shape.is_multi_branch(),
        single_destination,
        choices,
        section,
        location: element.location.clone(),
    })
}

fn parse_question_number(element: &DomElement) -> Result<u32, FormFlowError> {
    let Some(label) = element.attr("aria-label") else {
        return Err(FormFlowError::with_span(
            codes::QUESTION_LABEL_MISSING,
            "Question element has no aria-label.",
            element.location.clone(),
        ));
    };

    match parse_numbered_label(label) {
        Some((id, _)) => Ok(id),
        None => Err(FormFlowError::with_span(
            codes::QUESTION_LABEL_INVALID,
            format!("Question label \"{}\" does not start with \"N.\".", label),
            element.location.clone(),
        )),
    }
}
