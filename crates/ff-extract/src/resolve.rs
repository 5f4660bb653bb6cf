use ff_core::{
    codes, parse_numbered_label, sanitize_label, Form, FormFlowError, NodeId, Question, Section,
};
use log::trace;

use crate::conventions::{END_OF_FORM_KEYWORD, NEXT_KEYWORD};

/// Turns raw dropdown text into a flowchart node id.
#[derive(Debug, Clone, Copy)]
pub struct DestinationResolver<'a> {
    form: &'a Form,
}

impl<'a> DestinationResolver<'a> {
    pub fn new(form: &'a Form) -> Self {
        Self { form }
    }

    pub fn resolve(&self, raw: &str, origin: &Question) -> Result<NodeId, FormFlowError> {
        let resolved = match raw {
            "" | NEXT_KEYWORD => self.implicit_next(origin),
            END_OF_FORM_KEYWORD => Ok(NodeId::End),
            _ => self.title_reference(raw, origin),
        }?;
        trace!(question = origin.id, destination = raw, node:% = resolved; "Resolved destination");
        Ok(resolved)
    }

    fn implicit_next(&self, origin: &Question) -> Result<NodeId, FormFlowError> {
        match self.form.owning_section(origin) {
            Some(section) if self.form.is_last_in_owning_section(origin) => {
                self.after_section(section, origin)
            }
            _ => Ok(self.question_after(origin.id)),
        }
    }

    /// Where the flow goes once `section` is finished.
    fn after_section(&self, section: &Section, origin: &Question) -> Result<NodeId, FormFlowError> {
        match section.destination.as_str() {
            "" | NEXT_KEYWORD => Ok(self.section_after(section.ordinal)),
            END_OF_FORM_KEYWORD => Ok(NodeId::End),
            other => self.title_reference(other, origin),
        }
    }

    fn question_after(&self, id: u32) -> NodeId {
        let next = id as usize + 1;
        if next > self.form.question_count() {
            NodeId::End
        } else {
            NodeId::Question(id + 1)
        }
    }

    fn section_after(&self, ordinal: usize) -> NodeId {
        let next = ordinal + 1;
        if next > self.form.section_count() {
            NodeId::End
        } else {
            NodeId::Section(next)
        }
    }

    /// Section titles win over question numbers when both would match.
    fn title_reference(&self, raw: &str, origin: &Question) -> Result<NodeId, FormFlowError> {
        let wanted = sanitize_label(raw);
        if let Some(section) = self
            .form
            .sections()
            .iter()
            .find(|section| section.composed_title() == wanted)
        {
            return Ok(section.node_id());
        }

        let Some((number, _)) = parse_numbered_label(raw) else {
            return Err(FormFlowError::with_span(
                codes::DESTINATION_UNRESOLVED,
                format!(
                    "Question {} points to \"{}\", which matches no section title or question number.",
                    origin.id, raw
                ),
                origin.location.clone(),
            ));
        };

        if number == 0 || number as usize > self.form.question_count() {
            return Err(FormFlowError::with_span(
                codes::DESTINATION_OUT_OF_RANGE,
                format!(
                    "Question {} points to question {}, but the form has {} questions.",
                    origin.id,
                    number,
                    self.form.question_count()
                ),
                origin.location.clone(),
            ));
        }

        Ok(NodeId::Question(number))
    }
}
