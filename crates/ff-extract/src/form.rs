use ff_core::{codes, Form, FormFlowError, Question};
use ff_parser::DomElement;
use log::debug;

use crate::conventions::{question_marker, section_marker};
use crate::question::parse_question;
use crate::section::parse_section;

/// Walks the whole screen once and builds the form.
///
/// Section markers switch the form into sectioned mode; otherwise every
/// question element becomes a flat question. An empty screen is not an
/// error.
pub fn parse_form(root: &DomElement) -> Result<Form, FormFlowError> {
    let markers = root.select_paths(&section_marker().into());

    let form = if markers.is_empty() {
        let mut questions = Vec::new();
        for element in root.select_all(&question_marker().into()) {
            questions.push(parse_question(element, None)?);
        }
        Form::flat(questions)
    } else {
        let mut sections = Vec::new();
        for (index, marker) in markers.iter().enumerate() {
            sections.push(parse_section(marker, index + 1)?);
        }
        Form::sectioned(sections)
    };

    ensure_contiguous_numbering(form.questions())?;
    debug!(
        sections = form.section_count(),
        questions = form.question_count();
        "Parsed form"
    );
    Ok(form)
}

fn ensure_contiguous_numbering<'a>(
    questions: impl Iterator<Item = &'a Question>,
) -> Result<(), FormFlowError> {
    for (index, question) in questions.enumerate() {
        let expected = index as u32 + 1;
        if question.id != expected {
            return Err(FormFlowError::with_span(
                codes::QUESTION_NUMBERING_GAP,
                format!(
                    "Found question {} where question {} was expected.",
                    question.id, expected
                ),
                question.location.clone(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod form_tests {
    use super::*;
    use ff_parser::parse_snapshot;

    fn parse(source: &str) -> Result<Form, FormFlowError> {
        let document = parse_snapshot(source).expect("form should parse");
        parse_form(&document.root)
    }

    #[test]
    fn flat_form_numbers_questions_without_sections() {
        let form = parse(
            r#"<body>
  <div class="office-form-question" aria-label="1. A"/>
  <div class="office-form-question" aria-label="2. B"/>
  <div class="office-form-question" aria-label="3. C"/>
</body>"#,
        )
        .expect("form should build");
        assert!(!form.has_sections());
        assert_eq!(form.question_count(), 3);
        assert!(form.questions().all(|q| q.section.is_none()));
    }

    #[test]
    fn sectioned_form_sums_question_counts() {
        let form = parse(
            r#"<body>
  <div>
    <div><div aria-label="One"><div data-automation-id="SectionTitle"/></div></div>
    <div class="office-form-question" aria-label="1. A"/>
    <div class="office-form-question" aria-label="2. B"/>
  </div>
  <div>
    <div><div aria-label="Two"><div data-automation-id="SectionTitle"/></div></div>
    <div class="office-form-question" aria-label="3. C"/>
  </div>
  <div>
    <div><div aria-label="Section title"><div data-automation-id="SectionTitle"/></div></div>
  </div>
</body>"#,
        )
        .expect("form should build");
        assert_eq!(form.section_count(), 3);
        assert_eq!(form.question_count(), 3);
        let ordinals = form.sections().iter().map(|s| s.ordinal).collect::<Vec<_>>();
        assert_eq!(ordinals, vec![1, 2, 3]);
        let ids = form.questions().map(|q| q.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(form.sections()[2].title, "");
    }

    #[test]
    fn empty_screen_builds_empty_form() {
        let form = parse("<body><span role=\"heading\">Branching options</span></body>")
            .expect("empty form should build");
        assert_eq!(form.question_count(), 0);
        assert!(!form.has_sections());
    }

    #[test]
    fn numbering_gap_is_reported() {
        let error = parse(
            r#"<body>
  <div class="office-form-question" aria-label="1. A"/>
  <div class="office-form-question" aria-label="3. C"/>
</body>"#,
        )
        .expect_err("gap should fail");
        assert_eq!(error.code, codes::QUESTION_NUMBERING_GAP);
    }

    #[test]
    fn malformed_question_stops_the_whole_form() {
        let error = parse(
            r#"<body>
  <div class="office-form-question" aria-label="1. A"/>
  <div class="office-form-question" aria-label="B without number"/>
</body>"#,
        )
        .expect_err("malformed question should fail");
        assert_eq!(error.code, codes::QUESTION_LABEL_INVALID);
    }
}
