use ff_core::{Form, FormFlowError, NodeId, Question, Section};
use ff_extract::DestinationResolver;
use log::{debug, warn};

mod front_matter;

pub use front_matter::{compose_front_matter, with_front_matter, ThemeSettings};

pub const GRAPH_HEADER: &str = "graph TD";
const START_NODE: &str = "Start";

/// Serializes a parsed form as Mermaid flowchart text.
///
/// Output depends only on the form, so the same snapshot always produces
/// byte-identical text.
pub fn serialize_form(form: &Form) -> Result<String, FormFlowError> {
    let resolver = DestinationResolver::new(form);
    let mut writer = FlowchartWriter::new();
    writer.line(GRAPH_HEADER);
    writer.line("Start([Start])");
    writer.line("End([End])");

    if form.has_sections() {
        writer.edge(START_NODE, NodeId::Section(1), None);
        for section in form.sections() {
            write_section(&mut writer, &resolver, section)?;
        }
    } else if form.question_count() == 0 {
        writer.edge(START_NODE, NodeId::End, None);
    } else {
        writer.edge(START_NODE, NodeId::Question(1), None);
        for question in form.questions() {
            write_question(&mut writer, &resolver, question)?;
        }
    }

    debug!(bytes = writer.out.len(); "Serialized flowchart");
    Ok(writer.finish())
}

fn write_section(
    writer: &mut FlowchartWriter,
    resolver: &DestinationResolver<'_>,
    section: &Section,
) -> Result<(), FormFlowError> {
    let id = section.node_id();
    writer.line(format!("{}[[{}]]", id, section.display_title()));
    match section.first_question_id() {
        Some(first) => writer.edge(id, NodeId::Question(first), None),
        None => warn!(section = section.ordinal; "Section has no questions"),
    }
    for question in &section.questions {
        write_question(writer, resolver, question)?;
    }
    Ok(())
}

fn write_question(
    writer: &mut FlowchartWriter,
    resolver: &DestinationResolver<'_>,
    question: &Question,
) -> Result<(), FormFlowError> {
    let id = question.node_id();
    writer.line(format!("{}[{}]", id, question.title));

    if question.has_multiple_branches {
        for choice in &question.choices {
            let target = resolver.resolve(&choice.destination, question)?;
            writer.edge(id, target, Some(&choice.label));
        }
    } else {
        let target = resolver.resolve(&question.single_destination, question)?;
        writer.edge(id, target, None);
    }
    Ok(())
}

struct FlowchartWriter {
    out: String,
}

impl FlowchartWriter {
    fn new() -> Self {
        Self { out: String::new() }
    }

    fn line(&mut self, text: impl AsRef<str>) {
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    fn edge(&mut self, from: impl std::fmt::Display, to: NodeId, label: Option<&str>) {
        // Mermaid rejects empty edge text between the pipes.
        match label.filter(|label| !label.is_empty()) {
            Some(label) => self.line(format!("{} -->|{}| {}", from, label, to)),
            None => self.line(format!("{} --> {}", from, to)),
        }
    }

    fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ff_core::{codes, Choice, SourceSpan};
    use ff_extract::parse_form;
    use ff_parser::parse_snapshot;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn serialize_snapshot(source: &str) -> Result<String, FormFlowError> {
        let document = parse_snapshot(source).expect("snapshot should parse");
        let form = parse_form(&document.root)?;
        serialize_form(&form)
    }

    #[test]
    fn flat_form_with_keywords_and_implicit_next() {
        let text = serialize_snapshot(
            r#"<body>
  <div class="office-form-question" role="button" aria-label="1. First Text">
    <div data-automation-id="questionTitle"><span class="text-format-content">First</span></div>
    <div class="dropdown-placeholder-text">Next</div>
  </div>
  <div class="office-form-question" role="button" aria-label="2. Second Text">
    <div data-automation-id="questionTitle"><span class="text-format-content">Second</span></div>
    <div class="dropdown-placeholder-text">End of the form</div>
  </div>
  <div class="office-form-question" role="button" aria-label="3. Third Text">
    <div data-automation-id="questionTitle"><span class="text-format-content">Third</span></div>
  </div>
</body>"#,
        )
        .expect("flowchart should serialize");
        assert_eq!(
            text,
            "graph TD\nStart([Start])\nEnd([End])\nStart --> 1\n\
1[1. First]\n1 --> 2\n\
2[2. Second]\n2 --> End\n\
3[3. Third]\n3 --> End\n"
        );
    }

    #[test]
    fn sectioned_form_routes_last_question_to_next_section() {
        let text = serialize_snapshot(
            r#"<body>
  <div>
    <div><div aria-label="About you"><div data-automation-id="SectionTitle">About you</div></div></div>
    <div class="office-form-question" role="button" aria-label="1. Do you have pets? Choice">
      <div data-automation-id="questionTitle"><span class="text-format-content">Do you have pets?</span></div>
      <div role="radiogroup">
        <div role="radio"><div><span class="text-format-content">Yes</span></div><div><div><span>Go to</span><span>Next</span></div></div></div>
        <div role="radio"><div><span class="text-format-content">No</span></div><div><div><span>Go to</span><span>2. Feedback</span></div></div></div>
      </div>
    </div>
    <div class="office-form-question" role="button" aria-label="2. Pet name Text">
      <div data-automation-id="questionTitle"><span class="text-format-content">Pet name</span></div>
    </div>
  </div>
  <div>
    <div><div aria-label="Feedback"><div data-automation-id="SectionTitle">Feedback</div></div></div>
    <div class="office-form-question" role="button" aria-label="3. Any comments? Text">
      <div data-automation-id="questionTitle"><span class="text-format-content">Any comments?</span></div>
    </div>
  </div>
</body>"#,
        )
        .expect("flowchart should serialize");
        assert_eq!(
            text,
            "graph TD\nStart([Start])\nEnd([End])\nStart --> Section1\n\
Section1[[About you]]\nSection1 --> 1\n\
1[1. Do you have pets?]\n1 -->|Yes| 2\n1 -->|No| Section2\n\
2[2. Pet name]\n2 --> Section2\n\
Section2[[Feedback]]\nSection2 --> 3\n\
3[3. Any comments?]\n3 --> End\n"
        );
    }

    #[test]
    fn empty_section_keeps_dangling_node() {
        let text = serialize_snapshot(
            r#"<body>
  <div>
    <div><div aria-label="Only"><div data-automation-id="SectionTitle"/></div></div>
  </div>
</body>"#,
        )
        .expect("flowchart should serialize");
        assert_eq!(
            text,
            "graph TD\nStart([Start])\nEnd([End])\nStart --> Section1\nSection1[[Only]]\n"
        );
    }

    #[test]
    fn untitled_section_shows_editor_placeholder() {
        let text = serialize_snapshot(
            r#"<body>
  <div>
    <div><div aria-label="Section title"><div data-automation-id="SectionTitle"/></div></div>
    <div class="office-form-question" role="button" aria-label="1. Only Text">
      <div data-automation-id="questionTitle"><span class="text-format-content">Only</span></div>
    </div>
  </div>
</body>"#,
        )
        .expect("flowchart should serialize");
        assert_eq!(
            text,
            "graph TD\nStart([Start])\nEnd([End])\nStart --> Section1\n\
Section1[[Section title]]\nSection1 --> 1\n\
1[1. Only]\n1 --> End\n"
        );
    }

    #[test]
    fn branch_label_of_only_stripped_characters_becomes_plain_edge() {
        let text = serialize_snapshot(
            r#"<body>
  <div class="office-form-question" role="button" aria-label="1. Pick Choice">
    <div data-automation-id="questionTitle"><span class="text-format-content">Pick</span></div>
    <div role="radiogroup">
      <div role="radio"><div><span class="text-format-content">( / )</span></div><div><div><span>Go to</span><span>Next</span></div></div></div>
      <div role="radio"><div><span class="text-format-content">B</span></div><div><div><span>Go to</span><span>Next</span></div></div></div>
    </div>
  </div>
</body>"#,
        )
        .expect("flowchart should serialize");
        assert_eq!(
            text,
            "graph TD\nStart([Start])\nEnd([End])\nStart --> 1\n\
1[1. Pick]\n1 --> End\n1 -->|B| End\n"
        );
        assert!(!text.contains("||"));
    }

    #[test]
    fn empty_form_only_has_start_and_end() {
        let text = serialize_snapshot("<body/>").expect("flowchart should serialize");
        assert_eq!(text, "graph TD\nStart([Start])\nEnd([End])\nStart --> End\n");
    }

    #[test]
    fn unresolved_destination_stops_serialization() {
        let error = serialize_snapshot(
            r#"<body>
  <div class="office-form-question" role="button" aria-label="1. Only Text">
    <div class="dropdown-placeholder-text">Somewhere</div>
  </div>
</body>"#,
        )
        .expect_err("unresolved destination should fail");
        assert_eq!(error.code, codes::DESTINATION_UNRESOLVED);
    }

    #[test]
    fn branch_labels_are_written_as_sanitized() {
        let form = Form::flat(vec![Question {
            id: 1,
            title: "1. Pick".to_string(),
            is_being_edited: true,
            has_multiple_branches: true,
            single_destination: String::new(),
            choices: vec![Choice {
                label: ff_core::sanitize_label(r#"Say "yes" (loudly)"#),
                destination: "End of the form".to_string(),
            }],
            section: None,
            location: SourceSpan::synthetic(),
        }]);
        let text = serialize_form(&form).expect("flowchart should serialize");
        assert!(text.contains("1 -->|Say #quot;yes#quot; loudly| End\n"));
    }

    fn flat_form(destinations: &[u8]) -> Form {
        let questions = destinations
            .iter()
            .enumerate()
            .map(|(index, pick)| Question {
                id: index as u32 + 1,
                title: format!("{}. Question", index + 1),
                is_being_edited: false,
                has_multiple_branches: false,
                single_destination: match pick % 3 {
                    0 => String::new(),
                    1 => "Next".to_string(),
                    _ => "End of the form".to_string(),
                },
                choices: Vec::new(),
                section: None,
                location: SourceSpan::synthetic(),
            })
            .collect();
        Form::flat(questions)
    }

    proptest! {
        #[test]
        fn serialization_is_deterministic(destinations in proptest::collection::vec(any::<u8>(), 1..12)) {
            let form = flat_form(&destinations);
            let first = serialize_form(&form).expect("first serialization");
            let second = serialize_form(&form.clone()).expect("second serialization");
            prop_assert_eq!(first, second);
        }

        #[test]
        fn implicit_edges_never_pass_the_last_question(destinations in proptest::collection::vec(any::<u8>(), 1..12)) {
            let form = flat_form(&destinations);
            let text = serialize_form(&form).expect("serialization");
            let count = destinations.len() as u32;
            for line in text.lines().filter(|line| line.contains(" --> ") && !line.starts_with("Start")) {
                let target = line.rsplit(' ').next().expect("edge target");
                if target != "End" {
                    let id = target.parse::<u32>().expect("numeric target");
                    prop_assert!(id >= 2 && id <= count);
                }
            }
        }
    }
}
