use std::fmt;

use crate::text::{compose_section_title, DEFAULT_SECTION_TITLE};
use crate::types::SourceSpan;

/// A legal edge target in the emitted flowchart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeId {
    Question(u32),
    Section(usize),
    End,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Question(id) => write!(f, "{}", id),
            Self::Section(ordinal) => write!(f, "Section{}", ordinal),
            Self::End => f.write_str("End"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    /// Raw dropdown text; empty means "go to the next one".
    pub destination: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: u32,
    /// Sanitized `"N. title"`.
    pub title: String,
    pub is_being_edited: bool,
    pub has_multiple_branches: bool,
    pub single_destination: String,
    pub choices: Vec<Choice>,
    /// Ordinal of the owning section, when the form has sections.
    pub section: Option<usize>,
    pub location: SourceSpan,
}

impl Question {
    pub fn node_id(&self) -> NodeId {
        NodeId::Question(self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub ordinal: usize,
    /// Sanitized label with the editor's placeholder title removed.
    pub title: String,
    pub questions: Vec<Question>,
    pub destination: String,
    pub location: SourceSpan,
}

impl Section {
    pub fn node_id(&self) -> NodeId {
        NodeId::Section(self.ordinal)
    }

    /// Label drawn in the section box. Untitled sections keep the editor's
    /// placeholder so the box is never empty.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            DEFAULT_SECTION_TITLE
        } else {
            &self.title
        }
    }

    /// `"K. title"`, the text destination dropdowns use for this section.
    pub fn composed_title(&self) -> String {
        compose_section_title(self.ordinal, &self.title)
    }

    pub fn first_question_id(&self) -> Option<u32> {
        self.questions.first().map(|question| question.id)
    }

    pub fn last_question_id(&self) -> Option<u32> {
        self.questions.last().map(|question| question.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormBody {
    Flat(Vec<Question>),
    Sectioned(Vec<Section>),
}

/// Everything extracted from one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    body: FormBody,
    question_count: usize,
}

impl Form {
    pub fn flat(questions: Vec<Question>) -> Self {
        let question_count = questions.len();
        Self {
            body: FormBody::Flat(questions),
            question_count,
        }
    }

    pub fn sectioned(sections: Vec<Section>) -> Self {
        let question_count = sections.iter().map(|section| section.questions.len()).sum();
        Self {
            body: FormBody::Sectioned(sections),
            question_count,
        }
    }

    pub fn has_sections(&self) -> bool {
        !self.sections().is_empty()
    }

    pub fn sections(&self) -> &[Section] {
        match &self.body {
            FormBody::Sectioned(sections) => sections,
            FormBody::Flat(_) => &[],
        }
    }

    pub fn section(&self, ordinal: usize) -> Option<&Section> {
        ordinal
            .checked_sub(1)
            .and_then(|index| self.sections().get(index))
    }

    pub fn section_count(&self) -> usize {
        self.sections().len()
    }

    pub fn question_count(&self) -> usize {
        self.question_count
    }

    /// All questions in traversal order, across section boundaries.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        let flat: &[Question] = match &self.body {
            FormBody::Flat(questions) => questions,
            FormBody::Sectioned(_) => &[],
        };
        flat.iter().chain(
            self.sections()
                .iter()
                .flat_map(|section| section.questions.iter()),
        )
    }

    pub fn owning_section(&self, question: &Question) -> Option<&Section> {
        question.section.and_then(|ordinal| self.section(ordinal))
    }

    pub fn is_last_in_owning_section(&self, question: &Question) -> bool {
        self.owning_section(question)
            .and_then(Section::last_question_id)
            == Some(question.id)
    }
}
