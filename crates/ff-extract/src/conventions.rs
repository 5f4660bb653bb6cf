//! Markers the form editor's branching screen uses for the pieces we read.

use ff_parser::{Matcher, Selector};

pub const NEXT_KEYWORD: &str = "Next";
pub const END_OF_FORM_KEYWORD: &str = "End of the form";
pub const MISSING_TITLE: &str = "NO TITLE";
pub const BRANCHING_SCREEN_HEADING: &str = "Branching options";

pub fn screen_heading() -> Matcher {
    Matcher::tag("span").with_attr("role", "heading")
}

pub fn document_title() -> Matcher {
    Matcher::tag("title")
}

pub fn question_marker() -> Matcher {
    Matcher::class("office-form-question")
}

pub fn section_marker() -> Matcher {
    Matcher::any().with_attr("data-automation-id", "SectionTitle")
}

pub(crate) fn labelled() -> Matcher {
    Matcher::any().with_attr_present("aria-label")
}

pub(crate) fn question_title() -> Selector {
    Selector::from(Matcher::tag("div").with_attr("data-automation-id", "questionTitle"))
        .descendant(content_span())
}

pub(crate) fn branch_group() -> Matcher {
    Matcher::tag("div").with_attr("role", "radiogroup")
}

pub(crate) fn branch_choice() -> Matcher {
    Matcher::tag("div").with_attr("role", "radio")
}

pub(crate) fn first_branch_label() -> Selector {
    Selector::from(branch_choice()).descendant(content_span())
}

pub(crate) fn content_span() -> Matcher {
    Matcher::tag("span").with_class("text-format-content")
}

pub(crate) fn destination_placeholder() -> Matcher {
    Matcher::class("dropdown-placeholder-text")
}

pub(crate) fn destination_span() -> Matcher {
    Matcher::tag("span").with_class("dropdown-placeholder-text")
}
