use ff_parser::DomElement;

use crate::conventions::destination_span;

/// What the question element exposes, before deciding how it branches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BranchProbe {
    pub has_branch_group: bool,
    pub has_first_branch_label: bool,
    pub is_being_edited: bool,
    pub has_single_destination: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchShape {
    SingleBranchElement,
    SingleBranchEdited,
    MultiBranchElement,
    MultiBranchEdited,
}

impl BranchShape {
    /// Rating controls also carry a branch group but never a branch label,
    /// so they stay single. While a multi-branch question is being edited
    /// the destination dropdowns sit inside its choices, which makes the
    /// question-level dropdown probe hit a choice's dropdown.
    pub fn classify(probe: BranchProbe) -> Self {
        let labelled_without_dropdown =
            probe.has_first_branch_label && !probe.has_single_destination;
        let edited_with_dropdown = probe.is_being_edited && probe.has_single_destination;
        let multi = probe.has_branch_group && (labelled_without_dropdown || edited_with_dropdown);

        match (multi, probe.is_being_edited) {
            (true, true) => Self::MultiBranchEdited,
            (true, false) => Self::MultiBranchElement,
            (false, true) => Self::SingleBranchEdited,
            (false, false) => Self::SingleBranchElement,
        }
    }

    pub fn is_multi_branch(self) -> bool {
        matches!(self, Self::MultiBranchElement | Self::MultiBranchEdited)
    }

    pub fn is_being_edited(self) -> bool {
        matches!(self, Self::SingleBranchEdited | Self::MultiBranchEdited)
    }

    pub fn destination_strategy(self) -> DestinationStrategy {
        if self.is_being_edited() {
            DestinationStrategy::LabeledSpan
        } else {
            DestinationStrategy::PositionalDescendant
        }
    }
}

/// Where a choice keeps its destination text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationStrategy {
    /// Edited questions render a dropdown span inside each choice.
    LabeledSpan,
    /// Read-only questions have no marker, only layout: the destination is
    /// the choice's second child's first child's second child.
    PositionalDescendant,
}

impl DestinationStrategy {
    pub fn locate(self, choice: &DomElement) -> Option<&DomElement> {
        match self {
            Self::LabeledSpan => choice.select_first(&destination_span().into()),
            Self::PositionalDescendant => choice
                .element_child(1)
                .and_then(|wrapper| wrapper.element_child(0))
                .and_then(|row| row.element_child(1)),
        }
    }
}
