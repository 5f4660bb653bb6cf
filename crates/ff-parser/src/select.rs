use crate::DomElement;

/// A compound selector for one element: optional tag, class and attribute
/// constraints, all of which must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matcher {
    tag: Option<String>,
    class: Option<String>,
    attributes: Vec<(String, Option<String>)>,
}

impl Matcher {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn tag(name: &str) -> Self {
        Self {
            tag: Some(name.to_string()),
            ..Self::default()
        }
    }

    pub fn class(name: &str) -> Self {
        Self::any().with_class(name)
    }

    pub fn with_class(mut self, name: &str) -> Self {
        self.class = Some(name.to_string());
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes
            .push((name.to_string(), Some(value.to_string())));
        self
    }

    pub fn with_attr_present(mut self, name: &str) -> Self {
        self.attributes.push((name.to_string(), None));
        self
    }

    pub fn matches(&self, element: &DomElement) -> bool {
        if let Some(tag) = &self.tag {
            if &element.name != tag {
                return false;
            }
        }
        if let Some(class) = &self.class {
            if !element.has_class(class) {
                return false;
            }
        }
        self.attributes
            .iter()
            .all(|(name, expected)| match (element.attr(name), expected) {
                (Some(actual), Some(expected)) => actual == expected,
                (Some(_), None) => true,
                (None, _) => false,
            })
    }
}

/// Matchers joined by descendant combinators, outermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    steps: Vec<Matcher>,
}

impl Selector {
    pub fn new(steps: Vec<Matcher>) -> Self {
        Self { steps }
    }

    pub fn descendant(mut self, step: Matcher) -> Self {
        self.steps.push(step);
        self
    }

    fn matches_within(&self, ancestors: &[&DomElement], element: &DomElement) -> bool {
        let Some((last, outer)) = self.steps.split_last() else {
            return false;
        };
        if !last.matches(element) {
            return false;
        }
        let mut remaining = ancestors.iter().rev();
        outer
            .iter()
            .rev()
            .all(|step| remaining.any(|ancestor| step.matches(ancestor)))
    }
}

impl From<Matcher> for Selector {
    fn from(step: Matcher) -> Self {
        Self { steps: vec![step] }
    }
}

/// An element found by a query together with its ancestor chain, starting
/// at the element the query ran on.
#[derive(Debug, Clone)]
pub struct ElementPath<'a> {
    pub ancestors: Vec<&'a DomElement>,
    pub element: &'a DomElement,
}

impl<'a> ElementPath<'a> {
    /// Nearest ancestor-or-self matching `matcher`, with how many levels up
    /// it sits (0 is the element itself).
    pub fn closest(&self, matcher: &Matcher) -> Option<(usize, &'a DomElement)> {
        std::iter::once(self.element)
            .chain(self.ancestors.iter().rev().copied())
            .enumerate()
            .find(|(_, candidate)| matcher.matches(candidate))
    }

    pub fn ancestor(&self, levels: usize) -> Option<&'a DomElement> {
        if levels == 0 {
            return Some(self.element);
        }
        let index = self.ancestors.len().checked_sub(levels)?;
        self.ancestors.get(index).copied()
    }
}

enum Walk {
    Continue,
    SkipChildren,
    Stop,
}

impl DomElement {
    pub fn select_first(&self, selector: &Selector) -> Option<&DomElement> {
        let mut found = None;
        walk_descendants(self, |ancestors, element| {
            if selector.matches_within(ancestors, element) {
                found = Some(element);
                Walk::Stop
            } else {
                Walk::Continue
            }
        });
        found
    }

    pub fn select_all(&self, selector: &Selector) -> Vec<&DomElement> {
        self.select_paths(selector)
            .into_iter()
            .map(|path| path.element)
            .collect()
    }

    pub fn select_paths(&self, selector: &Selector) -> Vec<ElementPath<'_>> {
        let mut paths = Vec::new();
        walk_descendants(self, |ancestors, element| {
            if selector.matches_within(ancestors, element) {
                paths.push(ElementPath {
                    ancestors: ancestors.to_vec(),
                    element,
                });
            }
            Walk::Continue
        });
        paths
    }

    /// First descendant matching `target` that does not sit inside an
    /// element matching `excluded`.
    pub fn select_first_outside(
        &self,
        target: &Matcher,
        excluded: &Matcher,
    ) -> Option<&DomElement> {
        let mut found = None;
        walk_descendants(self, |_, element| {
            if excluded.matches(element) {
                Walk::SkipChildren
            } else if target.matches(element) {
                found = Some(element);
                Walk::Stop
            } else {
                Walk::Continue
            }
        });
        found
    }
}

fn walk_descendants<'a, F>(root: &'a DomElement, mut visit: F)
where
    F: FnMut(&[&'a DomElement], &'a DomElement) -> Walk,
{
    let mut ancestors = vec![root];
    walk_children(root, &mut ancestors, &mut visit);
}

fn walk_children<'a, F>(
    parent: &'a DomElement,
    ancestors: &mut Vec<&'a DomElement>,
    visit: &mut F,
) -> bool
where
    F: FnMut(&[&'a DomElement], &'a DomElement) -> Walk,
{
    for child in parent.element_children() {
        match visit(ancestors, child) {
            Walk::Stop => return true,
            Walk::SkipChildren => continue,
            Walk::Continue => {}
        }
        ancestors.push(child);
        let stopped = walk_children(child, ancestors, visit);
        ancestors.pop();
        if stopped {
            return true;
        }
    }
    false
}
