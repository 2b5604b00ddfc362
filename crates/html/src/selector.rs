//! A small CSS selector engine.
//!
//! Supports compound selectors made of an optional type (or `*`) followed by
//! any number of `.class` and `#id` parts, joined by descendant combinators
//! (whitespace), e.g. `tbody tr td .no-overflow`. That covers the lecture page
//! layout; other combinators and pseudo-classes are rejected.

use crate::dom::{Element, Node};
use deck_core::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

/// One compound selector: `tag.class#id`.
static COMPOUND_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\*|[A-Za-z][A-Za-z0-9-]*)?((?:[.#][A-Za-z_-][A-Za-z0-9_-]*)*)$").unwrap()
});

/// A single `.class` or `#id` part inside a compound.
static PART_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.#])([A-Za-z_-][A-Za-z0-9_-]*)").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    ids: Vec<String>,
    classes: Vec<String>,
}

impl Compound {
    fn parse(source: &str) -> Option<Self> {
        let caps = COMPOUND_REGEX.captures(source)?;
        let tag = caps
            .get(1)
            .map(|m| m.as_str())
            .filter(|t| *t != "*")
            .map(|t| t.to_ascii_lowercase());

        let mut ids = Vec::new();
        let mut classes = Vec::new();
        if let Some(rest) = caps.get(2) {
            for part in PART_REGEX.captures_iter(rest.as_str()) {
                let name = part[2].to_string();
                if &part[1] == "#" {
                    ids.push(name);
                } else {
                    classes.push(name);
                }
            }
        }

        if tag.is_none() && ids.is_empty() && classes.is_empty() && source != "*" {
            return None;
        }

        Some(Self { tag, ids, classes })
    }

    fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if !element.is(tag) {
                return false;
            }
        }
        self.ids.iter().all(|id| element.id() == Some(id.as_str()))
            && self.classes.iter().all(|class| element.has_class(class))
    }
}

/// A compiled descendant-combinator selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    compounds: Vec<Compound>,
}

impl Selector {
    /// Compile a selector string.
    pub fn parse(source: &str) -> Result<Self> {
        let compounds = source
            .split_whitespace()
            .map(|part| {
                Compound::parse(part).ok_or_else(|| {
                    Error::InvalidSelector(format!("unsupported part '{}' in '{}'", part, source))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if compounds.is_empty() {
            return Err(Error::InvalidSelector("empty selector".to_string()));
        }

        Ok(Self {
            source: source.to_string(),
            compounds,
        })
    }

    /// The selector text this was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether `element` matches, given its ancestors ordered outermost first.
    pub fn matches(&self, element: &Element, ancestors: &[&Element]) -> bool {
        let Some((last, rest)) = self.compounds.split_last() else {
            return false;
        };
        if !last.matches(element) {
            return false;
        }

        // With only descendant combinators, matching each remaining compound
        // against the nearest qualifying ancestor is exact.
        let mut remaining = rest.iter().rev().peekable();
        for ancestor in ancestors.iter().rev() {
            match remaining.peek() {
                Some(compound) if compound.matches(ancestor) => {
                    remaining.next();
                }
                Some(_) => {}
                None => break,
            }
        }
        remaining.peek().is_none()
    }

    /// All matching elements among `nodes` and their descendants, in
    /// document order.
    pub fn select_all<'a>(&self, nodes: &'a [Node]) -> Vec<&'a Element> {
        let mut out = Vec::new();
        self.walk(nodes, &[], |element, _| {
            out.push(element);
            false
        });
        out
    }

    /// First matching element among `nodes` and their descendants.
    pub fn select_first<'a>(&self, nodes: &'a [Node]) -> Option<&'a Element> {
        let mut found = None;
        self.walk(nodes, &[], |element, _| {
            found = Some(element);
            true
        });
        found
    }

    /// Like [`select_all`](Self::select_all), keeping each match's ancestor
    /// chain so later scoped queries can see above it.
    pub fn locate_all<'a>(&self, nodes: &'a [Node]) -> Vec<Located<'a>> {
        let mut out = Vec::new();
        self.walk(nodes, &[], |element, ancestors| {
            out.push(Located {
                element,
                ancestors: ancestors.to_vec(),
            });
            false
        });
        out
    }

    /// All matching descendants of `scope` (not `scope` itself), in document
    /// order. `scope` and its ancestors may satisfy the leading compounds,
    /// as with DOM `querySelectorAll` on an element.
    pub fn select_all_in<'a>(&self, scope: &Located<'a>) -> Vec<&'a Element> {
        let mut out = Vec::new();
        self.walk(&scope.element.children, &scope.chain(), |element, _| {
            out.push(element);
            false
        });
        out
    }

    /// First matching descendant of `scope`, like DOM `querySelector`.
    pub fn select_first_in<'a>(&self, scope: &Located<'a>) -> Option<&'a Element> {
        let mut found = None;
        self.walk(&scope.element.children, &scope.chain(), |element, _| {
            found = Some(element);
            true
        });
        found
    }

    /// Pre-order walk over `nodes`, which sit below `ancestors`. Calls
    /// `on_match` with every match and its ancestors; a `true` return stops
    /// the walk.
    fn walk<'a, F>(&self, nodes: &'a [Node], ancestors: &[&'a Element], mut on_match: F)
    where
        F: FnMut(&'a Element, &[&'a Element]) -> bool,
    {
        let mut chain = ancestors.to_vec();
        let mut levels = vec![nodes.iter()];

        while let Some(level) = levels.last_mut() {
            match level.next() {
                Some(Node::Element(element)) => {
                    if self.matches(element, &chain) && on_match(element, &chain) {
                        return;
                    }
                    chain.push(element);
                    levels.push(element.children.iter());
                }
                Some(_) => {}
                None => {
                    levels.pop();
                    if !levels.is_empty() {
                        chain.pop();
                    }
                }
            }
        }
    }
}

/// A matched element with its ancestors, outermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located<'a> {
    pub element: &'a Element,
    pub ancestors: Vec<&'a Element>,
}

impl<'a> Located<'a> {
    /// Ancestors followed by the element itself.
    fn chain(&self) -> Vec<&'a Element> {
        let mut chain = self.ancestors.clone();
        chain.push(self.element);
        chain
    }
}

/// Scope an element with no known ancestors.
impl<'a> From<&'a Element> for Located<'a> {
    fn from(element: &'a Element) -> Self {
        Self {
            element,
            ancestors: Vec::new(),
        }
    }
}

impl std::str::FromStr for Selector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
