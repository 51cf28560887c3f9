use crate::dom::element::ElementNode;
use crate::dom::parser::parse_fragment;
use crate::dom::selector::Selector;
use serde::{Deserialize, Serialize};

/// Mutation surface the exchange engine writes through.
///
/// Each operation locates the first element matching the selector in document
/// order and returns whether a target was found; `false` means the outcome is
/// discarded silently. Implementations decide how markup payloads are parsed;
/// `set_text` must always treat its payload as verbatim text.
pub trait Dom {
    /// Parse `markup` and replace the children of the matched element
    fn swap_inner(&mut self, selector: &str, markup: &str) -> bool;

    /// Parse `markup` and replace the matched element itself, subtree
    /// included
    fn swap_outer(&mut self, selector: &str, markup: &str) -> bool;

    /// Set the matched element's text content verbatim, without markup
    /// parsing
    fn set_text(&mut self, selector: &str, text: &str) -> bool;
}

/// In-memory document: a root element plus query and mutation operations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    root: ElementNode,
}

impl Document {
    /// Create a document from an existing root element
    pub fn new(root: ElementNode) -> Self {
        Self { root }
    }

    /// Parse an HTML fragment into a document under a synthetic `body` root
    pub fn from_html(html: &str) -> Self {
        Self { root: ElementNode::new("body").with_children(parse_fragment(html)) }
    }

    /// Get the root element
    pub fn root(&self) -> &ElementNode {
        &self.root
    }

    /// Get the root element mutably
    pub fn root_mut(&mut self) -> &mut ElementNode {
        &mut self.root
    }

    /// Find the first element matching the selector, depth-first in document
    /// order. Unsupported selector shapes match nothing.
    pub fn find(&self, selector: &str) -> Option<&ElementNode> {
        let selector = Selector::parse(selector)?;
        Self::find_in(&self.root, &selector)
    }

    /// Mutable variant of [`Document::find`]
    pub fn find_mut(&mut self, selector: &str) -> Option<&mut ElementNode> {
        let selector = Selector::parse(selector)?;
        Self::find_in_mut(&mut self.root, &selector)
    }

    fn find_in<'a>(node: &'a ElementNode, selector: &Selector) -> Option<&'a ElementNode> {
        if selector.matches(node) {
            return Some(node);
        }
        node.children.iter().find_map(|child| Self::find_in(child, selector))
    }

    fn find_in_mut<'a>(
        node: &'a mut ElementNode,
        selector: &Selector,
    ) -> Option<&'a mut ElementNode> {
        if selector.matches(node) {
            return Some(node);
        }
        for child in node.children.iter_mut() {
            if let Some(found) = Self::find_in_mut(child, selector) {
                return Some(found);
            }
        }
        None
    }

    fn replace_in(
        children: &mut Vec<ElementNode>,
        selector: &Selector,
        replacement: &[ElementNode],
    ) -> bool {
        for i in 0..children.len() {
            if selector.matches(&children[i]) {
                children.splice(i..=i, replacement.iter().cloned());
                return true;
            }
            if Self::replace_in(&mut children[i].children, selector, replacement) {
                return true;
            }
        }
        false
    }
}

impl Dom for Document {
    fn swap_inner(&mut self, selector: &str, markup: &str) -> bool {
        match self.find_mut(selector) {
            Some(node) => {
                node.set_children(parse_fragment(markup));
                true
            }
            None => false,
        }
    }

    fn swap_outer(&mut self, selector: &str, markup: &str) -> bool {
        let Some(selector) = Selector::parse(selector) else {
            return false;
        };
        // The synthetic root cannot be detached
        if selector.matches(&self.root) {
            return false;
        }
        let replacement = parse_fragment(markup);
        Self::replace_in(&mut self.root.children, &selector, &replacement)
    }

    fn set_text(&mut self, selector: &str, text: &str) -> bool {
        match self.find_mut(selector) {
            Some(node) => {
                node.set_text_content(text);
                true
            }
            None => false,
        }
    }
}
