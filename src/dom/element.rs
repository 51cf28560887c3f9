use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Tag name used for text nodes.
pub const TEXT_TAG: &str = "#text";

/// A node in the in-memory document tree.
///
/// Elements carry a tag name, attributes, and children. Text is represented
/// as `#text` nodes whose `text` field holds the content; an element built by
/// hand may also set `text` directly for its own leading text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementNode {
    /// Tag name (e.g., "form", "div"), or `#text` for a text node
    pub tag_name: String,

    /// Element attributes in document order
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, String>,

    /// Own text content (always set for `#text` nodes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Child nodes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementNode>,
}

impl ElementNode {
    /// Create a new element with the given tag name
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: IndexMap::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Create a text node
    pub fn text_node(text: impl Into<String>) -> Self {
        Self {
            tag_name: TEXT_TAG.to_string(),
            attributes: IndexMap::new(),
            text: Some(text.into()),
            children: Vec::new(),
        }
    }

    /// Builder method: set attributes
    pub fn with_attributes(mut self, attributes: IndexMap<String, String>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Builder method: set a single attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Builder method: set own text
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Builder method: set children
    pub fn with_children(mut self, children: Vec<ElementNode>) -> Self {
        self.children = children;
        self
    }

    /// Add a single attribute
    pub fn add_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Add a child node
    pub fn add_child(&mut self, child: ElementNode) {
        self.children.push(child);
    }

    /// Get attribute value by key
    pub fn get_attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Get element ID
    pub fn id(&self) -> Option<&str> {
        self.get_attribute("id")
    }

    /// Check if element has a specific class
    pub fn has_class(&self, class_name: &str) -> bool {
        self.get_attribute("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class_name))
            .unwrap_or(false)
    }

    /// Check if element is a specific tag (case-insensitive)
    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag_name.eq_ignore_ascii_case(tag)
    }

    /// Check if this node is a text node
    pub fn is_text(&self) -> bool {
        self.tag_name == TEXT_TAG
    }

    /// Concatenated text of this node and all descendants, in document order
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// Replace all content of this node with the given verbatim text.
    ///
    /// Existing children are removed; the text is never parsed as markup.
    pub fn set_text_content(&mut self, text: impl Into<String>) {
        self.children.clear();
        self.text = Some(text.into());
    }

    /// Replace all children of this node with the given nodes, clearing any
    /// own text
    pub fn set_children(&mut self, children: Vec<ElementNode>) {
        self.text = None;
        self.children = children;
    }

    /// Count this node and all descendants
    pub fn count_nodes(&self) -> usize {
        1 + self.children.iter().map(ElementNode::count_nodes).sum::<usize>()
    }
}
