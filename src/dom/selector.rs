use crate::dom::element::ElementNode;

/// A parsed CSS selector, limited to the shapes the swap engine needs.
///
/// Supported forms: `#id`, `.class`, `tag`, `tag.class`, `tag#id`. Anything
/// else fails to parse and matches nothing, which downstream reads as
/// "target not found" rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// `#id`
    Id(String),
    /// `.class`
    Class(String),
    /// `tag`
    Tag(String),
    /// `tag.class`
    TagClass(String, String),
    /// `tag#id`
    TagId(String, String),
}

impl Selector {
    /// Parse a selector string, returning `None` for unsupported shapes
    pub fn parse(input: &str) -> Option<Selector> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }

        if let Some(id) = trimmed.strip_prefix('#') {
            return (!id.is_empty()).then(|| Selector::Id(id.to_string()));
        }
        if let Some(class) = trimmed.strip_prefix('.') {
            return (!class.is_empty()).then(|| Selector::Class(class.to_string()));
        }
        if let Some((tag, id)) = trimmed.split_once('#') {
            return (!tag.is_empty() && !id.is_empty())
                .then(|| Selector::TagId(tag.to_string(), id.to_string()));
        }
        if let Some((tag, class)) = trimmed.split_once('.') {
            return (!tag.is_empty() && !class.is_empty())
                .then(|| Selector::TagClass(tag.to_string(), class.to_string()));
        }

        // Plain tag names only; combinators and pseudo-classes are unsupported
        if trimmed.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Some(Selector::Tag(trimmed.to_string()));
        }

        None
    }

    /// Check whether this selector matches the given node.
    ///
    /// Text nodes never match.
    pub fn matches(&self, node: &ElementNode) -> bool {
        if node.is_text() {
            return false;
        }
        match self {
            Selector::Id(id) => node.id() == Some(id.as_str()),
            Selector::Class(class) => node.has_class(class),
            Selector::Tag(tag) => node.is_tag(tag),
            Selector::TagClass(tag, class) => node.is_tag(tag) && node.has_class(class),
            Selector::TagId(tag, id) => node.is_tag(tag) && node.id() == Some(id.as_str()),
        }
    }
}
