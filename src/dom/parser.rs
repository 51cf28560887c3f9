//! Minimal HTML fragment parser backing the swap engine.
//!
//! Parses the payload shapes a swap needs: nested tags with quoted, unquoted,
//! and bare attributes, text nodes, comments (skipped), void elements, and
//! `/>` self-closing syntax. Unclosed tags are tolerated and closed at end of
//! input; stray close tags are ignored. This is deliberately not a general
//! web-content parser.

use crate::dom::element::ElementNode;

/// Elements that never have children and need no close tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Parse an HTML fragment into a list of sibling nodes
pub fn parse_fragment(input: &str) -> Vec<ElementNode> {
    FragmentParser::new(input).run()
}

/// Decode the basic named and numeric entities that appear in form-facing
/// markup
pub fn decode_entities(input: &str) -> String {
    input
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

struct FragmentParser {
    chars: Vec<char>,
    pos: usize,
}

impl FragmentParser {
    fn new(input: &str) -> Self {
        Self { chars: input.chars().collect(), pos: 0 }
    }

    fn run(mut self) -> Vec<ElementNode> {
        let mut roots: Vec<ElementNode> = Vec::new();
        let mut stack: Vec<ElementNode> = Vec::new();

        while let Some(c) = self.peek() {
            if c == '<' {
                if self.starts_with("<!--") {
                    self.skip_comment();
                } else if self.starts_with("</") {
                    self.handle_close_tag(&mut roots, &mut stack);
                } else if self.peek_at(1).is_some_and(|c| c.is_ascii_alphabetic()) {
                    self.handle_open_tag(&mut roots, &mut stack);
                } else {
                    // Stray '<' with no tag following; treat as text
                    self.pos += 1;
                    Self::attach(&mut roots, &mut stack, ElementNode::text_node("<"));
                }
            } else {
                self.handle_text(&mut roots, &mut stack);
            }
        }

        // Unclosed tags are closed at end of input
        while let Some(node) = stack.pop() {
            Self::attach(&mut roots, &mut stack, node);
        }

        roots
    }

    fn handle_text(&mut self, roots: &mut Vec<ElementNode>, stack: &mut Vec<ElementNode>) {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c == '<' {
                break;
            }
            text.push(c);
            self.pos += 1;
        }
        if !text.is_empty() {
            Self::attach(roots, stack, ElementNode::text_node(decode_entities(&text)));
        }
    }

    fn handle_open_tag(&mut self, roots: &mut Vec<ElementNode>, stack: &mut Vec<ElementNode>) {
        self.pos += 1; // consume '<'
        let tag_name = self.read_name();
        let mut element = ElementNode::new(tag_name.to_ascii_lowercase());
        let mut self_closing = false;

        loop {
            self.skip_whitespace();
            match self.peek() {
                None => break,
                Some('>') => {
                    self.pos += 1;
                    break;
                }
                Some('/') => {
                    self.pos += 1;
                    if self.peek() == Some('>') {
                        self.pos += 1;
                        self_closing = true;
                        break;
                    }
                }
                Some(_) => {
                    let name = self.read_attr_name();
                    if name.is_empty() {
                        // Malformed attribute; skip one char to make progress
                        self.pos += 1;
                        continue;
                    }
                    self.skip_whitespace();
                    let value = if self.peek() == Some('=') {
                        self.pos += 1;
                        self.skip_whitespace();
                        self.read_attr_value()
                    } else {
                        String::new() // bare attribute
                    };
                    element.add_attribute(name.to_ascii_lowercase(), value);
                }
            }
        }

        if self_closing || VOID_ELEMENTS.contains(&element.tag_name.as_str()) {
            Self::attach(roots, stack, element);
        } else {
            stack.push(element);
        }
    }

    fn handle_close_tag(&mut self, roots: &mut Vec<ElementNode>, stack: &mut Vec<ElementNode>) {
        self.pos += 2; // consume "</"
        let tag_name = self.read_name().to_ascii_lowercase();
        while let Some(c) = self.peek() {
            self.pos += 1;
            if c == '>' {
                break;
            }
        }

        // Ignore close tags with no matching open element
        if !stack.iter().any(|node| node.tag_name == tag_name) {
            return;
        }
        while let Some(node) = stack.pop() {
            let closed = node.tag_name == tag_name;
            Self::attach(roots, stack, node);
            if closed {
                break;
            }
        }
    }

    fn skip_comment(&mut self) {
        self.pos += 4; // consume "<!--"
        while self.pos < self.chars.len() {
            if self.starts_with("-->") {
                self.pos += 3;
                return;
            }
            self.pos += 1;
        }
    }

    fn read_name(&mut self) -> String {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '-' {
                name.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        name
    }

    fn read_attr_name(&mut self) -> String {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c.is_whitespace() || c == '=' || c == '>' || c == '/' {
                break;
            }
            name.push(c);
            self.pos += 1;
        }
        name
    }

    fn read_attr_value(&mut self) -> String {
        let mut value = String::new();
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                while let Some(c) = self.peek() {
                    self.pos += 1;
                    if c == quote {
                        break;
                    }
                    value.push(c);
                }
            }
            _ => {
                while let Some(c) = self.peek() {
                    if c.is_whitespace() || c == '>' {
                        break;
                    }
                    value.push(c);
                    self.pos += 1;
                }
            }
        }
        decode_entities(&value)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|c| c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn starts_with(&self, prefix: &str) -> bool {
        prefix
            .chars()
            .enumerate()
            .all(|(i, c)| self.peek_at(i) == Some(c))
    }

    fn attach(roots: &mut Vec<ElementNode>, stack: &mut Vec<ElementNode>, node: ElementNode) {
        match stack.last_mut() {
            Some(parent) => parent.add_child(node),
            None => roots.push(node),
        }
    }
}
