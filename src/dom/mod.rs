//! In-memory DOM substrate for the swap engine
//!
//! This module hosts the document side of an exchange:
//! - [`ElementNode`]: element and text nodes with ordered attributes
//! - [`Document`]: a root element with query and mutation operations
//! - [`Dom`]: the mutation trait the engine writes through (so tests can
//!   substitute fakes)
//! - [`parse_fragment`]: the HTML fragment parser behind the markup swap
//!   modes
//! - [`Selector`]: the supported CSS-selector subset

pub mod document;
pub mod element;
pub mod parser;
pub mod selector;

pub use document::{Document, Dom};
pub use element::{ElementNode, TEXT_TAG};
pub use parser::{decode_entities, parse_fragment};
pub use selector::Selector;
