//! The declarative attribute surface and the interceptor decision.
//!
//! [`Declaration::from_submit`] is the only place attributes are read: it
//! turns a submit event into a typed declaration, or `None` when the form
//! declares nothing and native submission should proceed.

use crate::dom::ElementNode;
use crate::form::SubmitEvent;
use serde::{Deserialize, Serialize};

/// Attribute selecting POST and its URL
pub const ATTR_POST: &str = "hx-post";
/// Attribute selecting GET and its URL (ignored when `hx-post` is present)
pub const ATTR_GET: &str = "hx-get";
/// Attribute carrying the CSS selector of the element to mutate
pub const ATTR_TARGET: &str = "hx-target";
/// Attribute choosing the swap mode
pub const ATTR_SWAP: &str = "hx-swap";
/// Attribute overriding the form's native encoding
pub const ATTR_ENCODING: &str = "hx-encoding";

/// HTTP method of an exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
}

impl Method {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }

    /// GET requests never carry a body
    pub fn is_get(&self) -> bool {
        matches!(self, Method::Get)
    }
}

/// Strategy for applying a successful payload to the target element
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SwapMode {
    /// Parse the payload as markup and replace the target's children
    #[default]
    ReplaceInner,
    /// Parse the payload as markup and replace the target element itself
    ReplaceOuter,
    /// Set the target's text content verbatim, without markup parsing
    TextOnly,
}

impl SwapMode {
    /// Resolve the swap attribute value. Absent or unrecognized values fall
    /// back to the default, matching the lenient attribute surface.
    pub fn from_attr(value: Option<&str>) -> Self {
        match value {
            Some("replace-outer") => SwapMode::ReplaceOuter,
            Some("text-only") => SwapMode::TextOnly,
            _ => SwapMode::ReplaceInner,
        }
    }

    /// Attribute representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SwapMode::ReplaceInner => "replace-inner",
            SwapMode::ReplaceOuter => "replace-outer",
            SwapMode::TextOnly => "text-only",
        }
    }
}

/// Request body encoding declared by the form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Encoding {
    /// Flattened key/value pairs; files degrade to their filename
    #[default]
    UrlEncoded,
    /// Form data passed through unchanged, preserving file uploads
    Multipart,
}

impl Encoding {
    /// Multipart only on the exact standard enctype value; everything else
    /// takes the urlencoded path
    pub fn from_attr(value: Option<&str>) -> Self {
        match value {
            Some("multipart/form-data") => Encoding::Multipart,
            _ => Encoding::UrlEncoded,
        }
    }

    /// Whether the form data passes through unchanged
    pub fn is_multipart(&self) -> bool {
        matches!(self, Encoding::Multipart)
    }
}

/// The resolved request parameters a form declared for its submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    /// POST when `hx-post` is present, otherwise GET
    pub method: Method,

    /// `hx-post`, else `hx-get`, else the form's `action` attribute
    pub url: String,

    /// CSS selector of the element to mutate; absent means fire-and-forget
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_selector: Option<String>,

    /// Swap strategy for a successful payload
    pub swap: SwapMode,

    /// Declared body encoding
    pub encoding: Encoding,
}

impl Declaration {
    /// Decide whether a submit event declares an exchange, and extract it.
    ///
    /// Returns `None` (native submission proceeds) when the event target is
    /// not a form, or when neither `hx-post` nor `hx-get` carries a value.
    /// Empty attribute values count as absent, matching the falsy check of
    /// the attribute surface. POST wins when both URLs are present.
    pub fn from_submit(event: &SubmitEvent) -> Option<Declaration> {
        let form = event.target();
        if !form.is_tag("form") {
            return None;
        }

        let post_url = non_empty_attr(form, ATTR_POST);
        let get_url = non_empty_attr(form, ATTR_GET);
        if post_url.is_none() && get_url.is_none() {
            return None;
        }

        let method = if post_url.is_some() { Method::Post } else { Method::Get };
        let url = post_url
            .or(get_url)
            .or_else(|| non_empty_attr(form, "action"))
            .unwrap_or_default()
            .to_string();

        let encoding = Encoding::from_attr(
            form.get_attribute(ATTR_ENCODING)
                .or_else(|| form.get_attribute("enctype")),
        );

        Some(Declaration {
            method,
            url,
            target_selector: form.get_attribute(ATTR_TARGET).map(str::to_string),
            swap: SwapMode::from_attr(form.get_attribute(ATTR_SWAP)),
            encoding,
        })
    }
}

fn non_empty_attr<'a>(form: &'a ElementNode, name: &str) -> Option<&'a str> {
    form.get_attribute(name).filter(|value| !value.is_empty())
}
