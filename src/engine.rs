//! The exchange engine: one linear pipeline per form submission.
//!
//! [`ExchangeEngine::handle_submit`] is the single registration point: feed
//! it every submit event and it decides, via [`Declaration::from_submit`],
//! whether to hijack the submission. Hijacked submissions run request →
//! response classification → swap application; everything else is left to
//! native handling untouched.

use crate::declaration::{Declaration, SwapMode};
use crate::dom::Dom;
use crate::form::{FormData, SubmitEvent};
use crate::transport::{ExchangeRequest, ExchangeResponse, RequestBody, Transport};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// How the engine disposed of a submit event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Disposition {
    /// No declaring attributes; native submission proceeds unmodified
    Native,
    /// The submission was hijacked and an exchange ran to completion
    Intercepted,
}

/// Terminal result of an exchange, consumed exactly once to mutate the
/// target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Payload ready for display: response text verbatim, or JSON
    /// re-serialized with 2-space indentation
    Success(String),
    /// Human-readable failure message, rendered as text in place
    Failure(String),
}

/// Response payload classification, keyed off the declared content type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Json,
    Text,
}

impl ResponseKind {
    /// Substring match on `application/json`; anything else, including a
    /// missing content type, is treated as text.
    pub fn of(content_type: Option<&str>) -> Self {
        match content_type {
            Some(value) if value.contains("application/json") => ResponseKind::Json,
            _ => ResponseKind::Text,
        }
    }
}

/// Build the request a declaration resolves to.
///
/// GET carries no body. Non-GET builds a fresh body: multipart passes the
/// form data through unchanged; anything else flattens fields to string
/// pairs, files degraded to their filename.
pub fn build_request(declaration: &Declaration, data: &FormData) -> ExchangeRequest {
    let body = if declaration.method.is_get() {
        None
    } else if declaration.encoding.is_multipart() {
        Some(RequestBody::Multipart(data.clone()))
    } else {
        Some(RequestBody::UrlEncoded(data.flatten()))
    };

    ExchangeRequest { method: declaration.method, url: declaration.url.clone(), body }
}

/// Classify a response into its outcome.
///
/// Non-2xx fails with a status-coded message and the body is not
/// interpreted. On success, a JSON content type is parsed and re-serialized
/// pretty-printed; malformed JSON is a failure with the parser's message;
/// any other content type passes the body through verbatim.
pub fn classify(response: &ExchangeResponse) -> Outcome {
    if !response.is_success() {
        return Outcome::Failure(format!("Request failed with status {}", response.status));
    }

    match ResponseKind::of(response.content_type.as_deref()) {
        ResponseKind::Json => match serde_json::from_str::<serde_json::Value>(&response.body) {
            Ok(value) => match serde_json::to_string_pretty(&value) {
                Ok(pretty) => Outcome::Success(pretty),
                Err(e) => Outcome::Failure(e.to_string()),
            },
            Err(e) => Outcome::Failure(e.to_string()),
        },
        ResponseKind::Text => Outcome::Success(response.body.clone()),
    }
}

/// Apply an outcome to the document.
///
/// No target selector, or a selector matching nothing, discards the outcome
/// silently for success and failure alike. Failures always render as text,
/// bypassing markup parsing regardless of swap mode.
pub fn apply_outcome(dom: &mut dyn Dom, declaration: &Declaration, outcome: Outcome) {
    let Some(selector) = declaration.target_selector.as_deref() else {
        log::trace!("no target selector; outcome discarded");
        return;
    };

    let applied = match outcome {
        Outcome::Failure(message) => dom.set_text(selector, &format!("Error: {message}")),
        Outcome::Success(payload) => match declaration.swap {
            SwapMode::ReplaceInner => dom.swap_inner(selector, &payload),
            SwapMode::ReplaceOuter => dom.swap_outer(selector, &payload),
            SwapMode::TextOnly => dom.set_text(selector, &payload),
        },
    };

    if !applied {
        log::debug!("target '{selector}' not found; outcome discarded");
    }
}

/// Drives exchanges against an injected transport.
///
/// Stateless across submissions: each call to
/// [`handle_submit`](ExchangeEngine::handle_submit) is an independent
/// pipeline. Concurrent submissions are not coordinated or de-duplicated;
/// the last one to finish writes the DOM.
#[derive(Clone)]
pub struct ExchangeEngine {
    transport: Arc<dyn Transport>,
}

impl ExchangeEngine {
    /// Create an engine over the given transport
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Handle one submit event.
    ///
    /// Exactly one of two things happens: the event is left untouched and
    /// [`Disposition::Native`] is returned, or default handling is
    /// suppressed and the full exchange runs before
    /// [`Disposition::Intercepted`] is returned.
    pub async fn handle_submit(&self, event: &mut SubmitEvent, dom: &mut dyn Dom) -> Disposition {
        let Some(declaration) = Declaration::from_submit(event) else {
            return Disposition::Native;
        };
        event.prevent_default();

        log::debug!("intercepted submit: {} {}", declaration.method.as_str(), declaration.url);
        self.execute(&declaration, event.data(), dom).await;
        Disposition::Intercepted
    }

    /// Run an exchange for an already-resolved declaration.
    ///
    /// All failures are recovered here and rendered in place; nothing
    /// escalates past this method.
    pub async fn execute(&self, declaration: &Declaration, data: &FormData, dom: &mut dyn Dom) {
        let request = build_request(declaration, data);
        let outcome = match self.transport.send(request).await {
            Ok(response) => classify(&response),
            Err(e) => Outcome::Failure(e.to_string()),
        };
        apply_outcome(dom, declaration, outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::{Encoding, Method};

    fn declaration(method: Method) -> Declaration {
        Declaration {
            method,
            url: "/submit".to_string(),
            target_selector: Some("#out".to_string()),
            swap: SwapMode::ReplaceInner,
            encoding: Encoding::UrlEncoded,
        }
    }

    #[test]
    fn test_get_request_has_no_body() {
        let data = FormData::new().with_text("q", "rust");
        let request = build_request(&declaration(Method::Get), &data);
        assert!(request.body.is_none());
    }

    #[test]
    fn test_post_request_flattens_fields() {
        let data = FormData::new()
            .with_text("q", "rust")
            .with_file("doc", "notes.txt", "text/plain", b"hi".to_vec());
        let request = build_request(&declaration(Method::Post), &data);

        assert_eq!(
            request.body,
            Some(RequestBody::UrlEncoded(vec![
                ("q".to_string(), "rust".to_string()),
                ("doc".to_string(), "notes.txt".to_string()),
            ]))
        );
    }

    #[test]
    fn test_multipart_passes_data_through() {
        let mut decl = declaration(Method::Post);
        decl.encoding = Encoding::Multipart;
        let data = FormData::new().with_file("doc", "notes.txt", "text/plain", b"hi".to_vec());

        let request = build_request(&decl, &data);
        assert_eq!(request.body, Some(RequestBody::Multipart(data)));
    }

    #[test]
    fn test_classify_failure_status() {
        let response = ExchangeResponse::new(500, Some("text/html"), "ignored");
        assert_eq!(
            classify(&response),
            Outcome::Failure("Request failed with status 500".to_string())
        );
    }

    #[test]
    fn test_classify_json_pretty_printed() {
        let response = ExchangeResponse::new(200, Some("application/json"), "{\"a\":1}");
        assert_eq!(classify(&response), Outcome::Success("{\n  \"a\": 1\n}".to_string()));
    }

    #[test]
    fn test_classify_json_content_type_substring() {
        let response =
            ExchangeResponse::new(200, Some("application/json; charset=utf-8"), "[1,2]");
        assert_eq!(classify(&response), Outcome::Success("[\n  1,\n  2\n]".to_string()));
    }

    #[test]
    fn test_classify_malformed_json_fails() {
        let response = ExchangeResponse::new(200, Some("application/json"), "{broken");
        assert!(matches!(classify(&response), Outcome::Failure(_)));
    }

    #[test]
    fn test_classify_text_verbatim() {
        let response = ExchangeResponse::new(200, Some("text/html"), "<p>done</p>");
        assert_eq!(classify(&response), Outcome::Success("<p>done</p>".to_string()));
    }

    #[test]
    fn test_classify_missing_content_type_is_text() {
        let response = ExchangeResponse::new(200, None, "{\"a\":1}");
        // Without a JSON content type the wire bytes pass through untouched
        assert_eq!(classify(&response), Outcome::Success("{\"a\":1}".to_string()));
    }

    #[test]
    fn test_response_kind_fallback() {
        assert_eq!(ResponseKind::of(Some("application/json")), ResponseKind::Json);
        assert_eq!(ResponseKind::of(Some("text/plain")), ResponseKind::Text);
        assert_eq!(ResponseKind::of(None), ResponseKind::Text);
    }

    #[test]
    fn test_apply_without_selector_discards() {
        struct PanickingDom;
        impl Dom for PanickingDom {
            fn swap_inner(&mut self, _: &str, _: &str) -> bool {
                panic!("must not be called")
            }
            fn swap_outer(&mut self, _: &str, _: &str) -> bool {
                panic!("must not be called")
            }
            fn set_text(&mut self, _: &str, _: &str) -> bool {
                panic!("must not be called")
            }
        }

        let mut decl = declaration(Method::Post);
        decl.target_selector = None;

        let mut dom = PanickingDom;
        apply_outcome(&mut dom, &decl, Outcome::Success("x".to_string()));
        apply_outcome(&mut dom, &decl, Outcome::Failure("y".to_string()));
    }

    #[test]
    fn test_apply_failure_always_sets_text() {
        #[derive(Default)]
        struct RecordingDom {
            set_text_calls: Vec<(String, String)>,
        }
        impl Dom for RecordingDom {
            fn swap_inner(&mut self, _: &str, _: &str) -> bool {
                panic!("failures bypass markup swaps")
            }
            fn swap_outer(&mut self, _: &str, _: &str) -> bool {
                panic!("failures bypass markup swaps")
            }
            fn set_text(&mut self, selector: &str, text: &str) -> bool {
                self.set_text_calls.push((selector.to_string(), text.to_string()));
                true
            }
        }

        for swap in [SwapMode::ReplaceInner, SwapMode::ReplaceOuter, SwapMode::TextOnly] {
            let mut decl = declaration(Method::Post);
            decl.swap = swap;

            let mut dom = RecordingDom::default();
            apply_outcome(&mut dom, &decl, Outcome::Failure("boom".to_string()));
            assert_eq!(
                dom.set_text_calls,
                vec![("#out".to_string(), "Error: boom".to_string())]
            );
        }
    }
}
