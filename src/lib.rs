//! # formswap
//!
//! A Rust library for declarative form interception and response swapping:
//! form submissions carrying `hx-*` attributes are hijacked, turned into
//! asynchronous requests, and their responses spliced into the document at a
//! caller-declared target.
//!
//! ## Attribute surface
//!
//! Read from the submitted form element:
//!
//! - `hx-post` — select POST and this URL
//! - `hx-get` — select GET and this URL (ignored if `hx-post` is present)
//! - `hx-target` — CSS selector of the element to mutate
//! - `hx-swap` — `replace-inner` (default), `replace-outer`, or `text-only`
//! - `hx-encoding` — overrides the form's native `enctype` (e.g., forces
//!   multipart)
//!
//! Forms without `hx-post` or `hx-get` are left to native handling.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use formswap::{Document, ElementNode, ExchangeEngine, FormData, HttpTransport, SubmitEvent};
//!
//! # async fn demo() {
//! // One engine per page; the transport is injected
//! let engine = ExchangeEngine::new(Arc::new(HttpTransport::new()));
//! let mut document = Document::from_html("<div id=\"out\">pending</div>");
//!
//! // A submit event as the host environment would dispatch it
//! let form = ElementNode::new("form")
//!     .with_attribute("hx-post", "https://example.com/search")
//!     .with_attribute("hx-target", "#out");
//! let mut event = SubmitEvent::new(form, FormData::new().with_text("q", "rust"));
//!
//! engine.handle_submit(&mut event, &mut document).await;
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`declaration`]: the typed declaration a form's attributes resolve to,
//!   and the interceptor decision ([`Declaration::from_submit`])
//! - [`engine`]: the exchange pipeline — body construction, response
//!   classification, swap application
//! - [`transport`]: the fetch-like [`Transport`] seam and the `reqwest`
//!   implementation (`http` feature, on by default)
//! - [`dom`]: the in-memory document, selector subset, and fragment parser
//! - [`form`]: form data and submit events
//! - [`error`]: error types and result alias
//!
//! ## Error handling
//!
//! Every failure an exchange meets — transport errors, non-2xx statuses,
//! malformed JSON — is recovered locally and rendered as `Error: {message}`
//! text in the target element. Missing targets discard the outcome silently.
//! Nothing escalates.

pub mod declaration;
pub mod dom;
pub mod engine;
pub mod error;
pub mod form;
pub mod transport;

pub use declaration::{Declaration, Encoding, Method, SwapMode};
pub use dom::{Document, Dom, ElementNode, Selector};
pub use engine::{Disposition, ExchangeEngine, Outcome, ResponseKind};
pub use error::{ExchangeError, Result};
pub use form::{FieldValue, FormData, SubmitEvent};
pub use transport::{ExchangeRequest, ExchangeResponse, RequestBody, Transport};

#[cfg(feature = "http")]
pub use transport::HttpTransport;
