use crate::dom::ElementNode;
use serde::{Deserialize, Serialize};

/// A single form field value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum FieldValue {
    /// A plain text field
    Text(String),

    /// A file field. Only the multipart encoding path carries the bytes;
    /// the urlencoded path degrades a file to its filename.
    File {
        /// Original filename as submitted
        filename: String,
        /// MIME type of the file content
        content_type: String,
        /// Raw file content
        bytes: Vec<u8>,
    },
}

impl FieldValue {
    /// Create a text value
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Create a file value
    pub fn file(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        FieldValue::File {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// The string this value flattens to on the non-multipart path: text
    /// verbatim, files as their filename (binary content dropped by policy)
    pub fn flattened(&self) -> &str {
        match self {
            FieldValue::Text(value) => value,
            FieldValue::File { filename, .. } => filename,
        }
    }
}

/// Ordered form field data, as a browser's FormData would carry it.
///
/// Duplicate field names are allowed and preserved in submission order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FormData {
    fields: Vec<(String, FieldValue)>,
}

impl FormData {
    /// Create empty form data
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field
    pub fn append(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.push((name.into(), value));
    }

    /// Builder method: append a text field
    pub fn with_text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.append(name, FieldValue::text(value));
        self
    }

    /// Builder method: append a file field
    pub fn with_file(
        mut self,
        name: impl Into<String>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.append(name, FieldValue::file(filename, content_type, bytes));
        self
    }

    /// Iterate over fields in submission order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if there are no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Flatten every field to string key/value pairs for the non-multipart
    /// path. Files contribute their filename, not their content.
    pub fn flatten(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.clone(), value.flattened().to_string()))
            .collect()
    }
}

/// A form submission event as seen by the interceptor.
///
/// Carries the submitted element, its field data, and the default-prevention
/// flag the engine sets when it hijacks the submission.
#[derive(Debug, Clone)]
pub struct SubmitEvent {
    target: ElementNode,
    data: FormData,
    default_prevented: bool,
}

impl SubmitEvent {
    /// Create a submit event for the given target element and its data
    pub fn new(target: ElementNode, data: FormData) -> Self {
        Self { target, data, default_prevented: false }
    }

    /// The element the event was dispatched on (usually a form)
    pub fn target(&self) -> &ElementNode {
        &self.target
    }

    /// The submitted field data
    pub fn data(&self) -> &FormData {
        &self.data
    }

    /// Suppress the native submission
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether native submission has been suppressed
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_text_fields() {
        let data = FormData::new().with_text("name", "ada").with_text("name", "grace");
        assert_eq!(
            data.flatten(),
            vec![
                ("name".to_string(), "ada".to_string()),
                ("name".to_string(), "grace".to_string()),
            ]
        );
    }

    #[test]
    fn test_flatten_degrades_file_to_filename() {
        let data = FormData::new()
            .with_text("title", "report")
            .with_file("doc", "report.pdf", "application/pdf", vec![1, 2, 3]);

        assert_eq!(
            data.flatten(),
            vec![
                ("title".to_string(), "report".to_string()),
                ("doc".to_string(), "report.pdf".to_string()),
            ]
        );
    }

    #[test]
    fn test_field_order_preserved() {
        let data = FormData::new().with_text("b", "2").with_text("a", "1");
        let names: Vec<_> = data.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_submit_event_prevent_default() {
        let form = ElementNode::new("form");
        let mut event = SubmitEvent::new(form, FormData::new());

        assert!(!event.default_prevented());
        event.prevent_default();
        assert!(event.default_prevented());
    }
}
