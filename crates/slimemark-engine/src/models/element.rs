use std::collections::BTreeMap;

use serde::Serialize;

/// A single parsed unit of a document.
///
/// Elements are flat leaves: `attributes` and `children` exist so callers can
/// build richer trees, but no registered extension populates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    /// Tag name used by the renderer (`h1`, `p`, `ul`, `raw`, ...).
    pub tag: String,
    /// Pre-formatted text or HTML fragment.
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Element>>,
}

impl Element {
    pub const DEFAULT_TAG: &'static str = "p";

    pub fn new(tag: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            content: content.into(),
            attributes: None,
            children: None,
        }
    }

    /// A paragraph element, the engine's fallback for unclaimed lines.
    pub fn paragraph(content: impl Into<String>) -> Self {
        Self::new(Self::DEFAULT_TAG, content)
    }

    /// An element whose content is already complete HTML.
    pub fn raw(content: impl Into<String>) -> Self {
        Self::new("raw", content)
    }
}

impl Default for Element {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TAG, String::new())
    }
}
