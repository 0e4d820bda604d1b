//! HTML output, and the converter that reads it back into SlimeMark.

pub mod reverse;

use crate::models::Element;

pub use reverse::{ConverterSettings, HtmlToMarkupConverter};

/// Tags whose content is already complete HTML.
pub const VERBATIM_TAGS: &[&str] = &["img", "table", "link", "iframe", "raw"];

/// Serializes elements into a single HTML string.
///
/// Content is trusted: nothing is escaped.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, elements: &[Element]) -> String {
        let mut html = String::new();
        for el in elements {
            self.render_element(el, &mut html);
        }
        html
    }

    fn render_element(&self, el: &Element, out: &mut String) {
        let tag = el.tag.as_str();
        if VERBATIM_TAGS.contains(&tag) {
            out.push_str(&el.content);
        } else if tag == "h0" {
            // Legacy level-0 header: content still carries its marker character.
            let mut chars = el.content.chars();
            chars.next();
            out.push_str(&format!("<h1>{}</h1>", chars.as_str().trim()));
        } else {
            out.push_str(&format!("<{tag}>{}</{tag}>", el.content));
        }
    }
}
