//! Leading YAML front matter (`---` ... `---`).

use std::sync::OnceLock;

use regex::Regex;

/// Matches the front-matter block at the very start of the text, including
/// the whitespace that trails the closing delimiter.
fn front_matter_regex() -> &'static Regex {
    static FRONT_MATTER: OnceLock<Regex> = OnceLock::new();
    FRONT_MATTER.get_or_init(|| {
        Regex::new(r"(?s)\A\s*---\s*\r?\n(.*?)\r?\n\s*---\s*").expect("Invalid front matter regex")
    })
}

/// Returns the YAML between the delimiters, if the text starts with a block.
pub fn extract(text: &str) -> Option<&str> {
    front_matter_regex()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Removes the leading front-matter block; text without one is returned as is.
pub fn strip(text: &str) -> &str {
    match front_matter_regex().find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}
