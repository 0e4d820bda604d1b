use std::sync::OnceLock;

use regex::Regex;

fn attr_block_regex() -> &'static Regex {
    static ATTR_BLOCK: OnceLock<Regex> = OnceLock::new();
    ATTR_BLOCK.get_or_init(|| Regex::new(r"\{(.*?)\}").expect("Invalid attribute regex"))
}

/// Renders the first `{key=value ...}` block found in `text` as HTML
/// attributes, each prefixed with a space.
///
/// Parts without exactly one `=` are skipped.
pub fn render(text: &str) -> String {
    let Some(caps) = attr_block_regex().captures(text) else {
        return String::new();
    };
    render_pairs(&caps[1])
}

/// Renders the body of an attribute block (without braces).
pub fn render_pairs(body: &str) -> String {
    let mut out = String::new();
    for part in body.split_whitespace() {
        let mut kv = part.split('=');
        if let (Some(key), Some(value), None) = (kv.next(), kv.next(), kv.next()) {
            out.push_str(&format!(" {key}=\"{value}\""));
        }
    }
    out
}
