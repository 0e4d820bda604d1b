use std::sync::OnceLock;

use regex::Regex;

use super::{BlockExtension, ParseContext, attributes};
use crate::models::Element;
use crate::parsing::cursor::LineCursor;

/// `![alt](src){key=value ...}` on a line of its own.
pub struct Image;

fn alt_regex() -> &'static Regex {
    static ALT: OnceLock<Regex> = OnceLock::new();
    ALT.get_or_init(|| Regex::new(r"!\[(.*?)\]").expect("Invalid image alt regex"))
}

fn src_regex() -> &'static Regex {
    static SRC: OnceLock<Regex> = OnceLock::new();
    SRC.get_or_init(|| Regex::new(r"\((.*?)\)").expect("Invalid image src regex"))
}

fn first_capture<'t>(re: &Regex, text: &'t str) -> &'t str {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map_or("", |m| m.as_str())
}

impl Image {
    pub const PREFIX: &'static str = "![";

    pub fn to_html(line: &str) -> String {
        let alt = first_capture(alt_regex(), line);
        let src = first_capture(src_regex(), line);
        format!(
            "<img src=\"{src}\" alt=\"{alt}\"{} />",
            attributes::render(line)
        )
    }
}

impl BlockExtension for Image {
    fn name(&self) -> &'static str {
        "image"
    }

    fn can_parse(&self, line: &str) -> bool {
        line.starts_with(Self::PREFIX)
    }

    fn parse_block(
        &self,
        lines: &mut LineCursor<'_>,
        _ctx: &mut ParseContext<'_>,
    ) -> Option<Vec<Element>> {
        let line = lines.advance()?;
        Some(vec![Element::new("img", Self::to_html(line))])
    }
}
