use std::sync::OnceLock;

use regex::Regex;

use super::{BlockExtension, ParseContext};
use crate::models::Element;
use crate::parsing::cursor::LineCursor;

/// Thematic break: three or more `*`, `-` or `_`, optionally spaced.
pub struct HorizontalRule;

impl HorizontalRule {
    pub const HTML: &'static str = "<hr/>";
}

fn hr_regex() -> &'static Regex {
    static HR: OnceLock<Regex> = OnceLock::new();
    HR.get_or_init(|| {
        Regex::new(r"^(?: {0,3})(?:(?:\* {0,2}){3,}|(?:- {0,2}){3,}|(?:_ {0,2}){3,})$")
            .expect("Invalid horizontal rule regex")
    })
}

impl BlockExtension for HorizontalRule {
    fn name(&self) -> &'static str {
        "horizontal-rule"
    }

    fn can_parse(&self, line: &str) -> bool {
        hr_regex().is_match(line)
    }

    fn parse_block(
        &self,
        lines: &mut LineCursor<'_>,
        _ctx: &mut ParseContext<'_>,
    ) -> Option<Vec<Element>> {
        let line = lines.peek()?;
        if !self.can_parse(line) {
            return None;
        }
        lines.advance();
        Some(vec![Element::raw(Self::HTML)])
    }
}
