use std::sync::OnceLock;

use regex::Regex;

use super::{BlockExtension, ParseContext};
use crate::models::Element;
use crate::parsing::cursor::LineCursor;
use crate::parsing::preprocess::ERROR_MARKER;

/// Drops lines that look like raw HTML (`<` ... `>`).
///
/// Inline include error markers always survive so failures stay visible in
/// the output. Include directives survive when the dialect handles them.
pub struct HtmlIgnore {
    allow_includes: bool,
}

fn directive_regex() -> &'static Regex {
    static DIRECTIVE: OnceLock<Regex> = OnceLock::new();
    DIRECTIVE.get_or_init(|| {
        Regex::new(r"(?i)^<!--\s*include(?:\s+(?:style|script))?\s*:")
            .expect("Invalid include directive regex")
    })
}

impl HtmlIgnore {
    pub fn allowing_includes() -> Self {
        Self {
            allow_includes: true,
        }
    }

    pub fn suppressing_all() -> Self {
        Self {
            allow_includes: false,
        }
    }

    pub fn is_include_directive(line: &str) -> bool {
        directive_regex().is_match(line.trim_start())
    }
}

impl BlockExtension for HtmlIgnore {
    fn name(&self) -> &'static str {
        "html-ignore"
    }

    fn order(&self) -> i32 {
        0
    }

    fn can_parse(&self, line: &str) -> bool {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(ERROR_MARKER) {
            return false;
        }
        if self.allow_includes && Self::is_include_directive(trimmed) {
            return false;
        }
        trimmed.starts_with('<') && trimmed.ends_with('>')
    }

    fn parse_block(
        &self,
        lines: &mut LineCursor<'_>,
        _ctx: &mut ParseContext<'_>,
    ) -> Option<Vec<Element>> {
        let line = lines.advance()?;
        log::debug!("Suppressed raw HTML line: {line}");
        Some(Vec::new())
    }
}
