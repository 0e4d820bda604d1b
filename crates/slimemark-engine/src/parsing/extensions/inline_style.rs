use std::sync::OnceLock;

use regex::Regex;

use super::{BlockExtension, Link, ParseContext};
use crate::models::Element;
use crate::parsing::cursor::LineCursor;

/// Paragraph with inline emphasis markers.
///
/// `**bold**`, `*italic*`, and in the extended set `~~strike~~` and
/// `++underline++`. Markers are replaced in that order, so `**` always wins
/// over `*`. Links on the line are substituted before styling, so a styled
/// line still gets its anchors.
pub struct InlineStyle {
    extended: bool,
    honor_escape: bool,
}

struct StyleRule {
    pattern: &'static str,
    replacement: &'static str,
}

const BASIC_RULES: &[StyleRule] = &[
    StyleRule {
        pattern: r"\*\*(.+?)\*\*",
        replacement: "<strong>$1</strong>",
    },
    StyleRule {
        pattern: r"\*(.+?)\*",
        replacement: "<em>$1</em>",
    },
];

const EXTENDED_RULES: &[StyleRule] = &[
    StyleRule {
        pattern: r"~~(.+?)~~",
        replacement: "<s>$1</s>",
    },
    StyleRule {
        pattern: r"\+\+(.+?)\+\+",
        replacement: "<u>$1</u>",
    },
];

fn compiled(rules: &'static [StyleRule]) -> Vec<(Regex, &'static str)> {
    rules
        .iter()
        .map(|rule| {
            (
                Regex::new(rule.pattern).expect("Invalid inline style regex"),
                rule.replacement,
            )
        })
        .collect()
}

fn basic_rules() -> &'static [(Regex, &'static str)] {
    static BASIC: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    BASIC.get_or_init(|| compiled(BASIC_RULES))
}

fn extended_rules() -> &'static [(Regex, &'static str)] {
    static EXTENDED: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    EXTENDED.get_or_init(|| compiled(EXTENDED_RULES))
}

impl InlineStyle {
    /// Bold, italic, strike and underline; a leading `\` disables styling.
    pub fn slime() -> Self {
        Self {
            extended: true,
            honor_escape: true,
        }
    }

    /// Bold and italic only, no escape.
    pub fn obsidian() -> Self {
        Self {
            extended: false,
            honor_escape: false,
        }
    }

    pub fn apply(&self, input: &str) -> String {
        let mut result = input.to_string();
        let rules = basic_rules()
            .iter()
            .chain(if self.extended { extended_rules() } else { &[] });
        for (re, replacement) in rules {
            result = re.replace_all(&result, *replacement).into_owned();
        }
        result
    }

    fn has_marker(&self, line: &str) -> bool {
        line.contains('*') || (self.extended && (line.contains('~') || line.contains('+')))
    }
}

impl BlockExtension for InlineStyle {
    fn name(&self) -> &'static str {
        "inline-style"
    }

    fn can_parse(&self, line: &str) -> bool {
        if self.honor_escape && line.starts_with('\\') {
            return false;
        }
        self.has_marker(line)
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
        let linked = Link::replace_links(line);
        Some(vec![Element::paragraph(self.apply(&linked))])
    }
}
