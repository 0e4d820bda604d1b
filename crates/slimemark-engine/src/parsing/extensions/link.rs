use std::sync::OnceLock;

use regex::Regex;

use super::{BlockExtension, ParseContext, attributes};
use crate::models::Element;
use crate::parsing::cursor::LineCursor;

/// `[text](href){key=value ...}` anywhere on a line.
///
/// A line holding nothing but one link becomes a bare anchor; otherwise the
/// links are substituted in place and the line becomes a paragraph.
pub struct Link {
    honor_escape: bool,
}

fn link_regex() -> &'static Regex {
    static LINK: OnceLock<Regex> = OnceLock::new();
    LINK.get_or_init(|| {
        Regex::new(r"\[([^\]]*)\]\(([^)]*)\)(?:\{([^}]*)\})?").expect("Invalid link regex")
    })
}

impl Link {
    /// A leading `\` disables link matching for the line.
    pub fn slime() -> Self {
        Self { honor_escape: true }
    }

    pub fn obsidian() -> Self {
        Self {
            honor_escape: false,
        }
    }

    /// Replaces every link in `line` with an anchor. Image syntax (`![..](..)`) is left alone.
    pub fn replace_links(line: &str) -> String {
        let mut out = String::with_capacity(line.len());
        let mut last = 0;
        for caps in link_regex().captures_iter(line) {
            let Some(m) = caps.get(0) else { continue };
            out.push_str(&line[last..m.start()]);
            if line[..m.start()].ends_with('!') {
                out.push_str(m.as_str());
            } else {
                let attrs = caps
                    .get(3)
                    .map_or_else(String::new, |a| attributes::render_pairs(a.as_str()));
                out.push_str(&format!("<a href=\"{}\"{attrs}>{}</a>", &caps[2], &caps[1]));
            }
            last = m.end();
        }
        out.push_str(&line[last..]);
        out
    }

    fn is_whole_line(line: &str) -> bool {
        let trimmed = line.trim();
        link_regex()
            .find(trimmed)
            .is_some_and(|m| m.start() == 0 && m.end() == trimmed.len())
    }
}

impl BlockExtension for Link {
    fn name(&self) -> &'static str {
        "link"
    }

    fn can_parse(&self, line: &str) -> bool {
        if self.honor_escape && line.starts_with('\\') {
            return false;
        }
        link_regex().is_match(line)
    }

    fn parse_block(
        &self,
        lines: &mut LineCursor<'_>,
        _ctx: &mut ParseContext<'_>,
    ) -> Option<Vec<Element>> {
        let line = lines.advance()?;
        let element = if Self::is_whole_line(line) {
            Element::new("link", Self::replace_links(line.trim()))
        } else {
            Element::paragraph(Self::replace_links(line))
        };
        Some(vec![element])
    }
}
