use super::{BlockExtension, ParseContext};
use crate::models::Element;
use crate::parsing::cursor::LineCursor;

/// Blockquotes: consecutive `> ` lines joined with spaces.
///
/// Nesting is not recognised; `> > a` quotes the text `> a`.
pub struct BlockQuote;

impl BlockQuote {
    pub const PREFIX: &'static str = "> ";

    fn strip_prefix(line: &str) -> Option<&str> {
        line.trim_start().strip_prefix(Self::PREFIX)
    }
}

impl BlockExtension for BlockQuote {
    fn name(&self) -> &'static str {
        "blockquote"
    }

    fn can_parse(&self, line: &str) -> bool {
        Self::strip_prefix(line).is_some()
    }

    fn parse_block(
        &self,
        lines: &mut LineCursor<'_>,
        _ctx: &mut ParseContext<'_>,
    ) -> Option<Vec<Element>> {
        let content: Vec<&str> = lines
            .advance_while(|line| Self::strip_prefix(line).is_some())
            .into_iter()
            .filter_map(Self::strip_prefix)
            .collect();
        Some(vec![Element::new("blockquote", content.join(" "))])
    }
}
