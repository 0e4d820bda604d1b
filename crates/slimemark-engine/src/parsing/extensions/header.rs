use super::{BlockExtension, ParseContext};
use crate::models::Element;
use crate::parsing::cursor::LineCursor;

/// ATX-style headers: `#` through `######`.
pub struct Header;

impl Header {
    pub const PREFIX: char = '#';
    pub const MAX_LEVEL: usize = 6;

    /// Builds the header element for a single line.
    ///
    /// The level is the number of leading `#` after indentation, clamped to six.
    pub fn parse_line(line: &str) -> Element {
        let trimmed = line.trim_start();
        let level = trimmed.chars().take_while(|&c| c == Self::PREFIX).count();
        let content = trimmed[level..].trim();
        Element::new(format!("h{}", level.min(Self::MAX_LEVEL)), content)
    }
}

impl BlockExtension for Header {
    fn name(&self) -> &'static str {
        "header"
    }

    fn can_parse(&self, line: &str) -> bool {
        line.trim_start().starts_with(Self::PREFIX)
    }

    fn parse_block(
        &self,
        lines: &mut LineCursor<'_>,
        _ctx: &mut ParseContext<'_>,
    ) -> Option<Vec<Element>> {
        let line = lines.advance()?;
        Some(vec![Self::parse_line(line)])
    }
}
