use super::{BlockExtension, ParseContext};
use crate::models::Element;
use crate::parsing::cursor::LineCursor;

/// Unordered list: consecutive `- item` lines become one `<ul>`.
pub struct List;

impl List {
    pub const MARKER: &'static str = "- ";

    fn item(line: &str) -> Option<&str> {
        line.trim_start().strip_prefix(Self::MARKER)
    }
}

impl BlockExtension for List {
    fn name(&self) -> &'static str {
        "list"
    }

    fn can_parse(&self, line: &str) -> bool {
        Self::item(line).is_some()
    }

    fn parse_block(
        &self,
        lines: &mut LineCursor<'_>,
        _ctx: &mut ParseContext<'_>,
    ) -> Option<Vec<Element>> {
        let items: Vec<&str> = lines
            .advance_while(|line| !line.trim().is_empty() && Self::item(line).is_some())
            .into_iter()
            .filter_map(Self::item)
            .collect();
        if items.is_empty() {
            return None;
        }

        let html: String = items.iter().map(|item| format!("<li>{item}</li>")).collect();
        Some(vec![Element::new("ul", html)])
    }
}
