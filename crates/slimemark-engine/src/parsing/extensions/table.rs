use super::{BlockExtension, ParseContext};
use crate::models::Element;
use crate::parsing::cursor::LineCursor;

/// Pipe tables. Every row is a `<tr>` of `<td>` cells; separator rows are dropped.
pub struct Table;

impl Table {
    pub const PIPE: char = '|';

    fn is_row(line: &str) -> bool {
        line.trim_start().starts_with(Self::PIPE)
    }

    /// Splits a row into trimmed cells, ignoring the outer pipes.
    pub fn cells(line: &str) -> Vec<&str> {
        line.trim()
            .trim_matches(Self::PIPE)
            .split(Self::PIPE)
            .map(str::trim)
            .collect()
    }

    /// A row whose every cell consists only of `-` or `=`.
    pub fn is_separator(cells: &[&str]) -> bool {
        cells
            .iter()
            .all(|cell| cell.chars().all(|c| c == '-' || c == '='))
    }
}

impl BlockExtension for Table {
    fn name(&self) -> &'static str {
        "table"
    }

    fn can_parse(&self, line: &str) -> bool {
        Self::is_row(line)
    }

    fn parse_block(
        &self,
        lines: &mut LineCursor<'_>,
        _ctx: &mut ParseContext<'_>,
    ) -> Option<Vec<Element>> {
        let mut html = String::from("<table>");
        for line in lines.advance_while(Self::is_row) {
            let cells = Self::cells(line);
            if Self::is_separator(&cells) {
                continue;
            }
            html.push_str("<tr>");
            for cell in cells {
                html.push_str(&format!("<td>{cell}</td>"));
            }
            html.push_str("</tr>");
        }
        html.push_str("</table>");
        Some(vec![Element::new("table", html)])
    }
}
