use super::{BlockExtension, ParseContext};
use crate::models::Element;
use crate::parsing::cursor::LineCursor;

/// Fenced code: a line that is exactly ```` ``` ```` opens and closes the block.
///
/// Interior lines are raw: no block or inline syntax applies inside.
pub struct CodeFence;

impl CodeFence {
    pub const BACKTICKS: &'static str = "```";

    pub fn is_marker(line: &str) -> bool {
        line.trim() == Self::BACKTICKS
    }
}

impl BlockExtension for CodeFence {
    fn name(&self) -> &'static str {
        "code-fence"
    }

    fn can_parse(&self, line: &str) -> bool {
        Self::is_marker(line)
    }

    fn parse_block(
        &self,
        lines: &mut LineCursor<'_>,
        _ctx: &mut ParseContext<'_>,
    ) -> Option<Vec<Element>> {
        lines.advance()?;
        let code = lines.advance_while(|line| !Self::is_marker(line)).join("\n");
        // An unterminated fence runs to the end of the document.
        lines.advance();
        Some(vec![Element::new("pre", code)])
    }
}
