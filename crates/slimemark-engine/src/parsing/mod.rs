//! # Parsing
//!
//! Turns SlimeMark text into a flat list of [`Element`]s.
//!
//! ## Phases
//!
//! 1. **Front matter** (`front_matter`): a leading `---` YAML block is cut off
//! 2. **Preprocessing** (`preprocess`): `<!--include: path -->` lines are
//!    replaced by file contents, blank lines outside fences are dropped
//! 3. **Dispatch** ([`MarkupParser`]): for each head line the registered
//!    extensions are probed in ascending order; the first that accepts the
//!    line consumes its block. Unclaimed lines become paragraphs.
//!
//! ## Key Invariants
//!
//! - Every dispatch step consumes at least one line, so parsing terminates
//! - Elements are flat: no extension produces children
//! - Counts and diagnostics belong to a single parse, never to the parser

pub mod cursor;
pub mod extensions;
pub mod front_matter;
pub mod preprocess;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::path::Path;

use crate::models::Element;
use crate::properties::{self, PropertiesError};

pub use cursor::LineCursor;
pub use extensions::{BlockExtension, Dialect, ExtensionRegistry, ParseContext};
pub use preprocess::{IncludeError, Preprocessed, Preprocessor};

/// Lines starting with this key open an embedded properties block that is skipped.
pub const DOCUMENT_PROPERTIES_KEY: &str = "document_properties:";

/// Key under which preprocessor expansions are counted.
pub const PREPROCESSOR_COUNT: &str = "preprocessor";

/// Everything a single parse produced.
#[derive(Debug, Default)]
pub struct ParseOutcome {
    pub elements: Vec<Element>,
    /// Include failures: those of the preprocessor pass first, then those met
    /// during dispatch, each group in document order.
    pub diagnostics: Vec<IncludeError>,
    /// Successful matches per extension name, plus preprocessor expansions.
    pub counts: BTreeMap<&'static str, usize>,
}

impl ParseOutcome {
    pub fn count(&self, name: &str) -> usize {
        self.counts.get(name).copied().unwrap_or(0)
    }
}

/// The block-parsing engine.
#[derive(Debug)]
pub struct MarkupParser {
    registry: ExtensionRegistry,
    preprocessor: Preprocessor,
}

impl MarkupParser {
    pub fn new(extensions: Vec<Box<dyn BlockExtension>>) -> Self {
        Self {
            registry: ExtensionRegistry::new(extensions),
            preprocessor: Preprocessor::new(),
        }
    }

    pub fn for_dialect(dialect: Dialect) -> Self {
        Self::new(dialect.extensions())
    }

    /// Uses `preprocessor` for include expansion; its base directory also
    /// applies to include extensions.
    pub fn with_preprocessor(mut self, preprocessor: Preprocessor) -> Self {
        self.preprocessor = preprocessor;
        self
    }

    pub fn registry(&self) -> &ExtensionRegistry {
        &self.registry
    }

    /// Parses a whole document: front matter, includes, then block dispatch.
    pub fn parse(&self, text: &str) -> ParseOutcome {
        let body = front_matter::strip(text);
        let pre = self.preprocessor.run(body);
        let lines = LineCursor::split_lines(&pre.text);

        let mut outcome = self.parse_lines(&lines);
        if pre.expanded > 0 {
            outcome.counts.insert(PREPROCESSOR_COUNT, pre.expanded);
        }
        let mut diagnostics = pre.errors;
        diagnostics.append(&mut outcome.diagnostics);
        outcome.diagnostics = diagnostics;
        outcome
    }

    /// Saves the front-matter properties to `properties_path` (when given and
    /// present), then parses the document.
    pub fn parse_with_properties(
        &self,
        text: &str,
        properties_path: Option<&Path>,
    ) -> Result<ParseOutcome, PropertiesError> {
        if let Some(path) = properties_path
            && let Some(props) = properties::load(text)
        {
            properties::save_to_file(path, &props)?;
        }
        Ok(self.parse(text))
    }

    /// Runs block dispatch over already preprocessed lines.
    pub fn parse_lines(&self, lines: &[String]) -> ParseOutcome {
        let mut cursor = LineCursor::new(lines);
        let mut ctx = ParseContext::new(self.preprocessor.base_dir());
        let mut elements = Vec::new();
        let mut counts = BTreeMap::new();

        while let Some(line) = cursor.peek() {
            if line.trim().is_empty() {
                cursor.advance();
                continue;
            }

            if line.starts_with(DOCUMENT_PROPERTIES_KEY) {
                cursor.advance();
                cursor.advance_while(|next| !next.trim().is_empty() && starts_with_indent(next));
                continue;
            }

            match self.dispatch(&mut cursor, &mut ctx) {
                Some((name, mut produced)) => {
                    *counts.entry(name).or_insert(0) += 1;
                    elements.append(&mut produced);
                }
                None => {
                    cursor.advance();
                    elements.push(Element::paragraph(line));
                }
            }
        }

        ParseOutcome {
            elements,
            diagnostics: ctx.into_diagnostics(),
            counts,
        }
    }

    /// Offers the head line to each extension in order; returns the name of
    /// the one that claimed it together with its elements.
    fn dispatch(
        &self,
        cursor: &mut LineCursor<'_>,
        ctx: &mut ParseContext<'_>,
    ) -> Option<(&'static str, Vec<Element>)> {
        let head = cursor.peek()?;
        let start = cursor.position();

        for ext in self.registry.iter() {
            if !ext.can_parse(head) {
                continue;
            }
            match ext.parse_block(cursor, ctx) {
                Some(produced) => {
                    if cursor.position() == start {
                        log::warn!(
                            "Extension '{}' claimed line {} without consuming it",
                            ext.name(),
                            start + 1
                        );
                        cursor.advance();
                    }
                    log::debug!(
                        "Line {}: '{}' produced {} element(s)",
                        start + 1,
                        ext.name(),
                        produced.len()
                    );
                    return Some((ext.name(), produced));
                }
                None => cursor.rewind(start),
            }
        }

        None
    }
}

impl Default for MarkupParser {
    fn default() -> Self {
        Self::for_dialect(Dialect::default())
    }
}

fn starts_with_indent(line: &str) -> bool {
    line.starts_with([' ', '\t'])
}
