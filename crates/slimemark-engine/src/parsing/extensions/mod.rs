//! # Block Extensions
//!
//! Every piece of SlimeMark syntax is handled by a [`BlockExtension`]. The
//! engine walks the registered extensions in ascending [`order`] for each
//! head line and hands the cursor to the first one whose [`can_parse`]
//! accepts it.
//!
//! ## Modules
//!
//! - **`header`**, **`image`**, **`link`**, **`list`**, **`table`**,
//!   **`block_quote`**, **`code_fence`**, **`horizontal_rule`**,
//!   **`inline_style`**: the dialect surface
//! - **`html_ignore`**: suppresses raw HTML lines
//! - **`include`**: stylesheet, script and nested raw include directives
//! - **`attributes`**: `{key=value ...}` suffix shared by images and links
//!
//! [`order`]: BlockExtension::order
//! [`can_parse`]: BlockExtension::can_parse

pub mod attributes;
pub mod block_quote;
pub mod code_fence;
pub mod header;
pub mod horizontal_rule;
pub mod html_ignore;
pub mod image;
pub mod include;
pub mod inline_style;
pub mod link;
pub mod list;
pub mod table;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::cursor::LineCursor;
use super::preprocess::IncludeError;
use crate::models::Element;

pub use block_quote::BlockQuote;
pub use code_fence::CodeFence;
pub use header::Header;
pub use horizontal_rule::HorizontalRule;
pub use html_ignore::HtmlIgnore;
pub use image::Image;
pub use include::{IncludeRaw, IncludeScript, IncludeStyle};
pub use inline_style::InlineStyle;
pub use link::Link;
pub use list::List;
pub use table::Table;

/// Rank used by ordinary syntax handlers.
pub const DEFAULT_ORDER: i32 = 2;

/// Per-parse state handed to extensions.
#[derive(Debug, Default)]
pub struct ParseContext<'p> {
    base_dir: Option<&'p Path>,
    diagnostics: Vec<IncludeError>,
}

impl<'p> ParseContext<'p> {
    pub fn new(base_dir: Option<&'p Path>) -> Self {
        Self {
            base_dir,
            diagnostics: Vec::new(),
        }
    }

    /// Directory that relative include paths resolve against.
    pub fn base_dir(&self) -> Option<&'p Path> {
        self.base_dir
    }

    pub fn report(&mut self, err: IncludeError) {
        log::warn!("{err}");
        self.diagnostics.push(err);
    }

    pub fn into_diagnostics(self) -> Vec<IncludeError> {
        self.diagnostics
    }
}

/// A syntax handler that claims one or more lines at the head of the cursor.
pub trait BlockExtension: Send + Sync {
    /// Stable identifier, used as the key of the per-parse counts.
    fn name(&self) -> &'static str;

    /// Dispatch rank; lower ranks are probed first.
    fn order(&self) -> i32 {
        DEFAULT_ORDER
    }

    /// Whether a block can start at `line`. Must not depend on anything but `line`.
    fn can_parse(&self, line: &str) -> bool;

    /// Consumes the block starting at the head of `lines`.
    ///
    /// Called only when `can_parse` accepted the head line. Must consume at
    /// least one line when returning `Some`. Returning `None` hands the head
    /// back to the remaining extensions; the engine rewinds anything consumed.
    fn parse_block(
        &self,
        lines: &mut LineCursor<'_>,
        ctx: &mut ParseContext<'_>,
    ) -> Option<Vec<Element>>;
}

impl fmt::Debug for dyn BlockExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockExtension")
            .field("name", &self.name())
            .field("order", &self.order())
            .finish()
    }
}

/// Extensions sorted once by ascending order.
///
/// The sort is stable, so extensions sharing an order keep their registration
/// sequence.
#[derive(Debug, Default)]
pub struct ExtensionRegistry {
    extensions: Vec<Box<dyn BlockExtension>>,
}

impl ExtensionRegistry {
    pub fn new(mut extensions: Vec<Box<dyn BlockExtension>>) -> Self {
        extensions.sort_by_key(|ext| ext.order());
        Self { extensions }
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn BlockExtension> {
        self.extensions.iter().map(|ext| ext.as_ref())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.iter().map(|ext| ext.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

impl FromIterator<Box<dyn BlockExtension>> for ExtensionRegistry {
    fn from_iter<I: IntoIterator<Item = Box<dyn BlockExtension>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A named extension set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// The full SlimeMark surface, include directives included.
    #[default]
    Slime,
    /// Obsidian-flavoured subset: bold/italic only, no escapes, no includes.
    Obsidian,
}

impl Dialect {
    pub fn extensions(self) -> Vec<Box<dyn BlockExtension>> {
        match self {
            Dialect::Slime => vec![
                Box::new(Header),
                Box::new(Image),
                Box::new(Table),
                Box::new(HorizontalRule),
                Box::new(List),
                Box::new(CodeFence),
                Box::new(BlockQuote),
                Box::new(InlineStyle::slime()),
                Box::new(Link::slime()),
                Box::new(IncludeStyle),
                Box::new(IncludeScript),
                Box::new(IncludeRaw),
                Box::new(HtmlIgnore::allowing_includes()),
            ],
            Dialect::Obsidian => vec![
                Box::new(Header),
                Box::new(Image),
                Box::new(Table),
                Box::new(HorizontalRule),
                Box::new(List),
                Box::new(CodeFence),
                Box::new(BlockQuote),
                Box::new(InlineStyle::obsidian()),
                Box::new(Link::obsidian()),
                Box::new(HtmlIgnore::suppressing_all()),
            ],
        }
    }

    pub fn registry(self) -> ExtensionRegistry {
        ExtensionRegistry::new(self.extensions())
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Slime => f.write_str("slime"),
            Dialect::Obsidian => f.write_str("obsidian"),
        }
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "slime" => Ok(Dialect::Slime),
            "obsidian" => Ok(Dialect::Obsidian),
            other => Err(format!("unknown dialect '{other}' (expected slime or obsidian)")),
        }
    }
}
