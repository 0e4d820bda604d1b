//! Include directives reachable through normal dispatch.
//!
//! Stylesheet and script directives emit reference tags pointing at the
//! resolved file. Plain `<!--include: path -->` directives are normally
//! expanded by the preprocessor; [`IncludeRaw`] only sees the ones that arrive
//! through an included file and inlines them without further parsing.

use std::path::PathBuf;
use std::sync::OnceLock;

use regex::Regex;

use super::{BlockExtension, ParseContext};
use crate::models::Element;
use crate::parsing::cursor::LineCursor;
use crate::parsing::preprocess::{IncludeError, include_regex, read_include, resolve_path};

/// Rank shared by include handlers: after raw-HTML suppression, before syntax.
pub const INCLUDE_ORDER: i32 = 1;

fn style_regex() -> &'static Regex {
    static STYLE: OnceLock<Regex> = OnceLock::new();
    STYLE.get_or_init(|| {
        Regex::new(r"<!--\s*include style:\s*(.+?)\s*-->").expect("Invalid style include regex")
    })
}

fn script_regex() -> &'static Regex {
    static SCRIPT: OnceLock<Regex> = OnceLock::new();
    SCRIPT.get_or_init(|| {
        Regex::new(r"<!--\s*include script:\s*(.+?)\s*-->").expect("Invalid script include regex")
    })
}

fn directive_path<'l>(re: &Regex, line: &'l str) -> Option<&'l str> {
    re.captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// Resolves the target of a reference directive, reporting it if missing.
fn existing_target(input: &str, ctx: &mut ParseContext<'_>) -> Result<PathBuf, Element> {
    let full_path = resolve_path(input, ctx.base_dir());
    if full_path.exists() {
        return Ok(full_path);
    }
    let err = IncludeError::NotFound(input.to_string());
    let element = Element::paragraph(err.to_comment());
    ctx.report(err);
    Err(element)
}

/// `<!--include style: path -->` → `<link rel="stylesheet" href="..."/>`.
pub struct IncludeStyle;

impl BlockExtension for IncludeStyle {
    fn name(&self) -> &'static str {
        "include-style"
    }

    fn order(&self) -> i32 {
        INCLUDE_ORDER
    }

    fn can_parse(&self, line: &str) -> bool {
        style_regex().is_match(line)
    }

    fn parse_block(
        &self,
        lines: &mut LineCursor<'_>,
        ctx: &mut ParseContext<'_>,
    ) -> Option<Vec<Element>> {
        let input = directive_path(style_regex(), lines.peek()?)?;
        lines.advance();
        let element = match existing_target(input, ctx) {
            Ok(path) => Element::new(
                "link",
                format!("<link rel=\"stylesheet\" href=\"{}\"/>", path.display()),
            ),
            Err(element) => element,
        };
        Some(vec![element])
    }
}

/// `<!--include script: path -->` → `<script src="..."></script>`.
pub struct IncludeScript;

impl BlockExtension for IncludeScript {
    fn name(&self) -> &'static str {
        "include-script"
    }

    fn order(&self) -> i32 {
        INCLUDE_ORDER
    }

    fn can_parse(&self, line: &str) -> bool {
        script_regex().is_match(line)
    }

    fn parse_block(
        &self,
        lines: &mut LineCursor<'_>,
        ctx: &mut ParseContext<'_>,
    ) -> Option<Vec<Element>> {
        let input = directive_path(script_regex(), lines.peek()?)?;
        lines.advance();
        let element = match existing_target(input, ctx) {
            Ok(path) => Element::raw(format!("<script src=\"{}\"></script>", path.display())),
            Err(element) => element,
        };
        Some(vec![element])
    }
}

/// `<!--include: path -->` met during dispatch: the file is inlined as raw HTML.
pub struct IncludeRaw;

impl BlockExtension for IncludeRaw {
    fn name(&self) -> &'static str {
        "include"
    }

    fn order(&self) -> i32 {
        INCLUDE_ORDER
    }

    fn can_parse(&self, line: &str) -> bool {
        include_regex().is_match(line)
    }

    fn parse_block(
        &self,
        lines: &mut LineCursor<'_>,
        ctx: &mut ParseContext<'_>,
    ) -> Option<Vec<Element>> {
        let input = directive_path(include_regex(), lines.peek()?)?;
        lines.advance();
        let element = match read_include(input, ctx.base_dir()) {
            Ok(content) => Element::raw(content),
            Err(err) => {
                let element = Element::paragraph(err.to_comment());
                ctx.report(err);
                element
            }
        };
        Some(vec![element])
    }
}
