//! HTML → SlimeMark conversion.
//!
//! Recognizes the block shapes [`HtmlRenderer`](super::HtmlRenderer) emits and
//! writes them back as markup. Anything unrecognized loses its tags and keeps
//! its text.

use std::path::Path;
use std::sync::OnceLock;

use anyhow::Context;
use regex::{Captures, Regex};

use crate::io;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConverterSettings {
    /// Separate blocks with a blank line instead of a single newline.
    pub add_extra_new_lines: bool,
}

#[derive(Debug, Clone, Default)]
pub struct HtmlToMarkupConverter {
    settings: ConverterSettings,
}

fn block_regex() -> &'static Regex {
    static BLOCK: OnceLock<Regex> = OnceLock::new();
    BLOCK.get_or_init(|| {
        Regex::new(concat!(
            r"(?is)<h(?P<level>[1-6])(?:\s[^>]*)?>(?P<heading>.*?)</h[1-6]\s*>",
            r"|<pre(?:\s[^>]*)?>(?P<pre>.*?)</pre\s*>",
            r"|<table(?:\s[^>]*)?>(?P<table>.*?)</table\s*>",
            r"|<ul(?:\s[^>]*)?>(?P<list>.*?)</ul\s*>",
            r"|<blockquote(?:\s[^>]*)?>(?P<quote>.*?)</blockquote\s*>",
            r"|<p(?:\s[^>]*)?>(?P<para>.*?)</p\s*>",
            r"|<img\b(?P<img>[^>]*)>",
            r"|<hr\b[^>]*>",
            r"|<link\b(?P<link>[^>]*)>",
            r"|<script\b(?P<script>[^>]*)>\s*</script\s*>",
        ))
        .expect("Invalid block regex")
    })
}

fn row_regex() -> &'static Regex {
    static ROW: OnceLock<Regex> = OnceLock::new();
    ROW.get_or_init(|| Regex::new(r"(?is)<tr(?:\s[^>]*)?>(.*?)</tr\s*>").expect("Invalid row regex"))
}

fn cell_regex() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    CELL.get_or_init(|| {
        Regex::new(r"(?is)<t[dh](?:\s[^>]*)?>(.*?)</t[dh]\s*>").expect("Invalid cell regex")
    })
}

fn item_regex() -> &'static Regex {
    static ITEM: OnceLock<Regex> = OnceLock::new();
    ITEM.get_or_init(|| Regex::new(r"(?is)<li(?:\s[^>]*)?>(.*?)</li\s*>").expect("Invalid item regex"))
}

fn attribute_regex() -> &'static Regex {
    static ATTR: OnceLock<Regex> = OnceLock::new();
    ATTR.get_or_init(|| {
        Regex::new(r#"(?i)([a-z][a-z0-9-]*)\s*=\s*"([^"]*)""#).expect("Invalid attribute regex")
    })
}

fn anchor_regex() -> &'static Regex {
    static ANCHOR: OnceLock<Regex> = OnceLock::new();
    ANCHOR.get_or_init(|| {
        Regex::new(r"(?is)<a\b([^>]*)>(.*?)</a\s*>").expect("Invalid anchor regex")
    })
}

/// Inline tag pairs and the markers they turn back into.
fn inline_rules() -> &'static [(Regex, &'static str)] {
    static RULES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    RULES.get_or_init(|| {
        [
            (r"(?is)<(?:strong|b)(?:\s[^>]*)?>(.*?)</(?:strong|b)\s*>", "**$1**"),
            (r"(?is)<(?:em|i)(?:\s[^>]*)?>(.*?)</(?:em|i)\s*>", "*$1*"),
            (r"(?is)<(?:s|del|strike)(?:\s[^>]*)?>(.*?)</(?:s|del|strike)\s*>", "~~$1~~"),
            (r"(?is)<u(?:\s[^>]*)?>(.*?)</u\s*>", "++$1++"),
            (r"(?i)<br\s*/?>", " "),
        ]
        .into_iter()
        .map(|(pattern, replacement)| {
            (
                Regex::new(pattern).expect("Invalid inline tag regex"),
                replacement,
            )
        })
        .collect()
    })
}

fn tag_regex() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"(?s)<[^>]*>").expect("Invalid tag regex"))
}

fn attribute<'a>(attrs: &'a str, name: &str) -> Option<&'a str> {
    attribute_regex()
        .captures_iter(attrs)
        .find(|caps| caps[1].eq_ignore_ascii_case(name))
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str())
}

/// Inline HTML → inline markup on a single line.
fn inline(html: &str) -> String {
    let mut text = anchor_regex()
        .replace_all(html, |caps: &Captures| {
            let href = attribute(&caps[1], "href").unwrap_or_default();
            format!("[{}]({href})", caps[2].trim())
        })
        .into_owned();
    for (re, replacement) in inline_rules() {
        text = re.replace_all(&text, *replacement).into_owned();
    }
    let stripped = tag_regex().replace_all(&text, "");
    let decoded = html_escape::decode_html_entities(&stripped);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl HtmlToMarkupConverter {
    pub fn new(settings: ConverterSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> ConverterSettings {
        self.settings
    }

    pub fn convert(&self, html: &str) -> String {
        let mut blocks = Vec::new();
        let mut last = 0;

        for caps in block_regex().captures_iter(html) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            push_loose_text(&html[last..whole.start()], &mut blocks);
            last = whole.end();
            if let Some(block) = convert_block(&caps) {
                blocks.push(block);
            }
        }
        push_loose_text(&html[last..], &mut blocks);

        if blocks.is_empty() {
            return String::new();
        }
        let separator = if self.settings.add_extra_new_lines {
            "\n\n"
        } else {
            "\n"
        };
        let mut markup = blocks.join(separator);
        markup.push('\n');
        markup
    }

    pub fn convert_to_file(&self, html: &str, path: &Path) -> anyhow::Result<()> {
        let markup = self.convert(html);
        io::write_file(path, &markup)
            .with_context(|| format!("Failed to write markup to {}", path.display()))?;
        log::info!("Wrote markup to {}", path.display());
        Ok(())
    }
}

fn push_loose_text(html: &str, blocks: &mut Vec<String>) {
    let text = inline(html);
    if !text.is_empty() {
        blocks.push(text);
    }
}

fn convert_block(caps: &Captures) -> Option<String> {
    if let Some(heading) = caps.name("heading") {
        let level: usize = caps["level"].parse().unwrap_or(1);
        return Some(format!("{} {}", "#".repeat(level), inline(heading.as_str())));
    }
    if let Some(pre) = caps.name("pre") {
        let code = html_escape::decode_html_entities(pre.as_str());
        return Some(format!("```\n{}\n```", code.trim_matches('\n')));
    }
    if let Some(table) = caps.name("table") {
        return non_empty(table_rows(table.as_str()));
    }
    if let Some(list) = caps.name("list") {
        let items: Vec<String> = item_regex()
            .captures_iter(list.as_str())
            .map(|item| format!("- {}", inline(&item[1])))
            .collect();
        return non_empty(items);
    }
    if let Some(quote) = caps.name("quote") {
        return Some(format!("> {}", inline(quote.as_str())));
    }
    if let Some(para) = caps.name("para") {
        return Some(inline(para.as_str())).filter(|text| !text.is_empty());
    }
    if let Some(img) = caps.name("img") {
        let attrs = img.as_str();
        let src = attribute(attrs, "src").unwrap_or_default();
        let alt = attribute(attrs, "alt").unwrap_or_default();
        return Some(format!("![{alt}]({src})"));
    }
    if let Some(link) = caps.name("link") {
        let attrs = link.as_str();
        let stylesheet = attribute(attrs, "rel").is_some_and(|rel| rel.contains("stylesheet"));
        return attribute(attrs, "href")
            .filter(|_| stylesheet)
            .map(|href| format!("<!--include style: {href} -->"));
    }
    if let Some(script) = caps.name("script") {
        return attribute(script.as_str(), "src")
            .map(|src| format!("<!--include script: {src} -->"));
    }
    Some("---".to_string())
}

fn table_rows(table: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for (index, row) in row_regex().captures_iter(table).enumerate() {
        let cells: Vec<String> = cell_regex()
            .captures_iter(&row[1])
            .map(|cell| inline(&cell[1]))
            .collect();
        lines.push(format!("| {} |", cells.join(" | ")));
        if index == 0 {
            let separator = vec!["---"; cells.len().max(1)];
            lines.push(format!("| {} |", separator.join(" | ")));
        }
    }
    lines
}

fn non_empty(lines: Vec<String>) -> Option<String> {
    (!lines.is_empty()).then(|| lines.join("\n"))
}
