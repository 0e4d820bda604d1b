//! Integration tests for the parsing module.
//!
//! Fixtures (.sm) live in `fixtures/`; their normalized output is kept as
//! inline snapshots next to each test.


use std::path::Path;

use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::TempDir;

use crate::models::Element;
use crate::parsing::{
    BlockExtension, Dialect, IncludeError, LineCursor, MarkupParser, ParseContext, ParseOutcome,
    Preprocessor,
};

fn parse_fixture(name: &str) -> ParseOutcome {
    let _ = env_logger::builder().is_test(true).try_init();
    let path = format!(
        "{}/src/parsing/tests/fixtures/{name}.sm",
        env!("CARGO_MANIFEST_DIR")
    );
    let text = std::fs::read_to_string(path).unwrap();
    let outcome = MarkupParser::default().parse(&text);
    invariants::check(&outcome, text.lines().count());
    outcome
}

// Fixture-based snapshot tests

#[test]
fn fixture_basic() {
    let outcome = parse_fixture("basic");
    insta::assert_snapshot!(normalize::normalize(&outcome.elements), @r"
    h1 | Title
    p | Some plain text
    h2 | Sub heading
    ul | <li>one</li><li>two</li>
    blockquote | quoted and continued
    ");
    assert_eq!(
        normalize::counts(&outcome),
        "blockquote=1 header=2 list=1"
    );
}

#[test]
fn fixture_code_fence() {
    let outcome = parse_fixture("code_fence");
    insta::assert_snapshot!(normalize::normalize(&outcome.elements), @r"
    p | Before
    pre |   indented **not-bold**\n\nlast line
    p | After
    ");
}

#[test]
fn fixture_table() {
    let outcome = parse_fixture("table");
    assert_eq!(
        outcome.elements,
        vec![Element::new(
            "table",
            "<table><tr><td>a</td><td>b</td></tr><tr><td>1</td><td>2</td></tr></table>"
        )]
    );
    assert_eq!(outcome.elements[0].content.matches("<tr>").count(), 2);
}

#[test]
fn fixture_front_matter() {
    let outcome = parse_fixture("front_matter");
    assert_eq!(outcome.elements, vec![Element::new("h1", "Hi")]);
}

#[test]
fn fixture_inline() {
    let outcome = parse_fixture("inline");
    insta::assert_snapshot!(normalize::normalize(&outcome.elements), @r#"
    p | <strong>bold</strong> and <em>it</em> with <s>gone</s> and <u>under</u>
    p | \**escaped**
    p | See <a href="https://example.com" target="_blank">docs</a> now
    link | <a href="/index.html">home</a>
    img | <img src="logo.png" alt="Logo" width="20" />
    raw | <hr/>
    p | visible
    "#);
    assert_eq!(
        normalize::counts(&outcome),
        "horizontal-rule=1 html-ignore=1 image=1 inline-style=1 link=2"
    );
}

// Engine behavior

#[rstest]
#[case("")]
#[case("\n\n\n")]
#[case("```")]
#[case("```\nnever closed\n# not a header")]
#[case("- \n-\n- x")]
#[case("|")]
#[case("> ")]
#[case("document_properties:")]
#[case("<")]
#[case("![")]
#[case("*")]
fn parsing_always_terminates(#[case] text: &str) {
    let outcome = MarkupParser::default().parse(text);
    invariants::check(&outcome, text.split('\n').count());
}

#[rstest]
#[case("Read the [C++ guide](g.html)", r#"Read the <a href="g.html">C++ guide</a>"#)]
#[case("1+1 is [math](m.html)", r#"1+1 is <a href="m.html">math</a>"#)]
#[case(
    "**Note**: see [docs](d.html)",
    r#"<strong>Note</strong>: see <a href="d.html">docs</a>"#
)]
fn links_survive_style_markers(#[case] line: &str, #[case] expected: &str) {
    let outcome = MarkupParser::default().parse(line);
    assert_eq!(outcome.elements, vec![Element::paragraph(expected)]);
    assert_eq!(outcome.count("inline-style"), 1);
}

#[test]
fn unclaimed_lines_become_paragraphs() {
    let outcome = MarkupParser::default().parse("just words\nmore words");
    assert_eq!(
        outcome.elements,
        vec![
            Element::paragraph("just words"),
            Element::paragraph("more words")
        ]
    );
    assert!(outcome.counts.is_empty());
}

#[rstest]
#[case("## Title", "h2", "Title")]
#[case("   ### Indented", "h3", "Indented")]
#[case("######## Deep", "h6", "Deep")]
fn header_levels(#[case] line: &str, #[case] tag: &str, #[case] content: &str) {
    let outcome = MarkupParser::default().parse(line);
    assert_eq!(outcome.elements, vec![Element::new(tag, content)]);
}

#[test]
fn properties_block_is_skipped_until_unindented_line() {
    let text = "document_properties:\n  title: x\n\tauthor: y\nBody";
    let outcome = MarkupParser::default().parse(text);
    assert_eq!(outcome.elements, vec![Element::paragraph("Body")]);
}

#[test]
fn counts_are_scoped_to_each_parse() {
    let parser = MarkupParser::default();
    let first = parser.parse("# A\n# B");
    let second = parser.parse("# C");
    assert_eq!(first.count("header"), 2);
    assert_eq!(second.count("header"), 1);
    assert_eq!(second.count("list"), 0);
}

/// Claims two lines, then changes its mind.
struct Greedy;

impl BlockExtension for Greedy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn order(&self) -> i32 {
        0
    }

    fn can_parse(&self, line: &str) -> bool {
        line.starts_with('#')
    }

    fn parse_block(
        &self,
        lines: &mut LineCursor<'_>,
        _ctx: &mut ParseContext<'_>,
    ) -> Option<Vec<Element>> {
        lines.advance();
        lines.advance();
        None
    }
}

/// Claims a line without consuming it.
struct Stuck;

impl BlockExtension for Stuck {
    fn name(&self) -> &'static str {
        "stuck"
    }

    fn can_parse(&self, line: &str) -> bool {
        line == "stuck"
    }

    fn parse_block(
        &self,
        _lines: &mut LineCursor<'_>,
        _ctx: &mut ParseContext<'_>,
    ) -> Option<Vec<Element>> {
        Some(vec![Element::new("em", "stuck")])
    }
}

#[test]
fn declined_claim_is_rewound_for_later_extensions() {
    let mut extensions = Dialect::Slime.extensions();
    extensions.push(Box::new(Greedy));
    let parser = MarkupParser::new(extensions);

    let outcome = parser.parse("# A\nnext");

    assert_eq!(
        outcome.elements,
        vec![Element::new("h1", "A"), Element::paragraph("next")]
    );
    assert_eq!(outcome.count("greedy"), 0);
}

#[test]
fn claim_without_progress_still_advances() {
    let parser = MarkupParser::new(vec![Box::new(Stuck)]);

    let outcome = parser.parse("stuck\nafter");

    assert_eq!(
        outcome.elements,
        vec![Element::new("em", "stuck"), Element::paragraph("after")]
    );
    assert_eq!(outcome.count("stuck"), 1);
}

#[test]
fn lower_order_wins() {
    struct Shout;
    impl BlockExtension for Shout {
        fn name(&self) -> &'static str {
            "shout"
        }
        fn order(&self) -> i32 {
            -1
        }
        fn can_parse(&self, line: &str) -> bool {
            line.starts_with('#')
        }
        fn parse_block(
            &self,
            lines: &mut LineCursor<'_>,
            _ctx: &mut ParseContext<'_>,
        ) -> Option<Vec<Element>> {
            let line = lines.advance()?;
            Some(vec![Element::new("strong", line.to_uppercase())])
        }
    }

    let mut extensions = Dialect::Slime.extensions();
    extensions.push(Box::new(Shout));
    let outcome = MarkupParser::new(extensions).parse("# quiet");

    assert_eq!(outcome.elements, vec![Element::new("strong", "# QUIET")]);
}

// Dialects

#[test]
fn obsidian_has_no_extended_styles_or_escape() {
    let parser = MarkupParser::for_dialect(Dialect::Obsidian);
    let outcome = parser.parse("~~kept~~ ++as is++\n\\**x**");
    insta::assert_snapshot!(normalize::normalize(&outcome.elements), @r"
    p | ~~kept~~ ++as is++
    p | \<strong>x</strong>
    ");
}

#[test]
fn obsidian_suppresses_reference_directives() {
    let parser = MarkupParser::for_dialect(Dialect::Obsidian);
    let outcome = parser.parse("<!--include style: a.css -->\ntext");
    assert_eq!(outcome.elements, vec![Element::paragraph("text")]);
    assert_eq!(outcome.count("html-ignore"), 1);
}

// Includes

fn parser_in(dir: &Path) -> MarkupParser {
    MarkupParser::default().with_preprocessor(Preprocessor::with_base_dir(dir))
}

#[test]
fn include_is_expanded_and_parsed() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("part.sm"), "## From part\n- x\n").unwrap();

    let outcome = parser_in(dir.path()).parse("# Main\n<!--include: part.sm -->\nafter");

    insta::assert_snapshot!(normalize::normalize(&outcome.elements), @r"
    h1 | Main
    h2 | From part
    ul | <li>x</li>
    p | after
    ");
    assert_eq!(outcome.count("preprocessor"), 1);
    assert_eq!(outcome.count("html-ignore"), 2);
    assert!(outcome.diagnostics.is_empty());
}

#[test]
fn missing_include_reports_and_continues() {
    let dir = TempDir::new().unwrap();
    let text = "# A\n<!--include: nope.sm -->\nafter";

    let outcome = parser_in(dir.path()).parse(text);

    assert_eq!(
        outcome.elements,
        vec![
            Element::new("h1", "A"),
            Element::paragraph("<!-- ERROR: File 'nope.sm' not found -->"),
            Element::paragraph("after"),
        ]
    );
    assert!(matches!(
        outcome.diagnostics.as_slice(),
        [IncludeError::NotFound(path)] if path == "nope.sm"
    ));
    assert_eq!(outcome.count("preprocessor"), 0);
    invariants::check(&outcome, 3);
}

#[test]
fn reference_includes_reach_their_extensions() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("site.css"), "").unwrap();

    let outcome =
        parser_in(dir.path()).parse("<!--include style: site.css -->\n<!--include script: gone.js -->");

    assert_eq!(outcome.elements.len(), 2);
    assert_eq!(outcome.elements[0].tag, "link");
    assert_eq!(
        outcome.elements[1],
        Element::paragraph("<!-- ERROR: File 'gone.js' not found -->")
    );
    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(outcome.count("include-style"), 1);
    assert_eq!(outcome.count("include-script"), 1);
}

#[test]
fn nested_include_is_inlined_raw() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.sm"), "<!--include: b.html -->\n").unwrap();
    std::fs::write(dir.path().join("b.html"), "<b>hi</b>").unwrap();

    let outcome = parser_in(dir.path()).parse("<!--include: a.sm -->");

    assert_eq!(
        outcome.elements,
        vec![Element::raw(
            "<!-- start of file :b.html -->\n<b>hi</b>\n<!-- end of file : b.html -->"
        )]
    );
    assert_eq!(outcome.count("include"), 1);
    assert_eq!(outcome.count("preprocessor"), 1);
    assert!(outcome.diagnostics.is_empty());
}

#[test]
fn preprocessor_failures_come_before_dispatch_failures() {
    let dir = TempDir::new().unwrap();
    let text = "<!--include style: first.css -->\n<!--include: second.sm -->";

    let outcome = parser_in(dir.path()).parse(text);

    let paths: Vec<&str> = outcome.diagnostics.iter().map(IncludeError::path).collect();
    assert_eq!(paths, vec!["second.sm", "first.css"]);
}

#[test]
fn directive_inside_fence_is_left_alone() {
    let text = "```\n<!--include: nope.sm -->\n```";
    let outcome = MarkupParser::default().parse(text);
    assert_eq!(
        outcome.elements,
        vec![Element::new("pre", "<!--include: nope.sm -->")]
    );
    assert!(outcome.diagnostics.is_empty());
}

// Properties

#[test]
fn parse_with_properties_saves_front_matter() {
    let dir = TempDir::new().unwrap();
    let props_path = dir.path().join("props.yaml");
    let text = "---\nauthor: Ada\nfilename: notes.docx\n---\n# Hi";

    let outcome = MarkupParser::default()
        .parse_with_properties(text, Some(&props_path))
        .unwrap();

    assert_eq!(outcome.elements, vec![Element::new("h1", "Hi")]);
    assert_eq!(
        std::fs::read_to_string(&props_path).unwrap(),
        "filename: notes.docx\nauthor: Ada\n"
    );
}

#[test]
fn parse_with_properties_without_front_matter_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let props_path = dir.path().join("props.yaml");

    MarkupParser::default()
        .parse_with_properties("# Hi", Some(&props_path))
        .unwrap();

    assert!(!props_path.exists());
}
