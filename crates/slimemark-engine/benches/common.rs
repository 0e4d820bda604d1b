// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markup_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with **bold** and *italic* content.\n\n- Bullet point\n- Another item\n\n| a | b |\n| --- | --- |\n| 1 | 2 |\n\n> A quoted line\n\nSee [the docs](https://example.com) for more.\n\n```\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_sectioned_markup(sections: usize, depth: usize) -> String {
    let mut content = String::new();

    for section in 0..sections {
        content.push_str(&format!("# Section {}\n\n", section));
        for level in 2..(2 + depth).min(7) {
            content.push_str(&format!(
                "{} Subsection Level {}\n\n",
                "#".repeat(level),
                level
            ));
            content.push_str("Some paragraph content with multiple sentences. This helps create realistic document structure for benchmarking.\n\n");
            for i in 0..3 {
                content.push_str(&format!("- Item {} at level {}\n", i, level));
            }
            content.push('\n');
        }
    }

    content
}
