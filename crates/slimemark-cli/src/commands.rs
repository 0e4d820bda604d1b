use anyhow::{Context, Result};
use slimemark_config::Config;
use slimemark_engine::{
    ConverterSettings, Dialect, DocumentProperties, HtmlRenderer, HtmlToMarkupConverter,
    MarkupParser, Preprocessor, io, properties,
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub struct RenderArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub properties: Option<PathBuf>,
    pub markup: Option<PathBuf>,
    pub dialect: Option<Dialect>,
}

/// What a render produced, for reporting.
pub struct RenderReport {
    pub html: String,
    pub properties: Option<DocumentProperties>,
    pub counts: BTreeMap<&'static str, usize>,
    pub include_errors: usize,
}

impl RenderReport {
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();
        if let Some(props) = &self.properties {
            if let Some(filename) = &props.filename {
                lines.push(format!("Filename: {filename}"));
            }
            if let Some(author) = &props.author {
                lines.push(format!("Author: {author}"));
            }
        }
        for (name, count) in &self.counts {
            lines.push(format!("{name}: {count}"));
        }
        if self.include_errors > 0 {
            lines.push(format!("include errors: {}", self.include_errors));
        }
        lines.join("\n")
    }
}

pub fn render(args: &RenderArgs, config: &Config) -> Result<RenderReport> {
    let text = io::read_file(&args.input)?;
    let dialect = args.dialect.unwrap_or(config.dialect);
    let base_dir = config
        .include_base
        .clone()
        .or_else(|| parent_dir(&args.input));
    log::info!("Rendering {} as {dialect}", args.input.display());

    let mut parser = MarkupParser::for_dialect(dialect);
    if let Some(dir) = base_dir {
        parser = parser.with_preprocessor(Preprocessor::with_base_dir(dir));
    }

    let properties_path = args.properties.as_ref().or(config.properties_path.as_ref());
    let outcome = parser
        .parse_with_properties(&text, properties_path.map(PathBuf::as_path))
        .context("Failed to save document properties")?;
    let html = HtmlRenderer.render(&outcome.elements);

    if let Some(path) = &args.output {
        io::write_file(path, &html)
            .with_context(|| format!("Failed to write HTML to {}", path.display()))?;
        log::info!("Wrote HTML to {}", path.display());
    }
    if let Some(path) = &args.markup {
        converter(config).convert_to_file(&html, path)?;
    }

    Ok(RenderReport {
        html,
        properties: properties::load(&text),
        counts: outcome.counts,
        include_errors: outcome.diagnostics.len(),
    })
}

/// Converts an HTML file back to markup.
pub fn reverse(input: &Path, output: Option<&Path>, config: &Config) -> Result<String> {
    let html = io::read_file(input)?;
    let converter = converter(config);
    match output {
        Some(path) => {
            converter.convert_to_file(&html, path)?;
            Ok(String::new())
        }
        None => Ok(converter.convert(&html)),
    }
}

fn converter(config: &Config) -> HtmlToMarkupConverter {
    HtmlToMarkupConverter::new(ConverterSettings {
        add_extra_new_lines: config.add_extra_new_lines,
    })
}

fn parent_dir(path: &Path) -> Option<PathBuf> {
    path.parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
}
