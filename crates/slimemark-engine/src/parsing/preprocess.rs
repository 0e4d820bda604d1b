//! Include expansion pass that runs before block parsing.
//!
//! Every `<!--include: path -->` line is replaced by the verbatim contents of
//! the referenced file, wrapped in start/end marker comments. Blank lines are
//! dropped outside code fences; fenced lines pass through untouched.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use super::extensions::code_fence::CodeFence;

#[derive(Debug, thiserror::Error)]
pub enum IncludeError {
    #[error("File '{0}' not found")]
    NotFound(String),
    #[error("Could not read '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
}

impl IncludeError {
    /// The inline marker substituted for a failed directive.
    pub fn to_comment(&self) -> String {
        format!("<!-- ERROR: {self} -->")
    }

    /// The path as written in the directive.
    pub fn path(&self) -> &str {
        match self {
            IncludeError::NotFound(path) => path,
            IncludeError::Read { path, .. } => path,
        }
    }
}

/// Prefix shared by every inline include error marker.
pub const ERROR_MARKER: &str = "<!-- ERROR:";

pub(crate) fn include_regex() -> &'static Regex {
    static INCLUDE: OnceLock<Regex> = OnceLock::new();
    INCLUDE.get_or_init(|| Regex::new(r"<!--\s*include:\s*(.+?)\s*-->").expect("Invalid include regex"))
}

/// Resolves a directive path to an absolute path.
///
/// Relative paths are joined onto `base` when given, otherwise onto the
/// process working directory.
pub fn resolve_path(input: &str, base: Option<&Path>) -> PathBuf {
    let joined = match base {
        Some(base) => base.join(input),
        None => PathBuf::from(input),
    };
    std::path::absolute(&joined).unwrap_or(joined)
}

/// Reads an include target and wraps it in start/end marker comments.
pub fn read_include(input: &str, base: Option<&Path>) -> Result<String, IncludeError> {
    let full_path = resolve_path(input, base);
    if !full_path.exists() {
        return Err(IncludeError::NotFound(input.to_string()));
    }
    let content = std::fs::read_to_string(&full_path).map_err(|source| IncludeError::Read {
        path: input.to_string(),
        source,
    })?;
    Ok(format!(
        "<!-- start of file :{input} -->\n{content}\n<!-- end of file : {input} -->"
    ))
}

/// Result of a preprocessing pass.
#[derive(Debug, Default)]
pub struct Preprocessed {
    pub text: String,
    /// Directives that were replaced by file contents.
    pub expanded: usize,
    pub errors: Vec<IncludeError>,
}

#[derive(Debug, Clone, Default)]
pub struct Preprocessor {
    base_dir: Option<PathBuf>,
}

impl Preprocessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves directive paths against `base_dir` instead of the working directory.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    pub fn run(&self, text: &str) -> Preprocessed {
        let mut out = Preprocessed::default();
        let mut in_fence = false;

        for line in text.split('\n').map(str::trim_end) {
            if CodeFence::is_marker(line) {
                in_fence = !in_fence;
                push_line(&mut out.text, line);
                continue;
            }
            if in_fence {
                push_line(&mut out.text, line);
                continue;
            }
            if line.trim().is_empty() {
                continue;
            }

            let Some(caps) = include_regex().captures(line) else {
                push_line(&mut out.text, line);
                continue;
            };
            let input = caps[1].trim();
            match read_include(input, self.base_dir()) {
                Ok(expanded) => {
                    log::debug!("Expanded include '{input}'");
                    out.expanded += 1;
                    push_line(&mut out.text, &expanded);
                }
                Err(err) => {
                    log::warn!("Include failed: {err}");
                    push_line(&mut out.text, &err.to_comment());
                    out.errors.push(err);
                }
            }
        }

        out
    }
}

fn push_line(buf: &mut String, line: &str) {
    buf.push_str(line);
    buf.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn passes_plain_lines_and_drops_blanks() {
        let out = Preprocessor::new().run("# Title\n\n\ntext  \n");
        assert_eq!(out.text, "# Title\ntext\n");
        assert_eq!(out.expanded, 0);
        assert!(out.errors.is_empty());
    }

    #[test]
    fn expands_include_with_markers() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("part.txt"), "## Included").unwrap();

        let out = Preprocessor::with_base_dir(dir.path()).run("<!--include: part.txt -->\nafter");
        assert_eq!(
            out.text,
            "<!-- start of file :part.txt -->\n## Included\n<!-- end of file : part.txt -->\nafter\n"
        );
        assert_eq!(out.expanded, 1);
    }

    #[test]
    fn missing_file_becomes_error_comment() {
        let dir = TempDir::new().unwrap();
        let out = Preprocessor::with_base_dir(dir.path()).run("<!--include: missing.txt -->\nnext");
        assert!(out.text.contains("not found"));
        assert!(out.text.starts_with("<!-- ERROR: File 'missing.txt' not found -->\n"));
        assert!(out.text.ends_with("next\n"));
        assert_eq!(out.expanded, 0);
        assert_eq!(out.errors.len(), 1);
        assert_eq!(out.errors[0].path(), "missing.txt");
    }

    #[test]
    fn unreadable_target_reports_read_error() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("folder")).unwrap();

        let out = Preprocessor::with_base_dir(dir.path()).run("<!--include: folder -->");
        assert!(out.text.starts_with("<!-- ERROR: Could not read 'folder': "));
        assert!(matches!(out.errors[0], IncludeError::Read { .. }));
    }

    #[test]
    fn fenced_lines_are_untouched() {
        let text = "```\n  indented\n\n<!--include: nope.txt -->\n```\n";
        let out = Preprocessor::new().run(text);
        assert_eq!(out.text, "```\n  indented\n\n<!--include: nope.txt -->\n```\n");
        assert!(out.errors.is_empty());
    }

    #[test]
    fn directive_tolerates_extra_whitespace() {
        let caps = include_regex().captures("<!--   include:   a b.txt   -->").unwrap();
        assert_eq!(&caps[1], "a b.txt");
    }
}
