use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Read a document and return its content
pub fn read_file(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(|source| IoError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Write content to a file, creating parent directories as needed
pub fn write_file(path: &Path, content: &str) -> Result<(), IoError> {
    let io_err = |source: std::io::Error| IoError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    fs::write(path, content).map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn read_missing_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.sm");

        let result = read_file(&missing);

        assert!(matches!(result, Err(IoError::NotFound(p)) if p == missing));
    }

    #[test]
    fn write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("out/nested/page.html");

        write_file(&target, "<h1>Hi</h1>").unwrap();

        assert_eq!(read_file(&target).unwrap(), "<h1>Hi</h1>");
    }

    #[test]
    fn writes_into_existing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("plain.txt");

        write_file(&target, "x").unwrap();

        assert!(target.exists());
    }
}
