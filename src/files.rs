//! Scoped file access
//!
//! Validates caller-supplied file names against a fixed base directory and
//! an extension allow-list, then performs the actual reads and writes.
//! Inputs containing any path separator or parent component are rejected
//! outright rather than truncated to their base name.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use crate::config::ToolConfig;
use crate::error::{Result, ToolError};

/// Validate a caller-supplied file name against the configured base
/// directory and extension allow-list
///
/// Returns the resolved absolute path on success. The input must be a bare
/// file name: anything carrying directory segments (`a/b.txt`,
/// `../../etc/passwd`, a trailing separator) fails with `PathTraversal`.
pub fn validate_file_path(file_path: &str, config: &ToolConfig) -> Result<PathBuf> {
    if file_path.is_empty() {
        return Err(ToolError::missing_parameter("file_path"));
    }

    if file_path.contains('/') || file_path.contains('\\') {
        return Err(ToolError::path_traversal(file_path));
    }

    // Anything that is not its own file name (".", "..") is not a file
    match Path::new(file_path).file_name() {
        Some(name) if name == OsStr::new(file_path) => {}
        _ => return Err(ToolError::path_traversal(file_path)),
    }

    let base = std::path::absolute(&config.files_dir)?;
    let resolved = base.join(file_path);

    // Escape is impossible once the input is a bare file name; kept as a
    // hard invariant on the returned path.
    if !resolved.starts_with(&base) {
        return Err(ToolError::path_traversal(file_path));
    }

    let extension = resolved
        .extension()
        .and_then(OsStr::to_str)
        .map(|e| format!(".{}", e));
    match extension {
        Some(ref ext) if config.extension_allowed(ext) => {}
        _ => {
            return Err(ToolError::DisallowedExtension(
                extension.unwrap_or_else(|| file_path.to_string()),
            ));
        }
    }

    Ok(resolved)
}

/// Check that the requested encoding is supported
///
/// Only UTF-8 is supported; the name is matched case-insensitively.
pub fn validate_encoding(encoding: &str) -> Result<()> {
    match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" => Ok(()),
        other => Err(ToolError::UnsupportedEncoding(other.to_string())),
    }
}

/// Read a validated file, enforcing the size cap before touching content
pub async fn read_file(path: &Path, max_size: u64) -> Result<Vec<u8>> {
    let metadata = fs::metadata(path).await.map_err(|e| classify_io(e, path))?;
    if metadata.len() > max_size {
        return Err(ToolError::FileTooLarge {
            size: metadata.len(),
            max: max_size,
        });
    }

    let bytes = fs::read(path).await.map_err(|e| classify_io(e, path))?;
    debug!(path = %path.display(), bytes = bytes.len(), "file read");
    Ok(bytes)
}

/// Write a validated file, creating missing parent directories
pub async fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| classify_io(e, path))?;
    }

    fs::write(path, bytes)
        .await
        .map_err(|e| classify_io(e, path))?;
    debug!(path = %path.display(), bytes = bytes.len(), "file written");
    Ok(())
}

fn classify_io(e: std::io::Error, path: &Path) -> ToolError {
    match e.kind() {
        std::io::ErrorKind::NotFound => {
            ToolError::not_found(format!("file not found: {}", path.display()))
        }
        std::io::ErrorKind::PermissionDenied => {
            ToolError::PermissionDenied(path.display().to_string())
        }
        _ => ToolError::Io(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_config(base: &Path) -> ToolConfig {
        ToolConfig::builder("unused.db", base).build()
    }

    #[test]
    fn test_validate_accepts_plain_name() {
        let temp = TempDir::new().unwrap();
        let config = test_config(temp.path());

        let resolved = validate_file_path("notes.txt", &config).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("notes.txt"));
        assert!(resolved.starts_with(temp.path()));
    }

    #[test]
    fn test_validate_rejects_traversal() {
        let temp = TempDir::new().unwrap();
        let config = test_config(temp.path());

        for input in [
            "../../etc/passwd",
            "../sibling.txt",
            "a/b.txt",
            "dir\\evil.txt",
            "..",
            ".",
            "/etc/passwd",
        ] {
            let result = validate_file_path(input, &config);
            assert!(
                matches!(result, Err(ToolError::PathTraversal(_))),
                "expected PathTraversal for {:?}, got {:?}",
                input,
                result
            );
        }
    }

    #[test]
    fn test_validate_rejects_disallowed_extension() {
        let temp = TempDir::new().unwrap();
        let config = test_config(temp.path());

        assert!(matches!(
            validate_file_path("run.sh", &config),
            Err(ToolError::DisallowedExtension(_))
        ));
        assert!(matches!(
            validate_file_path("noextension", &config),
            Err(ToolError::DisallowedExtension(_))
        ));
    }

    #[test]
    fn test_validate_extension_case_insensitive() {
        let temp = TempDir::new().unwrap();
        let config = test_config(temp.path());

        assert!(validate_file_path("README.MD", &config).is_ok());
        assert!(validate_file_path("data.JSON", &config).is_ok());
    }

    #[test]
    fn test_validate_empty_is_missing_parameter() {
        let temp = TempDir::new().unwrap();
        let config = test_config(temp.path());

        assert!(matches!(
            validate_file_path("", &config),
            Err(ToolError::MissingParameter(_))
        ));
    }

    #[test]
    fn test_validate_encoding() {
        assert!(validate_encoding("utf-8").is_ok());
        assert!(validate_encoding("UTF-8").is_ok());
        assert!(validate_encoding("utf8").is_ok());
        assert!(matches!(
            validate_encoding("latin-1"),
            Err(ToolError::UnsupportedEncoding(_))
        ));
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.txt");

        write_file(&path, b"hello").await.unwrap();
        let bytes = read_file(&path, 1024).await.unwrap();
        assert_eq!(bytes, b"hello");
    }

    #[tokio::test]
    async fn test_read_missing_is_not_found() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.txt");

        let result = read_file(&path, 1024).await;
        assert!(matches!(result, Err(ToolError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_read_oversized_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("big.txt");
        write_file(&path, &[b'x'; 32]).await.unwrap();

        let result = read_file(&path, 16).await;
        assert!(matches!(
            result,
            Err(ToolError::FileTooLarge { size: 32, max: 16 })
        ));
    }
}
