//! Documentation file discovery and bounded reads.
//!
//! Discovery is a single glob over one directory: `docs/*.md` only matches
//! files directly inside `docs`, never in its subdirectories. Each file is
//! read completely and closed before any parsing starts.

use std::io::Read;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Paths, Pattern};

use crate::error::{ScanError, ScanErrorKind};

/// Lazy sequence of documentation files returned by [`discover_markdown_files`].
///
/// Yields regular files, following symlinks. A match whose metadata cannot
/// be read (a dangling symlink, say) is yielded as an error. Order follows
/// the underlying glob walk and must not be relied on.
pub struct MarkdownFiles {
    paths: Paths,
}

impl Iterator for MarkdownFiles {
    type Item = Result<PathBuf, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        for entry in self.paths.by_ref() {
            match entry {
                Ok(path) => match std::fs::metadata(&path) {
                    Ok(meta) if meta.is_file() => return Some(Ok(path)),
                    Ok(_) => {
                        tracing::debug!(path = %path.display(), "skipping non-file match");
                    }
                    // A dangling symlink still names a documentation file.
                    Err(e) => {
                        return Some(Err(ScanError::new(
                            path,
                            ScanErrorKind::IoError,
                            format!("Failed to inspect file: {e}"),
                        )));
                    }
                },
                Err(e) => {
                    return Some(Err(ScanError::new(
                        e.path(),
                        ScanErrorKind::GlobError,
                        format!("Failed to inspect entry: {}", e.error()),
                    )));
                }
            }
        }
        None
    }
}

/// Enumerate files in `directory` whose names match `pattern`.
///
/// A directory that does not exist or holds no matches yields nothing.
///
/// # Errors
///
/// Returns a `ScanError` with kind `InvalidPattern` if `pattern` is not a
/// valid glob.
pub fn discover_markdown_files(
    directory: &Path,
    pattern: &str,
) -> Result<MarkdownFiles, ScanError> {
    // Escape the directory so characters like `[` in it are taken literally.
    let full_pattern = format!(
        "{}/{pattern}",
        Pattern::escape(&directory.to_string_lossy())
    );

    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    let paths = glob::glob_with(&full_pattern, options).map_err(|e| {
        ScanError::new(
            directory,
            ScanErrorKind::InvalidPattern,
            format!("Invalid discovery pattern '{pattern}': {e}"),
        )
    })?;

    Ok(MarkdownFiles { paths })
}

/// Read a whole documentation file as UTF-8 text.
///
/// At most `max_file_size + 1` bytes are pulled from disk, so an oversized
/// file is detected without loading it entirely.
///
/// # Errors
///
/// Fails with `IoError`, `FileTooLarge` or `InvalidEncoding`.
pub fn read_file_bounded(path: &Path, max_file_size: u64) -> Result<String, ScanError> {
    let io_error = |action: &str, e: std::io::Error| {
        ScanError::new(path, ScanErrorKind::IoError, format!("Failed to {action} file: {e}"))
    };

    let mut bytes = Vec::new();
    std::fs::File::open(path)
        .map_err(|e| io_error("open", e))?
        .take(max_file_size.saturating_add(1))
        .read_to_end(&mut bytes)
        .map_err(|e| io_error("read", e))?;

    if u64::try_from(bytes.len()).unwrap_or(u64::MAX) > max_file_size {
        return Err(ScanError::new(
            path,
            ScanErrorKind::FileTooLarge,
            format!("File is larger than the {max_file_size} byte limit"),
        ));
    }

    String::from_utf8(bytes).map_err(|e| {
        ScanError::new(
            path,
            ScanErrorKind::InvalidEncoding,
            format!(
                "File is not UTF-8 (first bad byte at offset {})",
                e.utf8_error().valid_up_to()
            ),
        )
    })
}
