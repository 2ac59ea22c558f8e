//! Image upload sink
//!
//! Files land directly in the configured upload directory under a
//! sanitised name. No size or type checks.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Anything outside this set is dropped from uploaded filenames
static UNSAFE_FILENAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_.-]").expect("invalid filename regex"));

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("filename '{0}' has no usable characters")]
    InvalidFilename(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reduce a client-supplied filename to something safe to join onto the
/// upload directory.
///
/// The name is NFKD-decomposed and stripped to ASCII first, so accented
/// letters keep their base letter. Path separators become word breaks, runs
/// of whitespace become a single `_`, characters other than ASCII letters, digits, `_`, `.` and `-` are
/// removed, and leading/trailing dots and underscores are trimmed. The
/// result may be empty.
///
/// ```
/// use blogctl_server::upload::secure_filename;
///
/// assert_eq!(secure_filename("My cool movie.mov"), "My_cool_movie.mov");
/// assert_eq!(secure_filename("../../../etc/passwd"), "etc_passwd");
/// assert_eq!(secure_filename("café menu.png"), "cafe_menu.png");
/// ```
pub fn secure_filename(filename: &str) -> String {
    let ascii: String = filename.nfkd().filter(char::is_ascii).collect();
    let spaced = ascii.replace(['/', '\\'], " ");
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned = UNSAFE_FILENAME_CHARS.replace_all(&joined, "");
    cleaned.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Write `bytes` into `dir` under the sanitised form of `filename`.
///
/// Creates `dir` if needed and overwrites an existing file of the same name.
pub async fn save_upload(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf, UploadError> {
    let name = secure_filename(filename);
    if name.is_empty() {
        return Err(UploadError::InvalidFilename(filename.to_owned()));
    }

    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(&name);
    tokio::fs::write(&path, bytes).await?;

    tracing::info!(path = %path.display(), size = bytes.len(), "saved upload");
    Ok(path)
}
