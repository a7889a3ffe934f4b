//! CLI utilities for variant-annotator
//!
//! Testable pieces of the `vannot` binary. Rendering and prompting are
//! generic over `Write`/`BufRead` so they can be exercised against buffers.

pub mod format;
pub mod prompt;

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

pub use format::{output_error, output_result, OutputFormat};
pub use prompt::{prompt_line, BUILD_PROMPT, VARIANT_PROMPT};

/// UTF-8 BOM (Byte Order Mark) constant
const UTF8_BOM: &str = "\u{feff}";

/// Strip UTF-8 BOM from the beginning of a string if present.
///
/// # Examples
///
/// ```
/// use variant_annotator::cli::strip_bom;
///
/// assert_eq!(strip_bom("\u{feff}NM_000088.3:c.589G>T"), "NM_000088.3:c.589G>T");
/// assert_eq!(strip_bom("NM_000088.3:c.589G>T"), "NM_000088.3:c.589G>T");
/// ```
pub fn strip_bom(s: &str) -> &str {
    s.strip_prefix(UTF8_BOM).unwrap_or(s)
}

/// Clean a value typed or piped in by the user.
///
/// Surrounding whitespace and a leading BOM are removed. Returns `None` for
/// blank input.
///
/// # Examples
///
/// ```
/// use variant_annotator::cli::clean_input;
///
/// assert_eq!(clean_input("  GRCh38\n"), Some("GRCh38"));
/// assert_eq!(clean_input("   "), None);
/// ```
pub fn clean_input(line: &str) -> Option<&str> {
    let line = strip_bom(line.trim()).trim();
    if line.is_empty() {
        None
    } else {
        Some(line)
    }
}

/// Open a log file for appending, creating it and its parent directories.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}
