//! Interactive prompts for values missing from the command line

use std::io::{self, BufRead, Write};

use super::clean_input;

/// Prompt shown when no variant description is given
pub const VARIANT_PROMPT: &str =
    "Enter HGVS compliant c. variant description (e.g., NM_000088.3:c.589G>T): ";

/// Prompt shown when no genome build is given
pub const BUILD_PROMPT: &str = "Enter genome build (GRCh37 or GRCh38): ";

/// Write `prompt` to `writer` and read one line from `reader`.
///
/// The answer is trimmed. End of input or a blank line yields
/// `ErrorKind::UnexpectedEof` so a closed stdin never loops.
///
/// # Examples
///
/// ```
/// use variant_annotator::cli::{prompt_line, BUILD_PROMPT};
/// use std::io::Cursor;
///
/// let mut input = Cursor::new("GRCh38\n");
/// let mut output = Vec::new();
/// let answer = prompt_line(&mut input, &mut output, BUILD_PROMPT).unwrap();
/// assert_eq!(answer, "GRCh38");
/// assert_eq!(String::from_utf8(output).unwrap(), BUILD_PROMPT);
/// ```
pub fn prompt_line<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    prompt: &str,
) -> io::Result<String> {
    write!(writer, "{}", prompt)?;
    writer.flush()?;

    let mut line = String::new();
    reader.read_line(&mut line)?;
    clean_input(&line).map(str::to_string).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("no answer given to prompt '{}'", prompt.trim_end()),
        )
    })
}
