//! Output formatting utilities for CLI operations

use std::io::{self, Write};
use std::str::FromStr;

use crate::annotation::AnnotationResult;
use crate::error::AnnotateError;

/// Output format for CLI results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Pretty-printed JSON record (default)
    #[default]
    Json,
    /// One `key: value` line per field
    Text,
}

impl FromStr for OutputFormat {
    type Err = String;

    /// Parse an output format from a string
    ///
    /// # Examples
    ///
    /// ```
    /// use variant_annotator::cli::OutputFormat;
    /// use std::str::FromStr;
    ///
    /// assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
    /// assert_eq!(OutputFormat::from_str("TEXT").unwrap(), OutputFormat::Text);
    /// assert!(OutputFormat::from_str("vcf").is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            other => Err(format!(
                "Unknown output format '{}'. Choose from ['json', 'text'].",
                other
            )),
        }
    }
}

/// Write an annotation record to the output
///
/// # Examples
///
/// ```
/// use variant_annotator::cli::{output_result, OutputFormat};
/// use variant_annotator::{
///     AnnotationResult, Availability, GenomeBuild, GenomicHgvs, ScoreStatus, TranscriptNamespace,
/// };
/// use std::io::Cursor;
///
/// let result = AnnotationResult {
///     variant: "NM_000088.3:c.589G>T".to_string(),
///     genome_build: GenomeBuild::GRCh38,
///     namespace: TranscriptNamespace::RefSeq,
///     genomic_hgvs: GenomicHgvs::for_build(GenomeBuild::GRCh38, "NC_000017.11:g.50198002C>A"),
///     gene_symbol: Availability::NotAvailable,
///     gene_id: Availability::NotAvailable,
///     revel_score: Availability::Available(0.87),
///     splice_ai_score: Availability::NotAvailable,
///     most_severe_consequence: Availability::NotAvailable,
///     score_status: ScoreStatus::Partial,
/// };
///
/// let mut buffer = Cursor::new(Vec::new());
/// output_result(&mut buffer, &result, OutputFormat::Text).unwrap();
/// let output = String::from_utf8(buffer.into_inner()).unwrap();
/// assert!(output.contains("revel_score: 0.87"));
/// assert!(output.contains("splice_ai_score: N/A"));
/// ```
pub fn output_result<W: Write>(
    writer: &mut W,
    result: &AnnotationResult,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, result).map_err(io::Error::from)?;
            writeln!(writer)
        }
        OutputFormat::Text => {
            writeln!(writer, "variant: {}", result.variant)?;
            writeln!(writer, "genome_build: {}", result.genome_build)?;
            writeln!(writer, "namespace: {}", result.namespace)?;
            writeln!(
                writer,
                "genomic_hgvs: {}",
                result
                    .genomic_description()
                    .unwrap_or(crate::annotation::NOT_AVAILABLE)
            )?;
            writeln!(writer, "gene_symbol: {}", result.gene_symbol)?;
            writeln!(writer, "gene_id: {}", result.gene_id)?;
            writeln!(writer, "revel_score: {}", result.revel_score)?;
            writeln!(writer, "splice_ai_score: {}", result.splice_ai_score)?;
            writeln!(
                writer,
                "most_severe_consequence: {}",
                result.most_severe_consequence
            )?;
            writeln!(writer, "score_status: {}", result.score_status)
        }
    }
}

/// Write an error to the output
///
/// JSON output carries the stable error code alongside the message.
pub fn output_error<W: Write>(
    writer: &mut W,
    input: &str,
    error: &AnnotateError,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let record = serde_json::json!({
                "input": input,
                "error": error.to_string(),
                "code": error.code().as_str(),
                "status": "error",
            });
            writeln!(writer, "{}", record)
        }
        OutputFormat::Text => writeln!(writer, "ERROR: {} - {}", input, error),
    }
}
