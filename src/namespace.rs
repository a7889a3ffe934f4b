//! Transcript namespace classification
//!
//! VariantValidator exposes separate endpoints for RefSeq and Ensembl
//! transcripts, so every variant description has to be routed by the
//! namespace of its reference sequence.
//!
//! The default [`NamespaceRouting::Substring`] rule sends any description
//! containing `ENST` to the Ensembl endpoint and everything else to RefSeq.
//! [`NamespaceRouting::Strict`] instead parses the reference at the start of
//! the description and rejects what it cannot classify:
//!
//! - RefSeq: `NM_`, `NR_`, `XM_` or `XR_`, digits, optional `.version`
//! - Ensembl: `ENST`, digits, optional `.version`
//! - either may carry a gene annotation, as in `NM_000088.3(COL1A1)`
//! - a RefSeqGene wrapper, as in `NG_007400.1(NM_000088.3)`, takes the
//!   namespace of the inner transcript
//!
//! The reference is followed by `:` and a non-empty variant.

use std::fmt;

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::digit1,
    combinator::{opt, recognize, value},
    sequence::{delimited, preceded, terminated},
    IResult, Parser,
};
use serde::{Deserialize, Serialize};

/// Namespace of the transcript a variant is described on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptNamespace {
    /// RefSeq transcript (NM_/NR_/XM_/XR_)
    RefSeq,
    /// Ensembl transcript (ENST)
    Ensembl,
    /// Neither of the above
    Unrecognized,
}

impl TranscriptNamespace {
    /// Classify a variant description by its leading reference sequence.
    ///
    /// ```
    /// use variant_annotator::TranscriptNamespace;
    ///
    /// assert_eq!(
    ///     TranscriptNamespace::classify("NM_000088.3(COL1A1):c.589G>T"),
    ///     TranscriptNamespace::RefSeq
    /// );
    /// assert_eq!(
    ///     TranscriptNamespace::classify("ENST00000225964.10:c.589G>T"),
    ///     TranscriptNamespace::Ensembl
    /// );
    /// assert_eq!(
    ///     TranscriptNamespace::classify("NM_000088.3-ENST:c.589G>T"),
    ///     TranscriptNamespace::Unrecognized
    /// );
    /// ```
    pub fn classify(description: &str) -> Self {
        match terminated(reference, tag(":")).parse(description) {
            Ok((rest, namespace)) if !rest.is_empty() => namespace,
            _ => TranscriptNamespace::Unrecognized,
        }
    }
}

impl fmt::Display for TranscriptNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscriptNamespace::RefSeq => write!(f, "RefSeq"),
            TranscriptNamespace::Ensembl => write!(f, "Ensembl"),
            TranscriptNamespace::Unrecognized => write!(f, "unrecognized"),
        }
    }
}

/// How variant descriptions are mapped to validation endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamespaceRouting {
    /// Any description containing `ENST` is Ensembl, everything else RefSeq
    #[default]
    Substring,
    /// Parse the leading reference; unrecognized descriptions are rejected
    Strict,
}

impl NamespaceRouting {
    /// Decide the namespace of `description` under this routing mode.
    ///
    /// `Substring` never yields [`TranscriptNamespace::Unrecognized`].
    pub fn route(&self, description: &str) -> TranscriptNamespace {
        match self {
            NamespaceRouting::Strict => TranscriptNamespace::classify(description),
            NamespaceRouting::Substring => {
                if description.contains("ENST") {
                    TranscriptNamespace::Ensembl
                } else {
                    TranscriptNamespace::RefSeq
                }
            }
        }
    }
}

impl fmt::Display for NamespaceRouting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamespaceRouting::Strict => write!(f, "strict"),
            NamespaceRouting::Substring => write!(f, "substring"),
        }
    }
}

/// Reference sequence preceding the `:`
fn reference(input: &str) -> IResult<&str, TranscriptNamespace> {
    alt((refseq_gene, annotated_transcript)).parse(input)
}

/// `NG_007400.1(NM_000088.3)`
fn refseq_gene(input: &str) -> IResult<&str, TranscriptNamespace> {
    preceded(
        (tag("NG_"), versioned_number),
        delimited(tag("("), transcript, tag(")")),
    )
    .parse(input)
}

/// `NM_000088.3` or `NM_000088.3(COL1A1)`
fn annotated_transcript(input: &str) -> IResult<&str, TranscriptNamespace> {
    terminated(transcript, opt(gene_annotation)).parse(input)
}

fn transcript(input: &str) -> IResult<&str, TranscriptNamespace> {
    terminated(namespace_prefix, versioned_number).parse(input)
}

fn versioned_number(input: &str) -> IResult<&str, &str> {
    recognize((digit1, opt(preceded(tag("."), digit1)))).parse(input)
}

fn gene_annotation(input: &str) -> IResult<&str, &str> {
    delimited(
        tag("("),
        take_while1(|c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '@')),
        tag(")"),
    )
    .parse(input)
}

#[inline]
fn namespace_prefix(input: &str) -> IResult<&str, TranscriptNamespace> {
    alt((
        value(
            TranscriptNamespace::RefSeq,
            alt((tag("NM_"), tag("NR_"), tag("XM_"), tag("XR_"))),
        ),
        value(TranscriptNamespace::Ensembl, tag("ENST")),
    ))
    .parse(input)
}
