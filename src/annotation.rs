//! Annotation result record
//!
//! The record is the terminal output of a run. Values the services did not
//! provide are [`Availability::NotAvailable`], serialized as `"N/A"`; they are
//! never replaced by a default number.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::build::GenomeBuild;
use crate::namespace::TranscriptNamespace;

/// Marker written for values that are not available
pub const NOT_AVAILABLE: &str = "N/A";

/// A value reported by a service, or an explicit "not available"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Availability<T> {
    Available(T),
    #[default]
    NotAvailable,
}

impl<T> Availability<T> {
    /// Whether a value is present
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available(_))
    }

    /// Borrow the value, if present
    pub fn as_option(&self) -> Option<&T> {
        match self {
            Availability::Available(value) => Some(value),
            Availability::NotAvailable => None,
        }
    }

    /// Convert into an `Option`
    pub fn into_option(self) -> Option<T> {
        match self {
            Availability::Available(value) => Some(value),
            Availability::NotAvailable => None,
        }
    }
}

impl<T> From<Option<T>> for Availability<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Availability::Available(value),
            None => Availability::NotAvailable,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Availability<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Availability::Available(value) => fmt::Display::fmt(value, f),
            Availability::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

impl<T: Serialize> Serialize for Availability<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Availability::Available(value) => value.serialize(serializer),
            Availability::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

/// Genomic HGVS descriptions keyed by build
///
/// A run only ever fills the entry for the requested build; the other one
/// stays empty and is left out of the serialized record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenomicHgvs {
    #[serde(skip_serializing_if = "Option::is_none")]
    grch37: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    grch38: Option<String>,
}

impl GenomicHgvs {
    /// A mapping holding a single description for `build`
    pub fn for_build(build: GenomeBuild, description: impl Into<String>) -> Self {
        let mut hgvs = Self::default();
        hgvs.insert(build, description);
        hgvs
    }

    /// Store the description for `build`
    pub fn insert(&mut self, build: GenomeBuild, description: impl Into<String>) {
        *self.slot_mut(build) = Some(description.into());
    }

    /// Description stored for `build`
    pub fn get(&self, build: GenomeBuild) -> Option<&str> {
        match build {
            GenomeBuild::GRCh37 => self.grch37.as_deref(),
            GenomeBuild::GRCh38 => self.grch38.as_deref(),
        }
    }

    /// Number of populated builds
    pub fn len(&self) -> usize {
        usize::from(self.grch37.is_some()) + usize::from(self.grch38.is_some())
    }

    /// Whether no build is populated
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot_mut(&mut self, build: GenomeBuild) -> &mut Option<String> {
        match build {
            GenomeBuild::GRCh37 => &mut self.grch37,
            GenomeBuild::GRCh38 => &mut self.grch38,
        }
    }
}

/// How many of the requested scores VEP provided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreStatus {
    /// Both REVEL and SpliceAI scores are present
    Complete,
    /// Exactly one score is present
    Partial,
    /// VEP answered but provided neither score
    NoAnnotationAvailable,
}

impl ScoreStatus {
    /// Status for a pair of optional scores
    pub fn from_scores(revel: Option<f64>, splice_ai: Option<f64>) -> Self {
        match (revel.is_some(), splice_ai.is_some()) {
            (true, true) => ScoreStatus::Complete,
            (false, false) => ScoreStatus::NoAnnotationAvailable,
            _ => ScoreStatus::Partial,
        }
    }
}

impl fmt::Display for ScoreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreStatus::Complete => write!(f, "complete"),
            ScoreStatus::Partial => write!(f, "partial"),
            ScoreStatus::NoAnnotationAvailable => write!(f, "no_annotation_available"),
        }
    }
}

/// Normalized annotation of one variant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotationResult {
    /// Variant description as submitted
    pub variant: String,
    pub genome_build: GenomeBuild,
    /// Namespace the variant was validated in
    pub namespace: TranscriptNamespace,
    /// Genomic description sent to VEP, keyed by build
    pub genomic_hgvs: GenomicHgvs,
    pub gene_symbol: Availability<String>,
    pub gene_id: Availability<String>,
    pub revel_score: Availability<f64>,
    pub splice_ai_score: Availability<f64>,
    pub most_severe_consequence: Availability<String>,
    pub score_status: ScoreStatus,
}

impl AnnotationResult {
    /// Genomic description used for the requested build
    pub fn genomic_description(&self) -> Option<&str> {
        self.genomic_hgvs.get(self.genome_build)
    }
}
