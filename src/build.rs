//! Genome build handling
//!
//! Only the two assemblies served by both VariantValidator and Ensembl VEP are
//! accepted. Parsing is exact: aliases such as `hg19` or differently-cased
//! spellings are rejected rather than guessed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnnotateError;

/// Genome build/assembly version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenomeBuild {
    /// GRCh37 / hg19
    GRCh37,
    /// GRCh38 / hg38
    GRCh38,
}

impl GenomeBuild {
    /// All accepted builds, in the order they are offered to users.
    pub const ALL: [GenomeBuild; 2] = [GenomeBuild::GRCh37, GenomeBuild::GRCh38];

    /// Canonical name, as accepted by [`GenomeBuild::from_str`].
    pub fn as_str(&self) -> &'static str {
        match self {
            GenomeBuild::GRCh37 => "GRCh37",
            GenomeBuild::GRCh38 => "GRCh38",
        }
    }

    /// Lower-cased key used by VariantValidator under `primary_assembly_loci`.
    ///
    /// ```
    /// use variant_annotator::GenomeBuild;
    ///
    /// assert_eq!(GenomeBuild::GRCh37.key(), "grch37");
    /// assert_eq!(GenomeBuild::GRCh38.key(), "grch38");
    /// ```
    pub fn key(&self) -> &'static str {
        match self {
            GenomeBuild::GRCh37 => "grch37",
            GenomeBuild::GRCh38 => "grch38",
        }
    }
}

impl fmt::Display for GenomeBuild {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenomeBuild {
    type Err = AnnotateError;

    /// Parse a genome build, accepting only `GRCh37` and `GRCh38` exactly.
    ///
    /// ```
    /// use variant_annotator::GenomeBuild;
    ///
    /// assert_eq!("GRCh38".parse::<GenomeBuild>().unwrap(), GenomeBuild::GRCh38);
    /// assert!("hg19".parse::<GenomeBuild>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GenomeBuild::ALL
            .into_iter()
            .find(|build| build.as_str() == s)
            .ok_or_else(|| AnnotateError::InvalidGenomeBuild(s.to_string()))
    }
}
