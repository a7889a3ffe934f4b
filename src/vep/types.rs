//! Ensembl VEP response types and score extraction
//!
//! The HGVS endpoint returns an array of variant records, each with a list of
//! `transcript_consequences`. With `revel=true` and `SpliceAI=true` a
//! consequence may carry a `revel` score and a `spliceai` object holding the
//! four SpliceAI delta scores.
//!
//! Some deployments flatten the scores onto a single object
//! (`{"REVEL_score": 0.87, "SpliceAI_score": 0.1}`); those top-level fields
//! win over anything found in the consequences.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::json::{lenient, score};

/// Raw VEP response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationResponse {
    body: Value,
}

impl From<Value> for AnnotationResponse {
    fn from(body: Value) -> Self {
        Self { body }
    }
}

impl AnnotationResponse {
    /// Decode the variant records.
    ///
    /// An array yields one record per element; a single object is treated as
    /// one record. Elements that are not objects are skipped.
    pub fn records(&self) -> Vec<VepRecord> {
        match &self.body {
            Value::Array(items) => items
                .iter()
                .filter_map(|item| VepRecord::deserialize(item).ok())
                .collect(),
            Value::Object(_) => VepRecord::deserialize(&self.body)
                .map(|record| vec![record])
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    /// Extract pathogenicity scores and gene identity.
    ///
    /// Across transcript consequences, REVEL and SpliceAI take the maximum
    /// value. Gene symbol and ID are read together from a single source: the
    /// top-level fields if either is present, otherwise the first Ensembl
    /// consequence naming a gene, otherwise the first consequence naming one.
    pub fn scores(&self) -> PredictedScores {
        let flat = match &self.body {
            Value::Object(_) => FlatScores::deserialize(&self.body).unwrap_or_default(),
            _ => FlatScores::default(),
        };
        let records = self.records();
        let consequences = || {
            records
                .iter()
                .flat_map(|record| record.transcript_consequences.iter().flatten())
        };

        let (gene_symbol, gene_id) = if flat.gene_symbol.is_some() || flat.gene_id.is_some() {
            (flat.gene_symbol, flat.gene_id)
        } else {
            consequences()
                .filter(|c| c.names_gene())
                .find(|c| c.is_ensembl())
                .or_else(|| consequences().find(|c| c.names_gene()))
                .map(|c| (c.gene_symbol.clone(), c.gene_id.clone()))
                .unwrap_or_default()
        };

        PredictedScores {
            revel: flat
                .revel
                .or_else(|| max_score(consequences().filter_map(|c| c.revel))),
            splice_ai: flat.splice_ai.or_else(|| {
                max_score(
                    consequences()
                        .filter_map(|c| c.spliceai.as_ref().and_then(SpliceAiScores::max_delta)),
                )
            }),
            gene_symbol,
            gene_id,
            most_severe_consequence: records
                .iter()
                .find_map(|record| record.most_severe_consequence.clone()),
        }
    }
}

/// Scores and gene identity read from a VEP response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictedScores {
    /// REVEL missense pathogenicity score
    pub revel: Option<f64>,
    /// Maximum SpliceAI delta score
    pub splice_ai: Option<f64>,
    pub gene_symbol: Option<String>,
    pub gene_id: Option<String>,
    pub most_severe_consequence: Option<String>,
}

impl PredictedScores {
    /// Whether neither score is present
    pub fn is_empty(&self) -> bool {
        self.revel.is_none() && self.splice_ai.is_none()
    }
}

/// One VEP variant record
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VepRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub input: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub most_severe_consequence: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub transcript_consequences: Option<Vec<TranscriptConsequence>>,
}

/// Consequence of a variant on one transcript
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TranscriptConsequence {
    #[serde(default, deserialize_with = "lenient")]
    pub transcript_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub gene_symbol: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub gene_id: Option<String>,
    #[serde(default, deserialize_with = "score")]
    pub revel: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub spliceai: Option<SpliceAiScores>,
}

impl TranscriptConsequence {
    /// Whether the consequence is on an Ensembl transcript
    pub fn is_ensembl(&self) -> bool {
        self.transcript_id
            .as_deref()
            .is_some_and(|id| id.starts_with("ENST"))
    }

    /// Whether the consequence carries a gene symbol or gene ID
    pub fn names_gene(&self) -> bool {
        self.gene_symbol.is_some() || self.gene_id.is_some()
    }
}

/// SpliceAI delta scores for acceptor/donor gain/loss
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SpliceAiScores {
    #[serde(rename = "DS_AG", default, deserialize_with = "score")]
    pub acceptor_gain: Option<f64>,
    #[serde(rename = "DS_AL", default, deserialize_with = "score")]
    pub acceptor_loss: Option<f64>,
    #[serde(rename = "DS_DG", default, deserialize_with = "score")]
    pub donor_gain: Option<f64>,
    #[serde(rename = "DS_DL", default, deserialize_with = "score")]
    pub donor_loss: Option<f64>,
}

impl SpliceAiScores {
    /// Largest of the four delta scores
    pub fn max_delta(&self) -> Option<f64> {
        max_score(
            [
                self.acceptor_gain,
                self.acceptor_loss,
                self.donor_gain,
                self.donor_loss,
            ]
            .into_iter()
            .flatten(),
        )
    }
}

/// Scores flattened onto a top-level object
#[derive(Debug, Clone, Default, Deserialize)]
struct FlatScores {
    #[serde(rename = "REVEL_score", default, deserialize_with = "score")]
    revel: Option<f64>,
    #[serde(
        rename = "SpliceAI_score",
        alias = "SPICE_AI_score",
        default,
        deserialize_with = "score"
    )]
    splice_ai: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    gene_symbol: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    gene_id: Option<String>,
}

fn max_score(scores: impl Iterator<Item = f64>) -> Option<f64> {
    scores.fold(None, |max, score| Some(max.map_or(score, |m: f64| m.max(score))))
}
