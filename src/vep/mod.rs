//! Ensembl Variant Effect Predictor client
//!
//! Annotates genomic HGVS descriptions with REVEL and SpliceAI scores. GRCh38
//! is served by the current Ensembl REST host, GRCh37 by the dedicated
//! `grch37.rest.ensembl.org` host.
//!
//! # References
//!
//! - [VEP REST endpoint](https://rest.ensembl.org/documentation/info/vep_hgvs_get)

mod client;
mod types;

pub use client::VepClient;
pub use types::{
    AnnotationResponse, PredictedScores, SpliceAiScores, TranscriptConsequence, VepRecord,
};
