//! VariantValidator client
//!
//! Converts transcript-level HGVS descriptions into genomic descriptions
//! through the VariantValidator REST API. RefSeq and Ensembl transcripts are
//! served by separate endpoints that share one response format.
//!
//! # References
//!
//! - [VariantValidator REST API](https://rest.variantvalidator.org/)

mod client;
mod types;

pub use client::ValidatorClient;
pub use types::{AssemblyLocus, GeneIds, ValidatedVariant, ValidationResponse};
