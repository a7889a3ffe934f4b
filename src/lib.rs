// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! variant-annotator: coding variant to pathogenicity score resolution
//!
//! A transcript-level HGVS description (e.g. `NM_000088.3:c.589G>T`) is
//! validated and projected onto a genome build with VariantValidator, and the
//! resulting genomic description is annotated with REVEL and SpliceAI scores
//! by the Ensembl Variant Effect Predictor (VEP).
//!
//! # Example
//!
//! ```no_run
//! use variant_annotator::{Annotator, AnnotatorConfig};
//!
//! # async fn run() -> variant_annotator::Result<()> {
//! let annotator = Annotator::from_config(&AnnotatorConfig::default())?;
//! let result = annotator
//!     .annotate_variant("NM_000088.3:c.589G>T", "GRCh38")
//!     .await?;
//! println!("REVEL: {}", result.revel_score);
//! # Ok(())
//! # }
//! ```

pub mod annotation;
pub mod build;
pub mod cli;
pub mod config;
pub mod error;
mod json;
pub mod namespace;
pub mod pipeline;
pub mod transport;
pub mod validator;
pub mod vep;

pub use annotation::{AnnotationResult, Availability, GenomicHgvs, ScoreStatus, NOT_AVAILABLE};
pub use build::GenomeBuild;
pub use config::AnnotatorConfig;
pub use error::{AnnotateError, ErrorCode, MissingPath, Service, TransportError};
pub use namespace::{NamespaceRouting, TranscriptNamespace};
pub use pipeline::{Annotator, ResolvedVariant};
pub use transport::{HttpTransport, JsonTransport};

/// Result type for annotation operations
pub type Result<T> = std::result::Result<T, AnnotateError>;
