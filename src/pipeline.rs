//! Two-stage variant resolution
//!
//! [`Annotator::annotate_variant`] runs the whole chain for one variant:
//!
//! 1. validate the genome build (no network call on failure)
//! 2. route the description to the RefSeq or Ensembl VariantValidator endpoint
//! 3. extract the genomic HGVS for the requested build
//! 4. query VEP on the host serving that build
//! 5. read REVEL and SpliceAI scores, which may be absent
//! 6. assemble the [`AnnotationResult`]
//!
//! Calls are strictly sequential and never retried. The pipeline does not
//! print; every failure is returned as an [`AnnotateError`].

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::annotation::{AnnotationResult, Availability, GenomicHgvs, ScoreStatus};
use crate::build::GenomeBuild;
use crate::config::AnnotatorConfig;
use crate::error::AnnotateError;
use crate::namespace::{NamespaceRouting, TranscriptNamespace};
use crate::transport::{HttpTransport, JsonTransport};
use crate::validator::{ValidatedVariant, ValidatorClient};
use crate::vep::{AnnotationResponse, VepClient};

/// Resolves one variant at a time through VariantValidator and VEP
#[derive(Debug, Clone)]
pub struct Annotator {
    validator: ValidatorClient,
    vep: VepClient,
    routing: NamespaceRouting,
}

/// Output of the validation stage
#[derive(Debug, Clone)]
pub struct ResolvedVariant {
    /// Namespace the description was routed to
    pub namespace: TranscriptNamespace,
    /// Build the description was resolved on
    pub build: GenomeBuild,
    /// Genomic description on `build`
    pub genomic_description: String,
    /// Decoded validation entry, used for gene fallbacks
    pub record: ValidatedVariant,
}

impl ResolvedVariant {
    /// Genomic descriptions keyed by build; only `build` is populated
    pub fn genomic_hgvs(&self) -> GenomicHgvs {
        GenomicHgvs::for_build(self.build, self.genomic_description.as_str())
    }
}

impl Annotator {
    /// Create an annotator that sends all requests through `transport`
    pub fn new(transport: Arc<dyn JsonTransport>, config: &AnnotatorConfig) -> Self {
        Self {
            validator: ValidatorClient::new(transport.clone(), &config.validator),
            vep: VepClient::new(transport, &config.vep),
            routing: config.routing.namespace,
        }
    }

    /// Create an annotator using HTTP, after validating `config`
    pub fn from_config(config: &AnnotatorConfig) -> Result<Self, AnnotateError> {
        config.validate()?;
        let transport = HttpTransport::new(&config.http)?;
        Ok(Self::new(Arc::new(transport), config))
    }

    /// Annotate `variant` on the genome build named by `genome_build`.
    ///
    /// `genome_build` must be exactly `GRCh37` or `GRCh38`.
    pub async fn annotate_variant(
        &self,
        variant: &str,
        genome_build: &str,
    ) -> Result<AnnotationResult, AnnotateError> {
        let build: GenomeBuild = genome_build.parse()?;
        let namespace = self.route(variant)?;

        let resolved = self.resolve_genomic_hgvs(variant, build, namespace).await?;
        let annotation = self.predict(build, &resolved.genomic_description).await?;

        Ok(assemble(variant, resolved, &annotation))
    }

    /// Decide which validation endpoint serves `variant`
    pub fn route(&self, variant: &str) -> Result<TranscriptNamespace, AnnotateError> {
        match self.routing.route(variant) {
            TranscriptNamespace::Unrecognized => {
                Err(AnnotateError::UnrecognizedTranscript(variant.to_string()))
            }
            namespace => {
                debug!("Routing {} to the {} validation endpoint", variant, namespace);
                Ok(namespace)
            }
        }
    }

    /// Validate `variant` and extract its genomic description on `build`
    pub async fn resolve_genomic_hgvs(
        &self,
        variant: &str,
        build: GenomeBuild,
        namespace: TranscriptNamespace,
    ) -> Result<ResolvedVariant, AnnotateError> {
        let response = match namespace {
            TranscriptNamespace::RefSeq => self.validator.validate_refseq(variant, build).await?,
            TranscriptNamespace::Ensembl => {
                self.validator.validate_ensembl(variant, build).await?
            }
            TranscriptNamespace::Unrecognized => {
                return Err(AnnotateError::UnrecognizedTranscript(variant.to_string()))
            }
        };

        let malformed = |missing| AnnotateError::MalformedValidationResponse {
            variant: variant.to_string(),
            build,
            missing,
            warnings: response.warnings(variant),
        };
        let description = response
            .genomic_description(variant, build)
            .map_err(malformed)?;
        let record = response.record(variant).unwrap_or_default();

        info!("Genomic HGVS ({}): {}", build, description);

        Ok(ResolvedVariant {
            namespace,
            build,
            genomic_description: description,
            record,
        })
    }

    /// Query VEP on the host serving `build`
    pub async fn predict(
        &self,
        build: GenomeBuild,
        genomic_hgvs: &str,
    ) -> Result<AnnotationResponse, AnnotateError> {
        match build {
            GenomeBuild::GRCh38 => self.vep.predict_grch38(genomic_hgvs).await,
            GenomeBuild::GRCh37 => self.vep.predict_grch37(genomic_hgvs).await,
        }
    }
}

fn assemble(
    variant: &str,
    resolved: ResolvedVariant,
    annotation: &AnnotationResponse,
) -> AnnotationResult {
    let scores = annotation.scores();
    let score_status = ScoreStatus::from_scores(scores.revel, scores.splice_ai);

    match score_status {
        ScoreStatus::NoAnnotationAvailable => {
            warn!("VEP returned no REVEL or SpliceAI score for {}", variant)
        }
        _ => info!(
            "REVEL score: {}, SpliceAI score: {}",
            Availability::from(scores.revel),
            Availability::from(scores.splice_ai)
        ),
    }

    let genomic_hgvs = resolved.genomic_hgvs();
    // Symbol and ID always come from the same source
    let (gene_symbol, gene_id) = if scores.gene_symbol.is_some() || scores.gene_id.is_some() {
        (scores.gene_symbol, scores.gene_id)
    } else {
        let record = resolved.record;
        (
            record.gene_symbol.filter(|symbol| !symbol.trim().is_empty()),
            record.gene_ids.and_then(|ids| ids.ensembl_gene_id),
        )
    };

    AnnotationResult {
        variant: variant.to_string(),
        genome_build: resolved.build,
        namespace: resolved.namespace,
        genomic_hgvs,
        gene_symbol: gene_symbol.into(),
        gene_id: gene_id.into(),
        revel_score: scores.revel.into(),
        splice_ai_score: scores.splice_ai.into(),
        most_severe_consequence: scores.most_severe_consequence.into(),
        score_status,
    }
}
