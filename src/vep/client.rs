//! Ensembl VEP REST client

use std::sync::Arc;

use tracing::debug;

use super::types::AnnotationResponse;
use crate::build::GenomeBuild;
use crate::config::VepConfig;
use crate::error::{AnnotateError, Service};
use crate::transport::JsonTransport;

/// Options appended to every VEP HGVS request
const VEP_OPTIONS: &str = "revel=true;SpliceAI=true;merged=true;content-type=application/json";

/// Client for the VEP `vep/human/hgvs` endpoint on the GRCh37 and GRCh38 hosts
#[derive(Clone)]
pub struct VepClient {
    transport: Arc<dyn JsonTransport>,
    grch38_url: String,
    grch37_url: String,
}

impl VepClient {
    /// Create a client that sends requests through `transport`
    pub fn new(transport: Arc<dyn JsonTransport>, config: &VepConfig) -> Self {
        Self {
            transport,
            grch38_url: config.grch38_url.trim_end_matches('/').to_string(),
            grch37_url: config.grch37_url.trim_end_matches('/').to_string(),
        }
    }

    /// Annotate a GRCh38 genomic description on the current host
    pub async fn predict_grch38(
        &self,
        genomic_hgvs: &str,
    ) -> Result<AnnotationResponse, AnnotateError> {
        self.fetch(self.url_for(GenomeBuild::GRCh38, genomic_hgvs))
            .await
    }

    /// Annotate a GRCh37 genomic description on the legacy host
    pub async fn predict_grch37(
        &self,
        genomic_hgvs: &str,
    ) -> Result<AnnotationResponse, AnnotateError> {
        self.fetch(self.url_for(GenomeBuild::GRCh37, genomic_hgvs))
            .await
    }

    /// Request URL for a genomic description on `build`
    pub fn url_for(&self, build: GenomeBuild, genomic_hgvs: &str) -> String {
        let base = match build {
            GenomeBuild::GRCh37 => &self.grch37_url,
            GenomeBuild::GRCh38 => &self.grch38_url,
        };
        format!(
            "{}/{}?{}",
            base,
            urlencoding::encode(genomic_hgvs),
            VEP_OPTIONS
        )
    }

    async fn fetch(&self, url: String) -> Result<AnnotationResponse, AnnotateError> {
        debug!("Querying VEP: {}", url);
        let value = self
            .transport
            .get_json(&url)
            .await
            .map_err(|source| AnnotateError::Transport {
                service: Service::Vep,
                url,
                source,
            })?;
        Ok(AnnotationResponse::from(value))
    }
}

impl std::fmt::Debug for VepClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VepClient")
            .field("grch38_url", &self.grch38_url)
            .field("grch37_url", &self.grch37_url)
            .finish()
    }
}
