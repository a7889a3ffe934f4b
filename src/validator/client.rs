//! VariantValidator REST client

use std::sync::Arc;

use tracing::debug;

use super::types::ValidationResponse;
use crate::build::GenomeBuild;
use crate::config::ValidatorConfig;
use crate::error::{AnnotateError, Service};
use crate::namespace::TranscriptNamespace;
use crate::transport::JsonTransport;

/// Client for the VariantValidator `variantvalidator` and
/// `variantvalidator_ensembl` endpoints
#[derive(Clone)]
pub struct ValidatorClient {
    transport: Arc<dyn JsonTransport>,
    base_url: String,
    refseq_path: String,
    ensembl_path: String,
}

impl ValidatorClient {
    /// Create a client that sends requests through `transport`
    pub fn new(transport: Arc<dyn JsonTransport>, config: &ValidatorConfig) -> Self {
        Self {
            transport,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            refseq_path: config.refseq_path.clone(),
            ensembl_path: config.ensembl_path.clone(),
        }
    }

    /// Validate a variant described on a RefSeq transcript
    pub async fn validate_refseq(
        &self,
        variant: &str,
        build: GenomeBuild,
    ) -> Result<ValidationResponse, AnnotateError> {
        self.fetch(self.url(&self.refseq_path, variant, build)).await
    }

    /// Validate a variant described on an Ensembl transcript
    pub async fn validate_ensembl(
        &self,
        variant: &str,
        build: GenomeBuild,
    ) -> Result<ValidationResponse, AnnotateError> {
        self.fetch(self.url(&self.ensembl_path, variant, build)).await
    }

    /// Request URL for a variant in the given namespace.
    ///
    /// Returns `None` for [`TranscriptNamespace::Unrecognized`].
    pub fn url_for(
        &self,
        namespace: TranscriptNamespace,
        variant: &str,
        build: GenomeBuild,
    ) -> Option<String> {
        match namespace {
            TranscriptNamespace::RefSeq => Some(self.url(&self.refseq_path, variant, build)),
            TranscriptNamespace::Ensembl => Some(self.url(&self.ensembl_path, variant, build)),
            TranscriptNamespace::Unrecognized => None,
        }
    }

    fn url(&self, endpoint: &str, variant: &str, build: GenomeBuild) -> String {
        format!(
            "{}/{}/{}/{}/all?content-type=application%2Fjson",
            self.base_url,
            endpoint,
            urlencoding::encode(build.as_str()),
            urlencoding::encode(variant)
        )
    }

    async fn fetch(&self, url: String) -> Result<ValidationResponse, AnnotateError> {
        debug!("Querying VariantValidator: {}", url);
        let value = self
            .transport
            .get_json(&url)
            .await
            .map_err(|source| AnnotateError::Transport {
                service: Service::VariantValidator,
                url,
                source,
            })?;
        Ok(ValidationResponse::from(value))
    }
}

impl std::fmt::Debug for ValidatorClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorClient")
            .field("base_url", &self.base_url)
            .field("refseq_path", &self.refseq_path)
            .field("ensembl_path", &self.ensembl_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        response: Option<Value>,
        urls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl JsonTransport for Recorder {
        async fn get_json(&self, url: &str) -> Result<Value, TransportError> {
            self.urls.lock().unwrap().push(url.to_string());
            self.response.clone().ok_or(TransportError::Status {
                status: 503,
                body: String::new(),
            })
        }
    }

    fn client(recorder: Arc<Recorder>) -> ValidatorClient {
        ValidatorClient::new(recorder, &ValidatorConfig::default())
    }

    #[test]
    fn test_refseq_url() {
        let client = client(Arc::new(Recorder::default()));
        assert_eq!(
            client
                .url_for(TranscriptNamespace::RefSeq, "NM_000088.3:c.589G>T", GenomeBuild::GRCh38)
                .unwrap(),
            "https://rest.variantvalidator.org/VariantValidator/variantvalidator/GRCh38/\
             NM_000088.3%3Ac.589G%3ET/all?content-type=application%2Fjson"
        );
    }

    #[test]
    fn test_ensembl_url() {
        let client = client(Arc::new(Recorder::default()));
        assert_eq!(
            client
                .url_for(
                    TranscriptNamespace::Ensembl,
                    "ENST00000225964.10:c.589G>T",
                    GenomeBuild::GRCh37
                )
                .unwrap(),
            "https://rest.variantvalidator.org/VariantValidator/variantvalidator_ensembl/GRCh37/\
             ENST00000225964.10%3Ac.589G%3ET/all?content-type=application%2Fjson"
        );
        assert!(client
            .url_for(TranscriptNamespace::Unrecognized, "x", GenomeBuild::GRCh37)
            .is_none());
    }

    #[test]
    fn test_trailing_slash_in_base_url() {
        let config = ValidatorConfig {
            base_url: "http://localhost:8000/VariantValidator/".to_string(),
            ..ValidatorConfig::default()
        };
        let client = ValidatorClient::new(Arc::new(Recorder::default()), &config);
        let url = client
            .url_for(TranscriptNamespace::RefSeq, "NM_000088.3:c.589G>T", GenomeBuild::GRCh38)
            .unwrap();
        assert!(url.starts_with("http://localhost:8000/VariantValidator/variantvalidator/GRCh38/"));
    }

    #[tokio::test]
    async fn test_validate_refseq_uses_refseq_endpoint() {
        let recorder = Arc::new(Recorder {
            response: Some(json!({
                "NM_000088.3:c.589G>T": {"validation_warnings": ["TranscriptVersionWarning"]}
            })),
            ..Recorder::default()
        });
        let response = client(recorder.clone())
            .validate_refseq("NM_000088.3:c.589G>T", GenomeBuild::GRCh38)
            .await
            .unwrap();
        assert_eq!(
            response.warnings("NM_000088.3:c.589G>T"),
            vec!["TranscriptVersionWarning".to_string()]
        );

        let urls = recorder.urls.lock().unwrap();
        assert_eq!(urls.len(), 1);
        assert!(urls[0].contains("/variantvalidator/GRCh38/"));
    }

    #[tokio::test]
    async fn test_transport_failure_is_propagated() {
        let recorder = Arc::new(Recorder::default());
        let err = client(recorder)
            .validate_ensembl("ENST00000225964.10:c.589G>T", GenomeBuild::GRCh38)
            .await
            .unwrap_err();
        match err {
            AnnotateError::Transport {
                service, source, url,
            } => {
                assert_eq!(service, Service::VariantValidator);
                assert!(url.contains("/variantvalidator_ensembl/"));
                assert!(matches!(source, TransportError::Status { status: 503, .. }));
            }
            other => panic!("expected transport error, got {:?}", other),
        }
    }
}
