//! Shared helpers for integration tests

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use variant_annotator::{Annotator, AnnotatorConfig, JsonTransport, TransportError};

pub const VV_REFSEQ: &str = "https://rest.variantvalidator.org/VariantValidator/variantvalidator/";
pub const VV_ENSEMBL: &str =
    "https://rest.variantvalidator.org/VariantValidator/variantvalidator_ensembl/";
pub const VEP_GRCH38: &str = "https://rest.ensembl.org/vep/human/hgvs/";
pub const VEP_GRCH37: &str = "https://grch37.rest.ensembl.org/vep/human/hgvs/";

/// Load a JSON fixture from `tests/fixtures/`
pub fn fixture(name: &str) -> Value {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Transport that answers from a list of URL-prefix routes and records every
/// requested URL.
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<Vec<(String, Result<Value, TransportError>)>>,
    calls: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Answer requests starting with `prefix` with `body`
    pub fn respond(&self, prefix: &str, body: Value) -> &Self {
        self.routes
            .lock()
            .unwrap()
            .push((prefix.to_string(), Ok(body)));
        self
    }

    /// Fail requests starting with `prefix` with `error`
    pub fn fail(&self, prefix: &str, error: TransportError) -> &Self {
        self.routes
            .lock()
            .unwrap()
            .push((prefix.to_string(), Err(error)));
        self
    }

    /// URLs requested so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of requests whose URL starts with `prefix`
    pub fn calls_to(&self, prefix: &str) -> usize {
        self.calls()
            .iter()
            .filter(|url| url.starts_with(prefix))
            .count()
    }
}

#[async_trait]
impl JsonTransport for MockTransport {
    async fn get_json(&self, url: &str) -> Result<Value, TransportError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.routes
            .lock()
            .unwrap()
            .iter()
            .find(|(prefix, _)| url.starts_with(prefix.as_str()))
            .map(|(_, response)| response.clone())
            .unwrap_or_else(|| {
                Err(TransportError::Status {
                    status: 404,
                    body: format!("no mock route for {}", url),
                })
            })
    }
}

/// Annotator with the default configuration wired to `transport`
pub fn annotator(transport: &Arc<MockTransport>) -> Annotator {
    annotator_with(transport, &AnnotatorConfig::default())
}

/// Annotator with `config` wired to `transport`
pub fn annotator_with(transport: &Arc<MockTransport>, config: &AnnotatorConfig) -> Annotator {
    Annotator::new(transport.clone(), config)
}
