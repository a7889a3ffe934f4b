//! Configuration for variant-annotator
//!
//! Every setting has a default that targets the public VariantValidator and
//! Ensembl REST services, so a configuration file is optional. A file only
//! needs the keys it overrides.
//!
//! # Example Configuration
//!
//! ```toml
//! [validator]
//! base_url = "https://rest.variantvalidator.org/VariantValidator"
//!
//! [vep]
//! grch37_url = "https://grch37.rest.ensembl.org/vep/human/hgvs"
//!
//! [http]
//! timeout_seconds = 60
//!
//! [routing]
//! namespace = "strict"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::AnnotateError;
use crate::namespace::NamespaceRouting;

/// Main annotator configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnnotatorConfig {
    /// VariantValidator endpoints
    pub validator: ValidatorConfig,
    /// Ensembl VEP endpoints
    pub vep: VepConfig,
    /// HTTP transport settings
    pub http: HttpConfig,
    /// Transcript namespace routing
    pub routing: RoutingConfig,
}

/// VariantValidator endpoint configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Service root (default: "https://rest.variantvalidator.org/VariantValidator")
    pub base_url: String,
    /// Path segment for RefSeq transcripts (default: "variantvalidator")
    pub refseq_path: String,
    /// Path segment for Ensembl transcripts (default: "variantvalidator_ensembl")
    pub ensembl_path: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            base_url: "https://rest.variantvalidator.org/VariantValidator".to_string(),
            refseq_path: "variantvalidator".to_string(),
            ensembl_path: "variantvalidator_ensembl".to_string(),
        }
    }
}

/// Ensembl VEP endpoint configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct VepConfig {
    /// HGVS endpoint on the current assembly host
    pub grch38_url: String,
    /// HGVS endpoint on the legacy GRCh37 host
    pub grch37_url: String,
}

impl Default for VepConfig {
    fn default() -> Self {
        Self {
            grch38_url: "https://rest.ensembl.org/vep/human/hgvs".to_string(),
            grch37_url: "https://grch37.rest.ensembl.org/vep/human/hgvs".to_string(),
        }
    }
}

/// HTTP transport configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds (default: none, wait for the server)
    pub timeout_seconds: Option<u64>,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: None,
            user_agent: concat!("variant-annotator/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Transcript namespace routing configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// "substring" (default) or "strict"
    pub namespace: NamespaceRouting,
}

impl AnnotatorConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, AnnotateError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnnotateError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML content
    pub fn from_toml(content: &str) -> Result<Self, AnnotateError> {
        toml::from_str(content).map_err(|e| AnnotateError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file
    pub fn to_file(&self, path: &Path) -> Result<(), AnnotateError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| AnnotateError::Config(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| {
            AnnotateError::Config(format!("Failed to write {}: {}", path.display(), e))
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), AnnotateError> {
        check_url("validator.base_url", &self.validator.base_url)?;
        check_path_segment("validator.refseq_path", &self.validator.refseq_path)?;
        check_path_segment("validator.ensembl_path", &self.validator.ensembl_path)?;
        check_url("vep.grch38_url", &self.vep.grch38_url)?;
        check_url("vep.grch37_url", &self.vep.grch37_url)?;

        if self.http.timeout_seconds == Some(0) {
            return Err(AnnotateError::Config(
                "http.timeout_seconds must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

fn check_url(key: &str, url: &str) -> Result<(), AnnotateError> {
    let invalid = |reason: String| {
        AnnotateError::Config(format!(
            "{} must be an absolute http(s) URL, got '{}': {}",
            key, url, reason
        ))
    };

    let parsed = Url::parse(url).map_err(|e| invalid(e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
    }
    match parsed.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => return Err(invalid("missing host".to_string())),
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(invalid("query and fragment are not allowed".to_string()));
    }
    Ok(())
}

fn check_path_segment(key: &str, segment: &str) -> Result<(), AnnotateError> {
    if segment.is_empty() || segment.contains('/') {
        return Err(AnnotateError::Config(format!(
            "{} must be a single non-empty path segment, got '{}'",
            key, segment
        )));
    }
    Ok(())
}
