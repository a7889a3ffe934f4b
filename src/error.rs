//! Error types for variant-annotator
//!
//! Every external call returns a typed result so that the pipeline can tell
//! "the service said there is no data" apart from "the service could not be
//! reached". Errors carry:
//! - an [`ErrorCode`] for programmatic handling
//! - the service and URL involved, for transport failures
//! - the first missing path segment, for malformed validation responses

use std::fmt;

use thiserror::Error;

use crate::build::GenomeBuild;

/// Error codes for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // Input errors (E1xxx)
    /// Genome build is not GRCh37 or GRCh38
    InvalidGenomeBuild = 1001,
    /// Transcript accession is neither RefSeq nor Ensembl
    UnrecognizedTranscript = 1002,

    // Service errors (E2xxx)
    /// Service could not be reached or timed out
    ServiceUnreachable = 2001,
    /// Service answered with a non-success status
    ServiceStatus = 2002,
    /// Service answered with a body that is not JSON
    InvalidJson = 2003,

    // Response errors (E3xxx)
    /// Validation response lacks the expected nested path
    MalformedValidationResponse = 3001,

    // Configuration errors (E9xxx)
    /// Invalid or unreadable configuration
    Config = 9001,
}

impl ErrorCode {
    /// Get the error code as a string (e.g., "E1001")
    pub fn as_str(&self) -> String {
        format!("E{:04}", *self as u16)
    }

    /// Get a brief description of this error code
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::InvalidGenomeBuild => "invalid genome build",
            ErrorCode::UnrecognizedTranscript => "unrecognized transcript namespace",
            ErrorCode::ServiceUnreachable => "service unreachable",
            ErrorCode::ServiceStatus => "service returned an error status",
            ErrorCode::InvalidJson => "service returned invalid JSON",
            ErrorCode::MalformedValidationResponse => "malformed validation response",
            ErrorCode::Config => "configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// External service involved in a failed request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// VariantValidator REST API
    VariantValidator,
    /// Ensembl VEP REST API
    Vep,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::VariantValidator => write!(f, "VariantValidator"),
            Service::Vep => write!(f, "VEP"),
        }
    }
}

/// First segment of the expected validation response path that was not found
///
/// The expected path is
/// `response[variant]["primary_assembly_loci"][build]["hgvs_genomic_description"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingPath {
    /// The response body is not a JSON object
    Root,
    /// No entry keyed by the exact variant description
    Variant,
    /// The variant entry has no `primary_assembly_loci` object
    PrimaryAssemblyLoci,
    /// No locus for the requested build key (`grch37`/`grch38`)
    Build(&'static str),
    /// The locus has no non-empty `hgvs_genomic_description` string
    GenomicDescription(&'static str),
}

impl fmt::Display for MissingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingPath::Root => write!(f, "top-level JSON object"),
            MissingPath::Variant => write!(f, "variant entry"),
            MissingPath::PrimaryAssemblyLoci => write!(f, "primary_assembly_loci"),
            MissingPath::Build(key) => write!(f, "primary_assembly_loci.{}", key),
            MissingPath::GenomicDescription(key) => {
                write!(f, "primary_assembly_loci.{}.hgvs_genomic_description", key)
            }
        }
    }
}

/// Failure of a single HTTP GET at the transport layer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    /// Connection could not be established
    #[error("connection failed: {0}")]
    Connect(String),

    /// Connect or read timeout elapsed
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Non-2xx response
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body could not be parsed as JSON
    #[error("response body is not valid JSON: {0}")]
    InvalidJson(String),

    /// Any other client-side failure (URL building, TLS, body decoding)
    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Main error type for annotation runs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnnotateError {
    /// Genome build is not one of the supported assemblies
    #[error("Invalid genome build '{0}'. Choose from ['GRCh37', 'GRCh38'].")]
    InvalidGenomeBuild(String),

    /// Variant description does not start with a RefSeq or Ensembl transcript
    #[error("Unrecognized transcript in '{0}': expected an NM_/NR_ or ENST accession")]
    UnrecognizedTranscript(String),

    /// Request to an external service failed
    #[error("{service} request failed for {url}: {source}")]
    Transport {
        service: Service,
        url: String,
        #[source]
        source: TransportError,
    },

    /// Validation response does not contain the genomic description
    #[error(
        "Invalid response format for variant {variant} ({build}): missing {missing}{}",
        warning_suffix(.warnings)
    )]
    MalformedValidationResponse {
        variant: String,
        build: GenomeBuild,
        missing: MissingPath,
        /// Validation warnings the service reported for the variant
        warnings: Vec<String>,
    },

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AnnotateError {
    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AnnotateError::InvalidGenomeBuild(_) => ErrorCode::InvalidGenomeBuild,
            AnnotateError::UnrecognizedTranscript(_) => ErrorCode::UnrecognizedTranscript,
            AnnotateError::Transport { source, .. } => match source {
                TransportError::Status { .. } => ErrorCode::ServiceStatus,
                TransportError::InvalidJson(_) => ErrorCode::InvalidJson,
                _ => ErrorCode::ServiceUnreachable,
            },
            AnnotateError::MalformedValidationResponse { .. } => {
                ErrorCode::MalformedValidationResponse
            }
            AnnotateError::Config(_) => ErrorCode::Config,
        }
    }

    /// A short suggestion for the user, where one applies
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            AnnotateError::InvalidGenomeBuild(_) => Some("use exactly GRCh37 or GRCh38"),
            AnnotateError::UnrecognizedTranscript(_) => {
                Some("describe the variant on a transcript, e.g. NM_000088.3:c.589G>T")
            }
            AnnotateError::MalformedValidationResponse { .. } => {
                Some("check that the variant is valid for the selected genome build")
            }
            _ => None,
        }
    }

    /// Whether the failure happened before any network call was made
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AnnotateError::InvalidGenomeBuild(_) | AnnotateError::UnrecognizedTranscript(_)
        )
    }

    /// Get a formatted error with code and hint
    pub fn detailed_message(&self) -> String {
        let mut message = format!("[{}] {}", self.code(), self);
        if let Some(hint) = self.hint() {
            message.push_str("\n\nHint: ");
            message.push_str(hint);
        }
        message
    }
}

fn warning_suffix(warnings: &[String]) -> String {
    if warnings.is_empty() {
        String::new()
    } else {
        format!(" (VariantValidator: {})", warnings.join("; "))
    }
}
