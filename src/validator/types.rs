//! VariantValidator response types
//!
//! The service answers with a JSON object keyed by the submitted variant
//! description. Besides the variant entry it also carries bookkeeping keys
//! (`flag`, `metadata`, `validation_warning_1`, ...) whose shapes differ, so
//! the outer object is kept as loose JSON and only the requested entry is
//! decoded into [`ValidatedVariant`].
//!
//! Every field of the decoded entry is optional and tolerant of unexpected
//! JSON types: a field with the wrong type reads as absent, and extraction
//! reports which segment of the expected path was missing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::build::GenomeBuild;
use crate::error::MissingPath;
use crate::json::lenient;

/// Raw VariantValidator response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationResponse {
    body: Value,
}

impl From<Value> for ValidationResponse {
    fn from(body: Value) -> Self {
        Self { body }
    }
}

impl ValidationResponse {
    /// Decode the entry keyed exactly by `variant`.
    ///
    /// The key comparison is case- and format-sensitive.
    pub fn record(&self, variant: &str) -> Option<ValidatedVariant> {
        self.body
            .as_object()?
            .get(variant)
            .and_then(|entry| ValidatedVariant::deserialize(entry).ok())
    }

    /// Extract `response[variant]["primary_assembly_loci"][build]["hgvs_genomic_description"]`.
    pub fn genomic_description(
        &self,
        variant: &str,
        build: GenomeBuild,
    ) -> Result<String, MissingPath> {
        if !self.body.is_object() {
            return Err(MissingPath::Root);
        }
        self.record(variant)
            .ok_or(MissingPath::Variant)?
            .genomic_description(build)
    }

    /// Validation warnings reported for `variant`.
    ///
    /// When the description could not be validated the service files its
    /// warnings under `validation_warning_<n>` keys instead of the variant
    /// key; those are included as well. Duplicates are dropped.
    pub fn warnings(&self, variant: &str) -> Vec<String> {
        let Some(entries) = self.body.as_object() else {
            return Vec::new();
        };

        let mut warnings: Vec<String> = Vec::new();
        let keyed = entries
            .iter()
            .filter(|(key, _)| key.as_str() == variant || key.starts_with("validation_warning"))
            .filter_map(|(_, entry)| ValidatedVariant::deserialize(entry).ok())
            .flat_map(|record| record.validation_warnings.unwrap_or_default());
        for warning in keyed {
            if !warning.trim().is_empty() && !warnings.contains(&warning) {
                warnings.push(warning);
            }
        }
        warnings
    }
}

/// One validated variant entry
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ValidatedVariant {
    /// Genomic loci on the primary assembly, keyed by lower-cased build.
    ///
    /// Loci are kept as raw JSON so that one malformed entry does not hide
    /// the others.
    #[serde(default, deserialize_with = "lenient")]
    pub primary_assembly_loci: Option<BTreeMap<String, Value>>,
    /// HGNC gene symbol
    #[serde(default, deserialize_with = "lenient")]
    pub gene_symbol: Option<String>,
    /// Gene identifiers in other databases
    #[serde(default, deserialize_with = "lenient")]
    pub gene_ids: Option<GeneIds>,
    /// Warnings raised while validating the description
    #[serde(default, deserialize_with = "lenient")]
    pub validation_warnings: Option<Vec<String>>,
}

impl ValidatedVariant {
    /// Decode the locus on `build`, if present and an object
    pub fn locus(&self, build: GenomeBuild) -> Option<AssemblyLocus> {
        self.primary_assembly_loci
            .as_ref()?
            .get(build.key())
            .filter(|locus| locus.is_object())
            .and_then(|locus| AssemblyLocus::deserialize(locus).ok())
    }

    /// Genomic HGVS description of this variant on `build`
    pub fn genomic_description(&self, build: GenomeBuild) -> Result<String, MissingPath> {
        let key = build.key();
        if self.primary_assembly_loci.is_none() {
            return Err(MissingPath::PrimaryAssemblyLoci);
        }
        self.locus(build)
            .ok_or(MissingPath::Build(key))?
            .hgvs_genomic_description
            .filter(|description| !description.trim().is_empty())
            .ok_or(MissingPath::GenomicDescription(key))
    }
}

/// A locus on one genome build
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AssemblyLocus {
    /// Genomic HGVS description, e.g. "NC_000017.11:g.50198002C>A"
    #[serde(default, deserialize_with = "lenient")]
    pub hgvs_genomic_description: Option<String>,
}

/// Gene identifiers reported by VariantValidator
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GeneIds {
    #[serde(default, deserialize_with = "lenient")]
    pub hgnc_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub entrez_gene_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub ensembl_gene_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const VARIANT: &str = "NM_000088.3:c.589G>T";

    fn response(value: Value) -> ValidationResponse {
        ValidationResponse::from(value)
    }

    #[test]
    fn test_extracts_requested_build() {
        let response = response(json!({
            "flag": "gene_variant",
            VARIANT: {
                "gene_symbol": "COL1A1",
                "primary_assembly_loci": {
                    "grch37": {"hgvs_genomic_description": "NC_000017.10:g.48275363C>A"},
                    "grch38": {"hgvs_genomic_description": "NC_000017.11:g.50198002C>A"}
                }
            },
            "metadata": {"variantvalidator_version": "3.0.2"}
        }));

        assert_eq!(
            response.genomic_description(VARIANT, GenomeBuild::GRCh38),
            Ok("NC_000017.11:g.50198002C>A".to_string())
        );
        assert_eq!(
            response.genomic_description(VARIANT, GenomeBuild::GRCh37),
            Ok("NC_000017.10:g.48275363C>A".to_string())
        );
    }

    #[test]
    fn test_non_object_is_missing_root() {
        for body in [json!([1, 2]), Value::Null, json!("error")] {
            let response = response(body);
            assert_eq!(
                response.genomic_description(VARIANT, GenomeBuild::GRCh38),
                Err(MissingPath::Root)
            );
            assert!(response.warnings(VARIANT).is_empty());
        }
    }

    #[test]
    fn test_variant_key_is_exact() {
        let response = response(json!({
            "nm_000088.3:c.589G>T": {
                "primary_assembly_loci": {
                    "grch38": {"hgvs_genomic_description": "NC_000017.11:g.50198002C>A"}
                }
            }
        }));
        assert_eq!(
            response.genomic_description(VARIANT, GenomeBuild::GRCh38),
            Err(MissingPath::Variant)
        );
    }

    #[test]
    fn test_missing_primary_assembly_loci() {
        let response = response(json!({VARIANT: {"gene_symbol": "COL1A1"}}));
        assert_eq!(
            response.genomic_description(VARIANT, GenomeBuild::GRCh38),
            Err(MissingPath::PrimaryAssemblyLoci)
        );
    }

    #[test]
    fn test_wrong_type_reads_as_missing() {
        let response = response(json!({VARIANT: {"primary_assembly_loci": "unavailable"}}));
        assert_eq!(
            response.genomic_description(VARIANT, GenomeBuild::GRCh38),
            Err(MissingPath::PrimaryAssemblyLoci)
        );

        let response = self::response(json!({VARIANT: "not an object"}));
        assert_eq!(
            response.genomic_description(VARIANT, GenomeBuild::GRCh38),
            Err(MissingPath::Variant)
        );
    }

    #[test]
    fn test_other_build_only() {
        let response = response(json!({
            VARIANT: {
                "primary_assembly_loci": {
                    "grch38": {"hgvs_genomic_description": "NC_000017.11:g.50198002C>A"}
                }
            }
        }));
        assert_eq!(
            response.genomic_description(VARIANT, GenomeBuild::GRCh37),
            Err(MissingPath::Build("grch37"))
        );
    }

    #[test]
    fn test_empty_or_null_description() {
        for description in [json!(""), json!("  "), Value::Null, json!(42)] {
            let response = response(json!({
                VARIANT: {
                    "primary_assembly_loci": {
                        "grch38": {"hgvs_genomic_description": description}
                    }
                }
            }));
            assert_eq!(
                response.genomic_description(VARIANT, GenomeBuild::GRCh38),
                Err(MissingPath::GenomicDescription("grch38"))
            );
        }
    }

    #[test]
    fn test_record_gene_fields() {
        let response = response(json!({
            VARIANT: {
                "gene_symbol": "COL1A1",
                "gene_ids": {"hgnc_id": "HGNC:2197", "entrez_gene_id": "1277", "ensembl_gene_id": "ENSG00000108821"},
                "validation_warnings": []
            }
        }));
        let record = response.record(VARIANT).unwrap();
        assert_eq!(record.gene_symbol.as_deref(), Some("COL1A1"));
        let ids = record.gene_ids.unwrap();
        assert_eq!(ids.hgnc_id.as_deref(), Some("HGNC:2197"));
        assert_eq!(ids.ensembl_gene_id.as_deref(), Some("ENSG00000108821"));
        assert_eq!(record.validation_warnings, Some(vec![]));
    }

    #[test]
    fn test_malformed_sibling_locus_is_ignored() {
        let response = response(json!({
            VARIANT: {
                "primary_assembly_loci": {
                    "hg19": null,
                    "hg38": "unavailable",
                    "grch38": {"hgvs_genomic_description": "NC_000017.11:g.50198002C>A"}
                }
            }
        }));
        assert_eq!(
            response.genomic_description(VARIANT, GenomeBuild::GRCh38),
            Ok("NC_000017.11:g.50198002C>A".to_string())
        );
    }

    #[test]
    fn test_non_object_requested_locus() {
        let response = response(json!({
            VARIANT: {"primary_assembly_loci": {"grch37": null, "grch38": []}}
        }));
        assert_eq!(
            response.genomic_description(VARIANT, GenomeBuild::GRCh37),
            Err(MissingPath::Build("grch37"))
        );
        assert_eq!(
            response.genomic_description(VARIANT, GenomeBuild::GRCh38),
            Err(MissingPath::Build("grch38"))
        );
    }

    #[test]
    fn test_warnings_from_variant_and_warning_entries() {
        let response = response(json!({
            "flag": "warning",
            "validation_warning_1": {
                "validation_warnings": [
                    "NM_000088.3:c.5890G>T: Variant reference (G) does not agree with reference sequence (C)"
                ]
            },
            VARIANT: {"validation_warnings": ["Invalid variant description", ""]},
            "validation_warning_2": {"validation_warnings": ["Invalid variant description"]},
            "metadata": {"variantvalidator_version": "3.0.2"}
        }));

        let warnings = response.warnings(VARIANT);
        assert_eq!(warnings.len(), 2);
        assert!(warnings.contains(&"Invalid variant description".to_string()));
        assert!(warnings[0].contains("does not agree") || warnings[1].contains("does not agree"));
    }
}
