//! Property-based tests for build validation and namespace routing

mod common;

use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;
use serde_json::json;

use common::{annotator, MockTransport, VEP_GRCH37, VEP_GRCH38, VV_ENSEMBL, VV_REFSEQ};
use variant_annotator::{AnnotateError, GenomeBuild, NamespaceRouting, TranscriptNamespace};

// =============================================================================
// Strategies
// =============================================================================

/// Generate RefSeq transcript accessions with optional version
fn refseq_accession() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just("NM_"), Just("NR_")],
        "[0-9]{6,9}",
        proptest::option::of(1u32..30),
    )
        .prop_map(|(prefix, number, version)| match version {
            Some(v) => format!("{}{}.{}", prefix, number, v),
            None => format!("{}{}", prefix, number),
        })
}

/// Generate Ensembl transcript accessions with optional version
fn ensembl_accession() -> impl Strategy<Value = String> {
    ("[0-9]{11}", proptest::option::of(1u32..30)).prop_map(|(number, version)| match version {
        Some(v) => format!("ENST{}.{}", number, v),
        None => format!("ENST{}", number),
    })
}

/// Generate simple coding substitutions
fn coding_edit() -> impl Strategy<Value = String> {
    (1u32..10_000, "[ACGT]", "[ACGT]").prop_map(|(pos, r, a)| format!("c.{}{}>{}", pos, r, a))
}

fn run<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

// =============================================================================
// Genome build
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Any build string other than GRCh37/GRCh38 fails without a network call
    #[test]
    fn prop_invalid_build_rejected(build in "\\PC{0,12}") {
        prop_assume!(build != "GRCh37" && build != "GRCh38");

        let transport = MockTransport::new();
        let err = run(annotator(&transport).annotate_variant("NM_000088.3:c.589G>T", &build))
            .unwrap_err();

        prop_assert_eq!(err, AnnotateError::InvalidGenomeBuild(build.clone()));
        prop_assert!(transport.calls().is_empty());
    }

    /// Case variants of valid builds are still rejected
    #[test]
    fn prop_build_is_case_sensitive(build in prop_oneof![Just("GRCh37"), Just("GRCh38")], upper in any::<bool>()) {
        let candidate = if upper { build.to_uppercase() } else { build.to_lowercase() };
        prop_assert!(candidate.parse::<GenomeBuild>().is_err());
    }
}

// =============================================================================
// Namespace routing
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn prop_refseq_classified(accession in refseq_accession(), edit in coding_edit()) {
        let variant = format!("{}:{}", accession, edit);
        prop_assert_eq!(TranscriptNamespace::classify(&variant), TranscriptNamespace::RefSeq);
        prop_assert_eq!(NamespaceRouting::Substring.route(&variant), TranscriptNamespace::RefSeq);
    }

    #[test]
    fn prop_ensembl_classified(accession in ensembl_accession(), edit in coding_edit()) {
        let variant = format!("{}:{}", accession, edit);
        prop_assert_eq!(TranscriptNamespace::classify(&variant), TranscriptNamespace::Ensembl);
        prop_assert_eq!(
            NamespaceRouting::Substring.route(&variant),
            TranscriptNamespace::Ensembl
        );
    }

    /// Substring routing never reports an unrecognized namespace
    #[test]
    fn prop_substring_routing_total(variant in "\\PC{0,40}") {
        prop_assert_ne!(
            NamespaceRouting::Substring.route(&variant),
            TranscriptNamespace::Unrecognized
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Ensembl descriptors only ever reach the Ensembl validation endpoint,
    /// and RefSeq descriptors only the RefSeq one
    #[test]
    fn prop_validation_endpoint_matches_namespace(
        ensembl in any::<bool>(),
        refseq in refseq_accession(),
        enst in ensembl_accession(),
        edit in coding_edit(),
        grch37 in any::<bool>(),
    ) {
        let variant = if ensembl {
            format!("{}:{}", enst, edit)
        } else {
            format!("{}:{}", refseq, edit)
        };
        let build = if grch37 { "GRCh37" } else { "GRCh38" };
        let locus_key = if grch37 { "grch37" } else { "grch38" };

        let transport = MockTransport::new();
        let validation = json!({
            variant.as_str(): {
                "primary_assembly_loci": {
                    locus_key: {"hgvs_genomic_description": "NC_000017.11:g.50198002C>A"}
                }
            }
        });
        transport
            .respond(VV_REFSEQ, validation.clone())
            .respond(VV_ENSEMBL, validation)
            .respond(VEP_GRCH37, json!([]))
            .respond(VEP_GRCH38, json!([]));

        let result = run(annotator(&transport).annotate_variant(&variant, build)).unwrap();

        if ensembl {
            prop_assert_eq!(transport.calls_to(VV_ENSEMBL), 1);
            prop_assert_eq!(transport.calls_to(VV_REFSEQ), 0);
        } else {
            prop_assert_eq!(transport.calls_to(VV_REFSEQ), 1);
            prop_assert_eq!(transport.calls_to(VV_ENSEMBL), 0);
        }
        prop_assert_eq!(result.genomic_hgvs.len(), 1);
        let (used, unused) = if grch37 { (VEP_GRCH37, VEP_GRCH38) } else { (VEP_GRCH38, VEP_GRCH37) };
        prop_assert_eq!(transport.calls_to(used), 1);
        prop_assert_eq!(transport.calls_to(unused), 0);
    }
}

// =============================================================================
// Substring routing through the pipeline
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any description containing `ENST` is validated by the Ensembl endpoint only
    #[test]
    fn prop_enst_anywhere_goes_to_ensembl(prefix in "\\PC{0,20}", suffix in "\\PC{0,20}") {
        let variant = format!("{}ENST{}", prefix, suffix);

        let transport = MockTransport::new();
        let _ = run(annotator(&transport).annotate_variant(&variant, "GRCh38"));

        prop_assert_eq!(transport.calls_to(VV_ENSEMBL), 1);
        prop_assert_eq!(transport.calls_to(VV_REFSEQ), 0);
    }

    /// Any description without `ENST` is validated by the RefSeq endpoint only
    #[test]
    fn prop_without_enst_goes_to_refseq(variant in "\\PC{0,40}") {
        prop_assume!(!variant.contains("ENST"));

        let transport = MockTransport::new();
        let _ = run(annotator(&transport).annotate_variant(&variant, "GRCh37"));

        prop_assert_eq!(transport.calls_to(VV_REFSEQ), 1);
        prop_assert_eq!(transport.calls_to(VV_ENSEMBL), 0);
    }
}
