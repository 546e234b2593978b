//! End-to-end network construction over synthetic cohorts.

use std::io::Write;

use oncomir_common::{Cohort, EntitySelection, NetworkConfig, OncomirConfig, Partition};
use oncomir_network::{MirnaTargetNetwork, NetworkExport, NoopObserver};
use oncomir_omics::{CohortTables, CsvCohortProvider, InMemoryCohortProvider};
use oncomir_test_utils::pretty_assertions::assert_eq;
use oncomir_test_utils::{assert_close, barcode, init_tracing, uncorrelated_pair, CohortBuilder};

/// Tumor: X and Y perfectly correlated. Normal: uncorrelated (r = 0).
fn textbook_tables() -> CohortTables {
    let (x_normal, y_normal) = uncorrelated_pair(3);
    let tumor = CohortBuilder::new(Cohort::Tumor, 6, 1)
        .noise("X")
        .linear("Y", "X", 3.0, -1.0)
        .build();
    let normal = CohortBuilder::new(Cohort::Normal, 6, 2)
        .column("X", x_normal)
        .column("Y", y_normal)
        .build();

    CohortTables::new(
        tumor.select_columns(&["X"]),
        tumor.select_columns(&["Y"]),
        normal.select_columns(&["X"]),
        normal.select_columns(&["Y"]),
    )
}

#[test]
fn test_perfect_vs_uncorrelated_gives_unit_score() {
    init_tracing();
    let mut model = MirnaTargetNetwork::with_threshold(0.5);
    model.train(&textbook_tables()).unwrap();

    let net = model.network();
    assert_eq!(net.partition_of("X"), Some(Partition::MiRna));
    assert_eq!(net.partition_of("Y"), Some(Partition::Target));
    assert_eq!(net.edge_count(), 1);
    assert_close(net.edge_score("X", "Y").unwrap(), 1.0, 1e-9);
}

#[test]
fn test_zero_variance_target_in_either_cohort_has_no_edges() {
    init_tracing();
    let tumor = CohortBuilder::new(Cohort::Tumor, 8, 11)
        .noise("mir-a")
        .noise("mir-b")
        .linear("FLAT_NORMAL", "mir-a", 1.0, 0.0)
        .constant("FLAT_TUMOR", 4.2)
        .linear("LIVE", "mir-b", -1.0, 0.0)
        .build();
    let normal = CohortBuilder::new(Cohort::Normal, 5, 12)
        .noise("mir-a")
        .noise("mir-b")
        .constant("FLAT_NORMAL", 0.0)
        .noise("FLAT_TUMOR")
        .linear("LIVE", "mir-b", 1.0, 0.0)
        .build();

    let tables = CohortTables::new(
        tumor.select_columns(&["mir-a", "mir-b"]),
        tumor.select_columns(&["FLAT_NORMAL", "FLAT_TUMOR", "LIVE"]),
        normal.select_columns(&["mir-a", "mir-b"]),
        normal.select_columns(&["FLAT_NORMAL", "FLAT_TUMOR", "LIVE"]),
    );

    let mut model = MirnaTargetNetwork::with_threshold(0.0);
    model.train_with_observer(&tables, &mut NoopObserver).unwrap();
    let net = model.network();

    for m in ["mir-a", "mir-b"] {
        assert!(!net.has_edge(m, "FLAT_NORMAL"));
        assert!(!net.has_edge(m, "FLAT_TUMOR"));
    }
    assert_close(net.edge_score("mir-b", "LIVE").unwrap(), -2.0, 1e-9);
    assert_eq!(model.summary().pairs_skipped, 4);
}

#[test]
fn test_inexact_constants_in_either_cohort_have_no_edges() {
    for value in [0.1, 0.7, 3.3] {
        for n in 3..=8 {
            let ramp: Vec<f64> = (1..=n).map(|i| i as f64).collect();
            let tumor = CohortBuilder::new(Cohort::Tumor, n, 0)
                .column("mir", ramp.clone())
                .constant("FLAT_TUMOR", value)
                .linear("FLAT_NORMAL", "mir", -1.0, 0.0)
                .build();
            let normal = CohortBuilder::new(Cohort::Normal, n, 0)
                .column("mir", ramp)
                .linear("FLAT_TUMOR", "mir", -1.0, 0.0)
                .constant("FLAT_NORMAL", value)
                .build();
            let tables = CohortTables::new(
                tumor.select_columns(&["mir"]),
                tumor.select_columns(&["FLAT_TUMOR", "FLAT_NORMAL"]),
                normal.select_columns(&["mir"]),
                normal.select_columns(&["FLAT_TUMOR", "FLAT_NORMAL"]),
            );

            let mut model = MirnaTargetNetwork::with_threshold(0.6);
            model.train_with_observer(&tables, &mut NoopObserver).unwrap();
            assert_eq!(model.network().edge_count(), 0, "constant {value} over {n} samples");
            assert_eq!(model.summary().pairs_skipped, 2);
        }
    }
}

#[test]
fn test_two_sample_cohorts_are_defined() {
    let tumor = CohortBuilder::new(Cohort::Tumor, 2, 0)
        .column("m", vec![0.0, 1.0])
        .column("g", vec![5.0, 7.0])
        .build();
    let normal = CohortBuilder::new(Cohort::Normal, 2, 0)
        .column("m", vec![0.0, 1.0])
        .column("g", vec![7.0, 5.0])
        .build();
    let tables = CohortTables::new(
        tumor.select_columns(&["m"]),
        tumor.select_columns(&["g"]),
        normal.select_columns(&["m"]),
        normal.select_columns(&["g"]),
    );

    let mut model = MirnaTargetNetwork::with_threshold(0.6);
    model.train_with_observer(&tables, &mut NoopObserver).unwrap();
    assert_close(model.network().edge_score("m", "g").unwrap(), 2.0, 1e-12);
}

#[test]
fn test_missing_values_skip_pairs() {
    let tumor = CohortBuilder::new(Cohort::Tumor, 4, 0)
        .column("m", vec![1.0, 2.0, f64::NAN, 4.0])
        .column("g", vec![1.0, 2.0, 3.0, 4.0])
        .build();
    let normal = CohortBuilder::new(Cohort::Normal, 4, 0)
        .column("m", vec![4.0, 3.0, 2.0, 1.0])
        .column("g", vec![1.0, 2.0, 3.0, 4.0])
        .build();
    let tables = CohortTables::new(
        tumor.select_columns(&["m"]),
        tumor.select_columns(&["g"]),
        normal.select_columns(&["m"]),
        normal.select_columns(&["g"]),
    );

    let mut model = MirnaTargetNetwork::with_threshold(0.1);
    model.train_with_observer(&tables, &mut NoopObserver).unwrap();
    assert_eq!(model.network().node_count(), 2);
    assert_eq!(model.network().edge_count(), 0);
}

#[test]
fn test_provider_from_delimited_files() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let mirna_path = dir.path().join("miRNAExp.tsv");
    let gene_path = dir.path().join("geneExp.tsv");

    // Patients 0-3 with tumor and normal samples; mir-21 tracks PTEN
    // inversely in tumor and positively in normal.
    let mir21 = [1.0, 2.0, 3.0, 4.0];
    let mut mirna = String::from("sample\thsa-mir-21\n");
    let mut genes = String::from("sample\tPTEN\tGAPDH\n");
    for (i, v) in mir21.iter().enumerate() {
        mirna.push_str(&format!("{}\t{}\n", barcode(i, Cohort::Tumor), v));
        mirna.push_str(&format!("{}\t{}\n", barcode(i, Cohort::Normal), v));
        genes.push_str(&format!("{}\t{}\t10\n", barcode(i, Cohort::Tumor), 10.0 - v));
        genes.push_str(&format!("{}\t{}\t10\n", barcode(i, Cohort::Normal), 2.0 * v));
    }
    // gene-only sample is dropped by sample matching
    genes.push_str(&format!("{}\t1\t1\n", barcode(99, Cohort::Tumor)));

    std::fs::File::create(&mirna_path).unwrap().write_all(mirna.as_bytes()).unwrap();
    std::fs::File::create(&gene_path).unwrap().write_all(genes.as_bytes()).unwrap();

    let provider = CsvCohortProvider::new(&mirna_path, &gene_path);
    let mut model = MirnaTargetNetwork::new(NetworkConfig::default());
    model.train_from_provider(&provider).unwrap();

    let net = model.network();
    assert_eq!(net.mirna_count(), 1);
    assert_eq!(net.target_count(), 2);
    assert_close(net.edge_score("hsa-mir-21", "PTEN").unwrap(), -2.0, 1e-9);
    // constant housekeeping gene never links
    assert!(!net.has_edge("hsa-mir-21", "GAPDH"));
}

#[test]
fn test_config_drives_selection_and_export() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("oncomir.yaml");
    std::fs::write(&config_path, "network:\n  threshold: 0.5\n  entity_selection: intersection\n").unwrap();
    let config = OncomirConfig::from_file(config_path.to_str().unwrap()).unwrap();
    assert_eq!(config.network.entity_selection, EntitySelection::Intersection);

    let mut tables = textbook_tables();
    // extra tumor-only miRNA is excluded under intersection
    tables.mirna_tumor = CohortBuilder::new(Cohort::Tumor, 6, 1)
        .noise("X")
        .noise("EXTRA")
        .build();

    let provider = InMemoryCohortProvider::new(tables);
    let mut model = MirnaTargetNetwork::new(config.network);
    model.train_from_provider(&provider).unwrap();
    assert!(!model.network().contains_node("EXTRA"));

    let path = dir.path().join("network.json");
    model.export().write_json(&path).unwrap();

    let restored = NetworkExport::from_json(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_close(restored.threshold, 0.5, 1e-12);
    assert_eq!(restored.edges.len(), 1);
    assert_eq!(restored.stats().total, 1);
}
