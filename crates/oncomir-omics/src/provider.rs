//! Trait for obtaining the four cohort tables used by network construction.

use std::collections::HashSet;
use std::path::PathBuf;

use oncomir_common::{CohortSourceConfig, Modality, OncomirError, Result};
use tracing::info;

use crate::reader::{delimiter_byte, read_matrix_file};
use crate::samples::{match_samples, patient_barcode, split_by_cohort};
use crate::table::CohortTable;

/// miRNA and target tables for the tumor and normal cohorts.
#[derive(Debug, Clone)]
pub struct CohortTables {
    pub mirna_tumor: CohortTable,
    pub target_tumor: CohortTable,
    pub mirna_normal: CohortTable,
    pub target_normal: CohortTable,
}

impl CohortTables {
    pub fn new(
        mirna_tumor: CohortTable,
        target_tumor: CohortTable,
        mirna_normal: CohortTable,
        target_normal: CohortTable,
    ) -> Self {
        Self {
            mirna_tumor,
            target_tumor,
            mirna_normal,
            target_normal,
        }
    }

    /// Split whole-dataset miRNA and target tables into tumor and normal
    /// cohorts, keeping only samples present in both modalities.
    pub fn from_combined(mirna: &CohortTable, target: &CohortTable) -> Result<Self> {
        let matched = match_samples(&[mirna, target]);
        let mirna = mirna.reindex(&matched)?;
        let target = target.reindex(&matched)?;

        let (mirna_tumor, mirna_normal) = split_by_cohort(&mirna);
        let (target_tumor, target_normal) = split_by_cohort(&target);

        let tables = Self::new(mirna_tumor, target_tumor, mirna_normal, target_normal);
        info!(
            "Cohorts: {} tumor / {} normal samples, {} patients with both",
            tables.mirna_tumor.n_samples(),
            tables.mirna_normal.n_samples(),
            tables.paired_patients().len()
        );
        Ok(tables)
    }

    /// Patient barcodes with at least one tumor and one normal sample, in
    /// tumor sample order.
    pub fn paired_patients(&self) -> Vec<String> {
        let normal: HashSet<&str> = self
            .mirna_normal
            .samples()
            .iter()
            .map(|s| patient_barcode(s))
            .collect();

        let mut seen = HashSet::new();
        self.mirna_tumor
            .samples()
            .iter()
            .map(|s| patient_barcode(s))
            .filter(|p| normal.contains(p) && seen.insert(*p))
            .map(str::to_string)
            .collect()
    }
}

/// Trait for accessing sample-aligned cohort tables.
pub trait CohortTableProvider {
    /// Produce the four tables. Called once per network construction.
    fn cohort_tables(&self) -> Result<CohortTables>;
}

// ── In-memory Implementation ───────────────────────────────────────────────

/// Provider over tables that are already loaded.
pub struct InMemoryCohortProvider {
    tables: CohortTables,
}

impl InMemoryCohortProvider {
    pub fn new(tables: CohortTables) -> Self {
        Self { tables }
    }
}

impl CohortTableProvider for InMemoryCohortProvider {
    fn cohort_tables(&self) -> Result<CohortTables> {
        Ok(self.tables.clone())
    }
}

// ── Delimited-file Implementation ──────────────────────────────────────────

/// Provider reading one miRNA matrix and one target matrix, each holding
/// tumor and normal samples identified by TCGA barcode.
#[derive(Debug, Clone)]
pub struct CsvCohortProvider {
    mirna_path: PathBuf,
    target_path: PathBuf,
    target_modality: Modality,
    delimiter: u8,
}

impl CsvCohortProvider {
    pub fn new(mirna_path: impl Into<PathBuf>, target_path: impl Into<PathBuf>) -> Self {
        Self {
            mirna_path: mirna_path.into(),
            target_path: target_path.into(),
            target_modality: Modality::GeneExpression,
            delimiter: b'\t',
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_target_modality(mut self, modality: Modality) -> Self {
        self.target_modality = modality;
        self
    }

    pub fn from_config(config: &CohortSourceConfig) -> Result<Self> {
        let mirna = config
            .mirna_path
            .as_ref()
            .ok_or_else(|| OncomirError::Config("cohorts.mirna_path is not set".to_string()))?;
        let target = config
            .target_path
            .as_ref()
            .ok_or_else(|| OncomirError::Config("cohorts.target_path is not set".to_string()))?;

        Ok(Self::new(mirna, target)
            .with_delimiter(delimiter_byte(config.delimiter)?)
            .with_target_modality(config.target_modality))
    }
}

impl CohortTableProvider for CsvCohortProvider {
    fn cohort_tables(&self) -> Result<CohortTables> {
        info!(
            "Loading {} matrix {:?} and {} matrix {:?}",
            Modality::MiRnaExpression,
            self.mirna_path,
            self.target_modality,
            self.target_path
        );
        let mirna = read_matrix_file(&self.mirna_path, self.delimiter)?;
        let target = read_matrix_file(&self.target_path, self.delimiter)?;
        CohortTables::from_combined(&mirna, &target)
    }
}
