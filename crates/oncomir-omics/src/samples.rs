//! Sample matching and TCGA barcode handling.
//!
//! A TCGA sample barcode such as `TCGA-05-4244-01A` carries the sample type
//! in characters 14–15 (`01`). Codes 01–09 are tumor samples, 10–19 normal
//! samples and 20–29 controls.

use std::collections::HashSet;

use oncomir_common::Cohort;
use tracing::info;

use crate::table::CohortTable;

/// Coarse sample type decoded from a TCGA barcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleType {
    Tumor,
    Normal,
    Control,
}

impl SampleType {
    /// Decode from a sample barcode. `None` for short or non-numeric codes.
    pub fn from_barcode(barcode: &str) -> Option<Self> {
        let code = barcode.get(13..15)?;
        let code: u8 = code.parse().ok()?;
        match code {
            1..=9   => Some(SampleType::Tumor),
            10..=19 => Some(SampleType::Normal),
            20..=29 => Some(SampleType::Control),
            _ => None,
        }
    }

    pub fn cohort(&self) -> Option<Cohort> {
        match self {
            SampleType::Tumor   => Some(Cohort::Tumor),
            SampleType::Normal  => Some(Cohort::Normal),
            SampleType::Control => None,
        }
    }
}

/// Cohort of a sample barcode, if it is a tumor or normal sample.
pub fn cohort_of(barcode: &str) -> Option<Cohort> {
    SampleType::from_barcode(barcode).and_then(|t| t.cohort())
}

/// Patient barcode of a sample barcode: the sample barcode minus its
/// 4-character sample-type/vial suffix (`TCGA-05-4244-01A` → `TCGA-05-4244`).
pub fn patient_barcode(sample: &str) -> &str {
    match sample.char_indices().rev().nth(3) {
        Some((i, _)) => &sample[..i],
        None => "",
    }
}

/// Inner join of the sample indexes of `tables`, in the order of the first.
pub fn match_samples(tables: &[&CohortTable]) -> Vec<String> {
    let Some((first, rest)) = tables.split_first() else {
        return Vec::new();
    };

    let others: Vec<HashSet<&str>> = rest
        .iter()
        .map(|t| t.samples().iter().map(String::as_str).collect())
        .collect();

    let matched: Vec<String> = first
        .samples()
        .iter()
        .filter(|s| others.iter().all(|o| o.contains(s.as_str())))
        .cloned()
        .collect();

    info!(
        "Matched {} samples across {} tables",
        matched.len(),
        tables.len()
    );
    matched
}

/// Split a table into its tumor and normal rows by barcode.
/// Controls and undecodable barcodes are dropped.
pub fn split_by_cohort(table: &CohortTable) -> (CohortTable, CohortTable) {
    let tumor = table.filter_samples(|s| cohort_of(s) == Some(Cohort::Tumor));
    let normal = table.filter_samples(|s| cohort_of(s) == Some(Cohort::Normal));
    (tumor, normal)
}
