//! Shared testing utilities for the oncomir workspace.
//!
//! Synthetic cohort builders with seeded randomness, barcode helpers and
//! float comparison.

use oncomir_common::Cohort;
use oncomir_omics::CohortTable;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub use pretty_assertions;

/// Install a test-friendly tracing subscriber once. Honors `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// `|a - b| <= tol`, with a readable panic message.
#[track_caller]
pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected} ± {tol}, got {actual}"
    );
}

/// TCGA-style sample barcode for synthetic patient `i`.
pub fn barcode(i: usize, cohort: Cohort) -> String {
    let code = match cohort {
        Cohort::Tumor  => "01A",
        Cohort::Normal => "11A",
    };
    format!("TCGA-OM-{i:04}-{code}")
}

/// Builds a `CohortTable` column by column.
///
/// ```
/// use oncomir_common::Cohort;
/// use oncomir_test_utils::CohortBuilder;
///
/// let table = CohortBuilder::new(Cohort::Tumor, 20, 7)
///     .noise("hsa-mir-21")
///     .linear("PTEN", "hsa-mir-21", -2.0, 1.0)
///     .build();
/// assert_eq!(table.n_columns(), 2);
/// ```
pub struct CohortBuilder {
    samples: Vec<String>,
    columns: Vec<(String, Vec<f64>)>,
    rng: StdRng,
}

impl CohortBuilder {
    pub fn new(cohort: Cohort, n_samples: usize, seed: u64) -> Self {
        Self {
            samples: (0..n_samples).map(|i| barcode(i, cohort)).collect(),
            columns: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Use explicit sample ids instead of generated barcodes.
    pub fn with_samples<S: Into<String>>(mut self, samples: impl IntoIterator<Item = S>) -> Self {
        self.samples = samples.into_iter().map(Into::into).collect();
        self
    }

    pub fn n_samples(&self) -> usize {
        self.samples.len()
    }

    /// Explicit values.
    pub fn column(mut self, name: &str, values: Vec<f64>) -> Self {
        self.columns.push((name.to_string(), values));
        self
    }

    /// Standard-uniform noise in [-1, 1).
    pub fn noise(mut self, name: &str) -> Self {
        let n = self.samples.len();
        let values = (0..n).map(|_| self.rng.gen_range(-1.0..1.0)).collect();
        self.columns.push((name.to_string(), values));
        self
    }

    /// `slope * source + intercept`, exactly (r = ±1 with the source).
    pub fn linear(mut self, name: &str, source: &str, slope: f64, intercept: f64) -> Self {
        let values = self.source(source).iter().map(|v| slope * v + intercept).collect();
        self.columns.push((name.to_string(), values));
        self
    }

    /// Every sample holds `value` (zero variance).
    pub fn constant(mut self, name: &str, value: f64) -> Self {
        let n = self.samples.len();
        self.columns.push((name.to_string(), vec![value; n]));
        self
    }

    pub fn build(self) -> CohortTable {
        CohortTable::from_columns(self.samples, self.columns).expect("synthetic cohort is well-formed")
    }

    fn source(&self, name: &str) -> Vec<f64> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
            .unwrap_or_else(|| panic!("source column '{name}' must be added first"))
    }
}

/// Two columns with Pearson r = 0 exactly: a symmetric ramp and its square.
pub fn uncorrelated_pair(n_half: usize) -> (Vec<f64>, Vec<f64>) {
    let xs: Vec<f64> = (1..=n_half)
        .flat_map(|i| [-(i as f64), i as f64])
        .collect();
    let ys: Vec<f64> = xs.iter().map(|x| x * x).collect();
    (xs, ys)
}
