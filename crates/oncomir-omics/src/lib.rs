//! Sample-aligned cohort tables for miRNA-target network construction.
//!
//! Loads samples × entities matrices from delimited files, matches samples
//! across modalities and splits them into tumor and normal cohorts by TCGA
//! barcode.
//!
//! # Example
//!
//! ```rust,no_run
//! use oncomir_omics::{CohortTableProvider, CsvCohortProvider};
//!
//! fn main() -> oncomir_common::Result<()> {
//!     let provider = CsvCohortProvider::new("mirna/miRNAExp__RPM.txt", "gene_exp/geneExp.txt");
//!     let tables = provider.cohort_tables()?;
//!     println!(
//!         "{} tumor samples, {} normal samples",
//!         tables.mirna_tumor.n_samples(),
//!         tables.mirna_normal.n_samples()
//!     );
//!     Ok(())
//! }
//! ```

pub mod table;
pub mod reader;
pub mod samples;
pub mod provider;

pub use table::CohortTable;
pub use reader::{read_matrix, read_matrix_file};
pub use samples::{match_samples, patient_barcode, split_by_cohort, SampleType};
pub use provider::{CohortTableProvider, CohortTables, CsvCohortProvider, InMemoryCohortProvider};
