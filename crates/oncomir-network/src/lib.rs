//! oncomir-network — miRNA-target differential correlation network.
//!
//! Builds a bipartite graph linking miRNAs to targets whose correlation
//! changes between tumor and normal samples by at least a fixed threshold.
//!
//! ```rust
//! use oncomir_network::MirnaTargetNetwork;
//! use oncomir_omics::{CohortTable, CohortTables};
//!
//! fn table(prefix: &str, name: &str, values: Vec<f64>) -> CohortTable {
//!     let samples = (0..values.len()).map(|i| format!("{prefix}{i}")).collect();
//!     CohortTable::from_columns(samples, vec![(name.to_string(), values)]).unwrap()
//! }
//!
//! let tables = CohortTables::new(
//!     table("t", "hsa-mir-21", vec![1.0, 2.0, 3.0]),
//!     table("t", "PTEN", vec![3.0, 2.0, 1.0]),
//!     table("n", "hsa-mir-21", vec![1.0, 2.0, 3.0]),
//!     table("n", "PTEN", vec![1.0, 2.0, 3.0]),
//! );
//!
//! let mut model = MirnaTargetNetwork::with_threshold(0.6);
//! model.train(&tables).unwrap();
//! let dys = model.network().edge_score("hsa-mir-21", "PTEN").unwrap();
//! assert!((dys + 2.0).abs() < 1e-12);
//! ```

pub mod graph;
pub mod correlation;
pub mod observer;
pub mod engine;
pub mod export;

pub use graph::{BipartiteNetwork, Edge, MirnaId, Node, TargetId};
pub use engine::MirnaTargetNetwork;
pub use export::{EdgeRecord, EdgeStats, NetworkExport, NodeRecord};
pub use observer::{
    FnObserver, MirnaProgress, NoopObserver, TracingObserver, TrainObserver, TrainStart, TrainSummary,
};
