//! Network export: nodes with their partition, edges with `dys`.
//!
//! Produces a serializable snapshot (JSON) and a flat TSV edge list suitable
//! for Cytoscape-style downstream tools.

use std::io::Write;
use std::path::Path;

use oncomir_common::{Partition, Result};
use serde::{Deserialize, Serialize};

use crate::graph::BipartiteNetwork;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub name: String,
    pub partition: Partition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub mirna: String,
    pub target: String,
    pub dys: f64,
}

/// Owned snapshot of a network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkExport {
    pub threshold: f64,
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

impl NetworkExport {
    pub fn from_network(network: &BipartiteNetwork, threshold: f64) -> Self {
        let nodes = network
            .nodes()
            .map(|n| NodeRecord {
                name: n.name.to_string(),
                partition: n.partition,
            })
            .collect();
        let edges = network
            .edges()
            .map(|e| EdgeRecord {
                mirna: e.mirna.to_string(),
                target: e.target.to_string(),
                dys: e.dys,
            })
            .collect();
        Self {
            threshold,
            nodes,
            edges,
        }
    }

    /// Rebuild a network from a snapshot.
    pub fn to_network(&self) -> Result<BipartiteNetwork> {
        let mut network = BipartiteNetwork::new();
        network.register_mirna_nodes(
            self.nodes
                .iter()
                .filter(|n| n.partition == Partition::MiRna)
                .map(|n| n.name.as_str()),
        )?;
        network.register_target_nodes(
            self.nodes
                .iter()
                .filter(|n| n.partition == Partition::Target)
                .map(|n| n.name.as_str()),
        )?;
        for e in &self.edges {
            network.add_edge(&e.mirna, &e.target, e.dys)?;
        }
        Ok(network)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Tab-separated `mirna  target  dys` rows with a header.
    pub fn write_edge_list<W: Write>(&self, writer: W) -> Result<()> {
        let mut out = csv::WriterBuilder::new().delimiter(b'\t').from_writer(writer);
        out.write_record(["mirna", "target", "dys"])?;
        for e in &self.edges {
            let dys = e.dys.to_string();
            out.write_record([e.mirna.as_str(), e.target.as_str(), dys.as_str()])?;
        }
        out.flush()?;
        Ok(())
    }

    pub fn stats(&self) -> EdgeStats {
        EdgeStats::from_edges(&self.edges)
    }
}

/// Summary of edge scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeStats {
    pub total: usize,
    /// stronger correlation in tumor than in normal
    pub positive: usize,
    pub negative: usize,
    pub max_abs_dys: f64,
    pub mean_abs_dys: f64,
}

impl EdgeStats {
    pub fn from_edges(edges: &[EdgeRecord]) -> Self {
        if edges.is_empty() {
            return Self::default();
        }
        let total = edges.len();
        let positive = edges.iter().filter(|e| e.dys > 0.0).count();
        let abs: Vec<f64> = edges.iter().map(|e| e.dys.abs()).collect();
        let max_abs_dys = abs.iter().cloned().fold(0.0f64, f64::max);
        let mean_abs_dys = abs.iter().sum::<f64>() / total as f64;
        Self {
            total,
            positive,
            negative: total - positive,
            max_abs_dys,
            mean_abs_dys,
        }
    }
}
