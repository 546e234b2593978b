//! Bipartite miRNA-target graph.
//!
//! miRNAs and targets live in separate id spaces (`MirnaId`, `TargetId`) and
//! edges are keyed by `(MirnaId, TargetId)`, so an edge between two nodes of
//! the same partition cannot be represented at all. Name-based insertion
//! still reports such attempts as `PartitionViolation`.

use std::collections::{HashMap, HashSet};

use oncomir_common::{OncomirError, Partition, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MirnaId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(pub u32);

/// A registered node, by name and partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node<'a> {
    pub name: &'a str,
    pub partition: Partition,
}

/// A dysregulation link.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge<'a> {
    pub mirna: &'a str,
    pub target: &'a str,
    pub dys: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeRef {
    MiRna(MirnaId),
    Target(TargetId),
}

impl NodeRef {
    fn partition(&self) -> Partition {
        match self {
            NodeRef::MiRna(_)  => Partition::MiRna,
            NodeRef::Target(_) => Partition::Target,
        }
    }
}

/// Bipartite graph of miRNA and target nodes with `dys`-scored edges.
#[derive(Debug, Clone, Default)]
pub struct BipartiteNetwork {
    mirnas: Vec<String>,
    targets: Vec<String>,
    index: HashMap<String, NodeRef>,
    /// insertion order of edges
    edge_order: Vec<(MirnaId, TargetId)>,
    edges: HashMap<(MirnaId, TargetId), f64>,
}

impl BipartiteNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register miRNA nodes. Names already registered as miRNAs are left
    /// untouched; a name registered as a target fails the whole call.
    pub fn register_mirna_nodes<I, S>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.register(names, Partition::MiRna)
    }

    /// Register target nodes. Mirror of [`register_mirna_nodes`](Self::register_mirna_nodes).
    pub fn register_target_nodes<I, S>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.register(names, Partition::Target)
    }

    fn register<I, S>(&mut self, names: I, partition: Partition) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<S> = names.into_iter().collect();

        // Validate first so a conflicting call leaves the graph unchanged
        let mut fresh: Vec<&str> = Vec::new();
        let mut seen = HashSet::new();
        for name in &names {
            let name: &str = name.as_ref();
            match self.index.get(name) {
                Some(existing) if existing.partition() != partition => {
                    return Err(OncomirError::InvalidNode {
                        name: name.to_string(),
                        existing: existing.partition(),
                        requested: partition,
                    });
                }
                Some(_) => {}
                None if seen.insert(name) => fresh.push(name),
                None => {}
            }
        }

        let registered = match partition {
            Partition::MiRna  => self.mirnas.len(),
            Partition::Target => self.targets.len(),
        };
        let mut next = node_id(registered, fresh.len(), partition)?;

        for name in fresh {
            let node = match partition {
                Partition::MiRna => {
                    self.mirnas.push(name.to_string());
                    NodeRef::MiRna(MirnaId(next))
                }
                Partition::Target => {
                    self.targets.push(name.to_string());
                    NodeRef::Target(TargetId(next))
                }
            };
            self.index.insert(name.to_string(), node);
            next += 1;
        }
        Ok(())
    }

    /// Insert or overwrite the edge between a miRNA and a target.
    ///
    /// The pair is unordered: `add_edge(target, mirna, s)` addresses the same
    /// edge as `add_edge(mirna, target, s)`.
    pub fn add_edge(&mut self, mirna: &str, target: &str, score: f64) -> Result<()> {
        let key = self.edge_key(mirna, target)?;
        self.insert_edge(key.0, key.1, score);
        Ok(())
    }

    /// Typed insertion. Ids must come from this network.
    pub fn insert_edge(&mut self, mirna: MirnaId, target: TargetId, score: f64) {
        if self.edges.insert((mirna, target), score).is_none() {
            self.edge_order.push((mirna, target));
        }
    }

    fn edge_key(&self, a: &str, b: &str) -> Result<(MirnaId, TargetId)> {
        let (ra, rb) = match (self.index.get(a), self.index.get(b)) {
            (Some(ra), Some(rb)) => (ra, rb),
            (None, other) => {
                return Err(OncomirError::UnknownNode {
                    name: a.to_string(),
                    expected: other.map_or(Partition::MiRna, |r| r.partition().other()),
                })
            }
            (Some(ra), None) => {
                return Err(OncomirError::UnknownNode {
                    name: b.to_string(),
                    expected: ra.partition().other(),
                })
            }
        };

        match (*ra, *rb) {
            (NodeRef::MiRna(m), NodeRef::Target(t)) | (NodeRef::Target(t), NodeRef::MiRna(m)) => Ok((m, t)),
            (same, _) => Err(OncomirError::PartitionViolation {
                a: a.to_string(),
                b: b.to_string(),
                partition: same.partition(),
            }),
        }
    }

    /// Score of the edge between two nodes, in either order.
    pub fn edge_score(&self, a: &str, b: &str) -> Option<f64> {
        let key = self.edge_key(a, b).ok()?;
        self.edges.get(&key).copied()
    }

    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        self.edge_score(a, b).is_some()
    }

    pub fn partition_of(&self, name: &str) -> Option<Partition> {
        self.index.get(name).map(|r| r.partition())
    }

    pub fn contains_node(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn mirna_id(&self, name: &str) -> Option<MirnaId> {
        match self.index.get(name) {
            Some(NodeRef::MiRna(id)) => Some(*id),
            _ => None,
        }
    }

    pub fn target_id(&self, name: &str) -> Option<TargetId> {
        match self.index.get(name) {
            Some(NodeRef::Target(id)) => Some(*id),
            _ => None,
        }
    }

    pub fn mirna_name(&self, id: MirnaId) -> Option<&str> {
        self.mirnas.get(id.0 as usize).map(String::as_str)
    }

    pub fn target_name(&self, id: TargetId) -> Option<&str> {
        self.targets.get(id.0 as usize).map(String::as_str)
    }

    /// miRNA names in registration order.
    pub fn mirnas(&self) -> &[String] {
        &self.mirnas
    }

    /// Target names in registration order.
    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    /// All nodes: miRNAs first, then targets, each in registration order.
    pub fn nodes(&self) -> impl Iterator<Item = Node<'_>> {
        let mirnas = self.mirnas.iter().map(|n| Node {
            name: n.as_str(),
            partition: Partition::MiRna,
        });
        let targets = self.targets.iter().map(|n| Node {
            name: n.as_str(),
            partition: Partition::Target,
        });
        mirnas.chain(targets)
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = Edge<'_>> {
        self.edge_order.iter().map(move |key| Edge {
            mirna: &self.mirnas[key.0 .0 as usize],
            target: &self.targets[key.1 .0 as usize],
            dys: self.edges[key],
        })
    }

    pub fn node_count(&self) -> usize {
        self.mirnas.len() + self.targets.len()
    }

    pub fn mirna_count(&self) -> usize {
        self.mirnas.len()
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// First id for `added` new nodes after `registered` existing ones, if the
/// whole range fits in `u32`.
fn node_id(registered: usize, added: usize, partition: Partition) -> Result<u32> {
    let count = registered.saturating_add(added);
    u32::try_from(count)
        .map(|_| registered as u32)
        .map_err(|_| OncomirError::NodeCapacity { partition, count })
}
