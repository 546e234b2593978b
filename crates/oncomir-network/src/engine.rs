//! Differential correlation network construction.
//!
//! For every (miRNA m, target t) pair the Pearson correlation is computed
//! within the tumor cohort and within the normal cohort. The dysregulation
//! score dys(m, t) = r_tumor − r_normal becomes an edge when
//! |dys| ≥ threshold.

use std::borrow::Cow;
use std::collections::HashSet;

use oncomir_common::{Cohort, EntitySelection, NetworkConfig, OncomirError, Partition, Result};
use oncomir_omics::{CohortTable, CohortTableProvider, CohortTables};
use tracing::{debug, warn};

use crate::correlation::ColumnStats;
use crate::export::NetworkExport;
use crate::graph::BipartiteNetwork;
use crate::observer::{MirnaProgress, TracingObserver, TrainObserver, TrainStart, TrainSummary};

/// Owns the network and rebuilds it on every `train` call.
#[derive(Debug, Clone, Default)]
pub struct MirnaTargetNetwork {
    config: NetworkConfig,
    network: BipartiteNetwork,
    summary: TrainSummary,
}

impl MirnaTargetNetwork {
    pub fn new(config: NetworkConfig) -> Self {
        for warning in config.validate() {
            warn!("network config: {}", warning);
        }
        Self {
            config,
            network: BipartiteNetwork::new(),
            summary: TrainSummary::default(),
        }
    }

    pub fn with_threshold(threshold: f64) -> Self {
        Self::new(NetworkConfig::with_threshold(threshold))
    }

    pub fn threshold(&self) -> f64 {
        self.config.threshold
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// The network built by the last successful `train` call.
    pub fn network(&self) -> &BipartiteNetwork {
        &self.network
    }

    pub fn into_network(self) -> BipartiteNetwork {
        self.network
    }

    /// Owned snapshot of the current network.
    pub fn export(&self) -> NetworkExport {
        NetworkExport::from_network(&self.network, self.config.threshold)
    }

    /// Totals of the last successful `train` call.
    pub fn summary(&self) -> &TrainSummary {
        &self.summary
    }

    /// Build the network, reporting progress through `tracing`.
    pub fn train(&mut self, tables: &CohortTables) -> Result<()> {
        self.train_with_observer(tables, &mut TracingObserver)
    }

    /// Fetch the tables once from `provider`, then train.
    pub fn train_from_provider(&mut self, provider: &dyn CohortTableProvider) -> Result<()> {
        let tables = provider.cohort_tables()?;
        self.train(&tables)
    }

    /// Build the network. On error the previous network is discarded and
    /// left empty.
    pub fn train_with_observer(
        &mut self,
        tables: &CohortTables,
        observer: &mut dyn TrainObserver,
    ) -> Result<()> {
        self.network = BipartiteNetwork::new();
        self.summary = TrainSummary::default();

        let (network, summary) = self.build(tables, observer)?;
        self.network = network;
        self.summary = summary;
        Ok(())
    }

    fn build(
        &self,
        tables: &CohortTables,
        observer: &mut dyn TrainObserver,
    ) -> Result<(BipartiteNetwork, TrainSummary)> {
        let target_tumor = aligned(&tables.mirna_tumor, &tables.target_tumor, Cohort::Tumor)?;
        let target_normal = aligned(&tables.mirna_normal, &tables.target_normal, Cohort::Normal)?;

        let (mirnas, targets) = select_entities(self.config.entity_selection, tables);

        let mut network = BipartiteNetwork::new();
        network.register_mirna_nodes(&mirnas)?;
        network.register_target_nodes(&targets)?;

        let target_ids = targets
            .iter()
            .map(|t| {
                network.target_id(t).ok_or_else(|| OncomirError::UnknownNode {
                    name: t.clone(),
                    expected: Partition::Target,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        // Target statistics do not depend on the miRNA
        let tumor_stats = column_stats(&target_tumor, &targets);
        let normal_stats = column_stats(&target_normal, &targets);

        observer.on_start(&TrainStart {
            mirnas: mirnas.len(),
            targets: targets.len(),
            tumor_samples: tables.mirna_tumor.n_samples(),
            normal_samples: tables.mirna_normal.n_samples(),
        });

        let threshold = self.config.threshold;
        let mut summary = TrainSummary::default();

        for (index, m) in mirnas.iter().enumerate() {
            let mirna_id = network.mirna_id(m).ok_or_else(|| OncomirError::UnknownNode {
                name: m.clone(),
                expected: Partition::MiRna,
            })?;
            let m_tumor = tables.mirna_tumor.column(m).and_then(ColumnStats::compute);
            let m_normal = tables.mirna_normal.column(m).and_then(ColumnStats::compute);

            let mut edges_added = 0;
            let mut pairs_skipped = 0;

            for (j, target_id) in target_ids.iter().enumerate() {
                summary.pairs_evaluated += 1;

                let dys = dysregulation(
                    m_tumor.as_ref(),
                    tumor_stats[j].as_ref(),
                    m_normal.as_ref(),
                    normal_stats[j].as_ref(),
                );
                let Some(dys) = dys else {
                    pairs_skipped += 1;
                    continue;
                };

                if dys.abs() >= threshold {
                    network.insert_edge(mirna_id, *target_id, dys);
                    edges_added += 1;
                }
            }

            summary.pairs_skipped += pairs_skipped;
            summary.edges += edges_added;
            observer.on_mirna(&MirnaProgress {
                mirna: m,
                index,
                edges_added,
                pairs_skipped,
            });
        }

        observer.on_finish(&summary);
        Ok((network, summary))
    }
}

/// r_tumor − r_normal, or `None` if either correlation is undefined.
fn dysregulation(
    m_tumor: Option<&ColumnStats>,
    t_tumor: Option<&ColumnStats>,
    m_normal: Option<&ColumnStats>,
    t_normal: Option<&ColumnStats>,
) -> Option<f64> {
    let r_tumor = m_tumor?.pearson(t_tumor?)?;
    let r_normal = m_normal?.pearson(t_normal?)?;
    let dys = r_tumor - r_normal;
    dys.is_finite().then_some(dys)
}

fn column_stats(table: &CohortTable, names: &[String]) -> Vec<Option<ColumnStats>> {
    names
        .iter()
        .map(|n| table.column(n).and_then(ColumnStats::compute))
        .collect()
}

/// `target` reordered to the sample order of `mirna`. Fails if the two
/// tables do not hold the same sample set.
fn aligned<'a>(mirna: &CohortTable, target: &'a CohortTable, cohort: Cohort) -> Result<Cow<'a, CohortTable>> {
    if mirna.has_same_index(target) {
        return Ok(Cow::Borrowed(target));
    }
    if mirna.has_same_sample_set(target) {
        debug!("Reordering {} target table to the miRNA sample order", cohort);
        return Ok(Cow::Owned(target.reindex(mirna.samples())?));
    }
    Err(OncomirError::SampleIndexMismatch {
        cohort,
        detail: format!(
            "{} miRNA samples vs {} target samples",
            mirna.n_samples(),
            target.n_samples()
        ),
    })
}

/// miRNA and target name lists, in loop order.
fn select_entities(selection: EntitySelection, tables: &CohortTables) -> (Vec<String>, Vec<String>) {
    match selection {
        EntitySelection::Reference => (
            tables.mirna_tumor.columns().to_vec(),
            tables.target_normal.columns().to_vec(),
        ),
        EntitySelection::Intersection => (
            intersect(&tables.mirna_tumor, &tables.mirna_normal),
            intersect(&tables.target_normal, &tables.target_tumor),
        ),
        EntitySelection::Union => (
            union(&tables.mirna_tumor, &tables.mirna_normal),
            union(&tables.target_normal, &tables.target_tumor),
        ),
    }
}

fn intersect(first: &CohortTable, second: &CohortTable) -> Vec<String> {
    first
        .columns()
        .iter()
        .filter(|c| second.has_column(c))
        .cloned()
        .collect()
}

fn union(first: &CohortTable, second: &CohortTable) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for c in first.columns().iter().chain(second.columns()) {
        if seen.insert(c.as_str()) {
            out.push(c.clone());
        }
    }
    out
}
