//! Progress reporting for network training.
//!
//! The engine calls `on_mirna` once per outer-loop iteration. The default
//! observer turns those calls into `tracing` events; tests and hosts can
//! supply their own.

use tracing::{debug, info};

/// Shape of a training run, reported before the first pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainStart {
    pub mirnas: usize,
    pub targets: usize,
    pub tumor_samples: usize,
    pub normal_samples: usize,
}

/// Outcome of one miRNA's inner loop.
#[derive(Debug, Clone, PartialEq)]
pub struct MirnaProgress<'a> {
    pub mirna: &'a str,
    /// 0-based position in the outer loop
    pub index: usize,
    pub edges_added: usize,
    /// pairs dropped as degenerate (zero variance, non-finite, missing column)
    pub pairs_skipped: usize,
}

/// Totals for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrainSummary {
    pub pairs_evaluated: usize,
    pub pairs_skipped: usize,
    pub edges: usize,
}

pub trait TrainObserver {
    fn on_start(&mut self, _start: &TrainStart) {}

    fn on_mirna(&mut self, progress: &MirnaProgress<'_>);

    fn on_finish(&mut self, _summary: &TrainSummary) {}
}

/// Emits structured `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl TrainObserver for TracingObserver {
    fn on_start(&mut self, start: &TrainStart) {
        info!(
            mirnas = start.mirnas,
            targets = start.targets,
            n_tumor = start.tumor_samples,
            n_normal = start.normal_samples,
            "Building miRNA-target dysregulation network"
        );
    }

    fn on_mirna(&mut self, progress: &MirnaProgress<'_>) {
        debug!(
            mirna = progress.mirna,
            edges = progress.edges_added,
            skipped = progress.pairs_skipped,
            "miRNA done"
        );
    }

    fn on_finish(&mut self, summary: &TrainSummary) {
        info!(
            edges = summary.edges,
            evaluated = summary.pairs_evaluated,
            skipped = summary.pairs_skipped,
            "Network built"
        );
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl TrainObserver for NoopObserver {
    fn on_mirna(&mut self, _progress: &MirnaProgress<'_>) {}
}

/// Adapts a closure to `TrainObserver`.
pub struct FnObserver<F>(pub F);

impl<F> TrainObserver for FnObserver<F>
where
    F: FnMut(&MirnaProgress<'_>),
{
    fn on_mirna(&mut self, progress: &MirnaProgress<'_>) {
        (self.0)(progress)
    }
}
