//! Oncomir: miRNA-target dysregulation network builder.
//! Entry point for the command-line binary.
//!
//! Usage: `oncomir [CONFIG] [OUT_DIR]`
//!
//! CONFIG defaults to `$ONCOMIR_CONFIG`, then `oncomir.yaml`. The network is
//! written to `OUT_DIR/network.json` and `OUT_DIR/edges.tsv`.

use std::path::PathBuf;

use anyhow::Context;
use oncomir_common::OncomirConfig;
use oncomir_network::MirnaTargetNetwork;
use oncomir_omics::CsvCohortProvider;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "oncomir.yaml";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("oncomir=debug,info")),
        )
        .init();

    info!("Oncomir {}", env!("CARGO_PKG_VERSION"));

    let mut args = std::env::args().skip(1);
    let config_path = args
        .next()
        .or_else(|| std::env::var("ONCOMIR_CONFIG").ok())
        .unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| ".".to_string()));

    let config = OncomirConfig::from_file(&config_path)
        .with_context(|| format!("loading {config_path}"))?;
    info!(
        "Configuration loaded. Threshold: {}, selection: {:?}",
        config.network.threshold, config.network.entity_selection
    );

    let provider = CsvCohortProvider::from_config(&config.cohorts)?;
    let mut model = MirnaTargetNetwork::new(config.network);
    model.train_from_provider(&provider)?;

    let export = model.export();
    let stats = export.stats();
    info!(
        "{} edges ({} up in tumor, {} down), max |dys| {:.3}, mean |dys| {:.3}",
        stats.total, stats.positive, stats.negative, stats.max_abs_dys, stats.mean_abs_dys
    );

    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;
    let json_path = out_dir.join("network.json");
    export.write_json(&json_path)?;
    let tsv_path = out_dir.join("edges.tsv");
    let file = std::fs::File::create(&tsv_path)
        .with_context(|| format!("creating {}", tsv_path.display()))?;
    export.write_edge_list(std::io::BufWriter::new(file))?;

    info!("Wrote {} and {}", json_path.display(), tsv_path.display());
    Ok(())
}
