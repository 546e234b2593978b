use thiserror::Error;

use crate::entities::{Cohort, Partition};

#[derive(Debug, Error)]
pub enum OncomirError {
    #[error("Node '{name}' is already registered as a {existing} node, cannot register it as {requested}")]
    InvalidNode {
        name: String,
        existing: Partition,
        requested: Partition,
    },

    #[error("Unknown node '{name}': not registered in the {expected} partition")]
    UnknownNode { name: String, expected: Partition },

    #[error("Edge '{a}' <-> '{b}' would connect two {partition} nodes")]
    PartitionViolation {
        a: String,
        b: String,
        partition: Partition,
    },

    #[error("Too many {partition} nodes: {count} exceeds the 32-bit id space")]
    NodeCapacity { partition: Partition, count: usize },

    #[error("{cohort} cohort tables do not share a sample index: {detail}")]
    SampleIndexMismatch { cohort: Cohort, detail: String },

    #[error("Invalid cohort table: {0}")]
    InvalidTable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, OncomirError>;
