/// Shared vocabulary for cohorts, omics modalities and network partitions.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Bipartite partition
// ---------------------------------------------------------------------------

/// Which side of the miRNA-target network a node belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Partition {
    #[serde(rename = "mirna")]
    MiRna,
    Target,
}

impl Partition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Partition::MiRna  => "miRNA",
            Partition::Target => "target",
        }
    }

    /// The opposite side of the bipartition.
    pub fn other(&self) -> Self {
        match self {
            Partition::MiRna  => Partition::Target,
            Partition::Target => Partition::MiRna,
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Cohort
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cohort {
    Tumor,
    Normal,
}

impl Cohort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cohort::Tumor  => "tumor",
            Cohort::Normal => "normal",
        }
    }
}

impl fmt::Display for Cohort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Omics modality
// ---------------------------------------------------------------------------

/// Data modalities produced by TCGA-assembler style exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modality {
    /// Gene expression
    #[serde(rename = "GE")]
    GeneExpression,
    /// Somatic mutation (gene level)
    #[serde(rename = "SNP")]
    SomaticMutation,
    /// Copy number variation
    #[serde(rename = "CNV")]
    CopyNumber,
    /// DNA methylation
    #[serde(rename = "DNA")]
    Methylation,
    /// miRNA expression
    #[serde(rename = "MIR")]
    MiRnaExpression,
    /// Protein expression (RPPA)
    #[serde(rename = "PRO")]
    ProteinExpression,
    /// lncRNA expression
    #[serde(rename = "LNC")]
    LncRnaExpression,
}

impl Modality {
    pub const ALL: [Modality; 7] = [
        Modality::GeneExpression,
        Modality::SomaticMutation,
        Modality::CopyNumber,
        Modality::Methylation,
        Modality::MiRnaExpression,
        Modality::ProteinExpression,
        Modality::LncRnaExpression,
    ];

    /// Short code used in configs and logs.
    pub fn code(&self) -> &'static str {
        match self {
            Modality::GeneExpression    => "GE",
            Modality::SomaticMutation   => "SNP",
            Modality::CopyNumber        => "CNV",
            Modality::Methylation       => "DNA",
            Modality::MiRnaExpression   => "MIR",
            Modality::ProteinExpression => "PRO",
            Modality::LncRnaExpression  => "LNC",
        }
    }

    /// Parse a short code, case-insensitively.
    pub fn from_code(code: &str) -> Option<Self> {
        let upper = code.trim().to_ascii_uppercase();
        Self::ALL.iter().copied().find(|m| m.code() == upper)
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
