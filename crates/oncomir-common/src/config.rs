//! Configuration for miRNA-target network construction.
//!
//! Loadable from YAML, JSON or TOML. Every field has a default so a partial
//! file (or none at all) yields a usable configuration.

use serde::{Deserialize, Serialize};

use crate::entities::Modality;
use crate::error::Result;

/// Complete run configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OncomirConfig {
    /// Network construction parameters
    #[serde(default)]
    pub network: NetworkConfig,

    /// Where the cohort tables come from
    #[serde(default)]
    pub cohorts: CohortSourceConfig,
}

// ── Network ───────────────────────────────────────────────────────────────────

/// How the miRNA and target name sets are drawn from the four cohort tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntitySelection {
    /// miRNAs from the tumor miRNA table, targets from the normal target table.
    #[default]
    Reference,
    /// Entities present in both cohorts.
    Intersection,
    /// Entities present in either cohort.
    Union,
}

/// Parameters of the differential correlation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Minimum |r_tumor - r_normal| for an edge
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    #[serde(default)]
    pub entity_selection: EntitySelection,
}

fn default_threshold() -> f64 { 0.6 }

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            entity_selection: EntitySelection::default(),
        }
    }
}

impl NetworkConfig {
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            ..Default::default()
        }
    }

    pub fn with_selection(mut self, selection: EntitySelection) -> Self {
        self.entity_selection = selection;
        self
    }

    /// Soft checks. The threshold is never rejected, only reported.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if !self.threshold.is_finite() {
            warnings.push(format!("threshold {} is not finite", self.threshold));
        } else if self.threshold <= 0.0 {
            warnings.push(format!(
                "threshold {} <= 0 admits every non-degenerate pair",
                self.threshold
            ));
        } else if self.threshold > 2.0 {
            warnings.push(format!(
                "threshold {} exceeds the maximum possible |dys| of 2.0",
                self.threshold
            ));
        } else if self.threshold > 1.0 {
            warnings.push(format!("threshold {} is above 1.0", self.threshold));
        }
        warnings
    }
}

// ── Cohort sources ────────────────────────────────────────────────────────────

/// Delimited matrix files holding both tumor and normal samples.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohortSourceConfig {
    /// miRNA expression matrix (samples × miRNAs)
    #[serde(default)]
    pub mirna_path: Option<String>,

    /// Target matrix (samples × genes)
    #[serde(default)]
    pub target_path: Option<String>,

    /// Modality of the target matrix
    #[serde(default = "default_target_modality")]
    pub target_modality: Modality,

    /// Field delimiter
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

fn default_target_modality() -> Modality { Modality::GeneExpression }
fn default_delimiter() -> char { '\t' }

impl Default for CohortSourceConfig {
    fn default() -> Self {
        Self {
            mirna_path: None,
            target_path: None,
            target_modality: default_target_modality(),
            delimiter: default_delimiter(),
        }
    }
}

// ── Helper Methods ─────────────────────────────────────────────────────────────

impl OncomirConfig {
    /// Load from YAML file
    pub fn from_yaml(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Load from JSON file
    pub fn from_json(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Load from TOML file
    pub fn from_toml(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Pick the parser from the file extension (yaml/yml, json, toml).
    pub fn from_file(path: &str) -> Result<Self> {
        let ext = std::path::Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml(path),
            Some("json") => Self::from_json(path),
            Some("toml") => Self::from_toml(path),
            _ => Err(crate::error::OncomirError::Config(format!(
                "unsupported config extension: {path}"
            ))),
        }
    }

    /// Save to YAML file
    pub fn to_yaml(&self, path: &str) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OncomirConfig::default();
        assert!((config.network.threshold - 0.6).abs() < 1e-12);
        assert_eq!(config.network.entity_selection, EntitySelection::Reference);
        assert_eq!(config.cohorts.delimiter, '\t');
        assert!(config.cohorts.mirna_path.is_none());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "network:\n  threshold: 0.8\n";
        let config: OncomirConfig = serde_yaml::from_str(yaml).unwrap();
        assert!((config.network.threshold - 0.8).abs() < 1e-12);
        assert_eq!(config.network.entity_selection, EntitySelection::Reference);
        assert_eq!(config.cohorts.target_modality, Modality::GeneExpression);
    }

    #[test]
    fn test_toml_selection() {
        let raw = r#"
            [network]
            entity_selection = "intersection"

            [cohorts]
            mirna_path = "mirna.tsv"
            target_modality = "PRO"
            delimiter = ","
        "#;
        let config: OncomirConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.network.entity_selection, EntitySelection::Intersection);
        assert!((config.network.threshold - 0.6).abs() < 1e-12);
        assert_eq!(config.cohorts.mirna_path.as_deref(), Some("mirna.tsv"));
        assert_eq!(config.cohorts.target_modality, Modality::ProteinExpression);
        assert_eq!(config.cohorts.delimiter, ',');
    }

    #[test]
    fn test_validate_threshold() {
        assert!(NetworkConfig::default().validate().is_empty());
        assert!(NetworkConfig::with_threshold(1.0).validate().is_empty());
        assert_eq!(NetworkConfig::with_threshold(0.0).validate().len(), 1);
        assert_eq!(NetworkConfig::with_threshold(1.5).validate().len(), 1);
        assert_eq!(NetworkConfig::with_threshold(f64::NAN).validate().len(), 1);
    }

    #[test]
    fn test_yaml_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("oncomir.yaml");
        let path = path.to_str().unwrap();

        let mut config = OncomirConfig::default();
        config.network = NetworkConfig::with_threshold(0.45).with_selection(EntitySelection::Union);
        config.to_yaml(path).unwrap();

        let parsed = OncomirConfig::from_file(path).unwrap();
        assert!((parsed.network.threshold - 0.45).abs() < 1e-12);
        assert_eq!(parsed.network.entity_selection, EntitySelection::Union);
    }

    #[test]
    fn test_unknown_extension_rejected() {
        assert!(OncomirConfig::from_file("settings.ini").is_err());
    }
}
