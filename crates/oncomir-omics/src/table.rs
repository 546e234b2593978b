//! Sample-indexed numeric tables.

use std::collections::{HashMap, HashSet};

use oncomir_common::{OncomirError, Result};

/// A samples × entities matrix of `f64` values.
///
/// Values are stored column-major because every consumer walks whole
/// entity columns. Missing measurements are `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct CohortTable {
    samples: Vec<String>,
    columns: Vec<String>,
    column_index: HashMap<String, usize>,
    /// column-major: values[c * n_samples + s]
    values: Vec<f64>,
}

impl CohortTable {
    /// Build from row-major data (one `Vec` per sample).
    pub fn from_rows(samples: Vec<String>, columns: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self> {
        if rows.len() != samples.len() {
            return Err(OncomirError::InvalidTable(format!(
                "{} sample ids but {} rows",
                samples.len(),
                rows.len()
            )));
        }
        let n = samples.len();
        let mut values = vec![f64::NAN; n * columns.len()];
        for (s, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(OncomirError::InvalidTable(format!(
                    "row for sample '{}' has {} values, expected {}",
                    samples[s],
                    row.len(),
                    columns.len()
                )));
            }
            for (c, v) in row.iter().enumerate() {
                values[c * n + s] = *v;
            }
        }
        Self::assemble(samples, columns, values)
    }

    /// Build from column data (one `Vec` per entity, each of length `samples.len()`).
    pub fn from_columns(samples: Vec<String>, columns: Vec<(String, Vec<f64>)>) -> Result<Self> {
        let n = samples.len();
        let mut names = Vec::with_capacity(columns.len());
        let mut values = Vec::with_capacity(n * columns.len());
        for (name, data) in columns {
            if data.len() != n {
                return Err(OncomirError::InvalidTable(format!(
                    "column '{}' has {} values, expected {}",
                    name,
                    data.len(),
                    n
                )));
            }
            names.push(name);
            values.extend(data);
        }
        Self::assemble(samples, names, values)
    }

    fn assemble(samples: Vec<String>, columns: Vec<String>, values: Vec<f64>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(samples.len());
        for s in &samples {
            if !seen.insert(s.as_str()) {
                return Err(OncomirError::InvalidTable(format!("duplicate sample id '{s}'")));
            }
        }

        let mut column_index = HashMap::with_capacity(columns.len());
        for (i, c) in columns.iter().enumerate() {
            if column_index.insert(c.clone(), i).is_some() {
                return Err(OncomirError::InvalidTable(format!("duplicate column '{c}'")));
            }
        }

        Ok(Self {
            samples,
            columns,
            column_index,
            values,
        })
    }

    pub fn n_samples(&self) -> usize {
        self.samples.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty() || self.columns.is_empty()
    }

    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index.contains_key(name)
    }

    pub fn has_sample(&self, sample: &str) -> bool {
        self.samples.iter().any(|s| s == sample)
    }

    /// Values of one entity across all samples, in sample order.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.column_index.get(name).map(|&i| self.column_at(i))
    }

    pub fn column_at(&self, index: usize) -> &[f64] {
        let n = self.samples.len();
        &self.values[index * n..(index + 1) * n]
    }

    pub fn value(&self, sample: &str, column: &str) -> Option<f64> {
        let s = self.samples.iter().position(|x| x == sample)?;
        self.column(column).map(|c| c[s])
    }

    /// True if both tables list exactly the same samples in the same order.
    pub fn has_same_index(&self, other: &CohortTable) -> bool {
        self.samples == other.samples
    }

    /// True if both tables hold the same sample set, in any order.
    pub fn has_same_sample_set(&self, other: &CohortTable) -> bool {
        if self.samples.len() != other.samples.len() {
            return false;
        }
        let mine: HashSet<&str> = self.samples.iter().map(String::as_str).collect();
        other.samples.iter().all(|s| mine.contains(s.as_str()))
    }

    /// New table holding `samples` (in that order). Every sample must exist.
    pub fn reindex(&self, samples: &[String]) -> Result<CohortTable> {
        let position: HashMap<&str, usize> = self
            .samples
            .iter()
            .enumerate()
            .map(|(i, s)| (s.as_str(), i))
            .collect();

        let mut rows = Vec::with_capacity(samples.len());
        for s in samples {
            match position.get(s.as_str()) {
                Some(&i) => rows.push(i),
                None => {
                    return Err(OncomirError::InvalidTable(format!(
                        "sample '{s}' is not in the table"
                    )))
                }
            }
        }

        let n = self.samples.len();
        let mut values = Vec::with_capacity(rows.len() * self.columns.len());
        for c in 0..self.columns.len() {
            let col = &self.values[c * n..(c + 1) * n];
            values.extend(rows.iter().map(|&r| col[r]));
        }

        Self::assemble(samples.to_vec(), self.columns.clone(), values)
    }

    /// Keep only rows whose sample id satisfies `keep`, preserving order.
    pub fn filter_samples<F>(&self, mut keep: F) -> CohortTable
    where
        F: FnMut(&str) -> bool,
    {
        let kept: Vec<String> = self.samples.iter().filter(|s| keep(s)).cloned().collect();
        // every kept id comes from this table, so reindex cannot fail
        self.reindex(&kept).unwrap_or_else(|_| self.empty_like())
    }

    /// New table restricted to `columns` (in that order), skipping unknown names.
    pub fn select_columns<S: AsRef<str>>(&self, columns: &[S]) -> CohortTable {
        let n = self.samples.len();
        let mut names = Vec::new();
        let mut values = Vec::new();
        for name in columns {
            let name = name.as_ref();
            if let Some(&i) = self.column_index.get(name) {
                if names.iter().any(|x: &String| x == name) {
                    continue;
                }
                names.push(name.to_string());
                values.extend_from_slice(&self.values[i * n..(i + 1) * n]);
            }
        }
        let column_index = names.iter().cloned().enumerate().map(|(i, c)| (c, i)).collect();
        CohortTable {
            samples: self.samples.clone(),
            columns: names,
            column_index,
            values,
        }
    }

    fn empty_like(&self) -> CohortTable {
        CohortTable {
            samples: Vec::new(),
            columns: self.columns.clone(),
            column_index: self.column_index.clone(),
            values: Vec::new(),
        }
    }
}
