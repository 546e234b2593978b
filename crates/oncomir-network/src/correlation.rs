//! Pearson correlation over cohort columns.
//!
//! r = Σ (x_i − x̄)(y_i − ȳ) / ((n − 1) · s_x · s_y), with s the sample
//! standard deviation. Column quantities are computed once and reused for
//! every pairing.

/// Centered values and sample standard deviation of one column.
#[derive(Debug, Clone)]
pub struct ColumnStats {
    centered: Vec<f64>,
    std: f64,
}

impl ColumnStats {
    /// `None` when the column cannot take part in a correlation: fewer than
    /// two samples, any non-finite value, or zero variance.
    ///
    /// Constant columns are rejected before centering: the computed mean of
    /// a constant like 0.1 need not equal it, leaving a non-zero std residue.
    pub fn compute(values: &[f64]) -> Option<Self> {
        let n = values.len();
        if n < 2 || values.iter().any(|v| !v.is_finite()) {
            return None;
        }
        if values.iter().all(|v| *v == values[0]) {
            return None;
        }

        let mean = values.iter().sum::<f64>() / n as f64;
        let centered: Vec<f64> = values.iter().map(|v| v - mean).collect();
        let ss: f64 = centered.iter().map(|c| c * c).sum();
        let std = (ss / (n - 1) as f64).sqrt();

        if !std.is_finite() || std == 0.0 {
            return None;
        }

        Some(Self { centered, std })
    }

    pub fn len(&self) -> usize {
        self.centered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centered.is_empty()
    }

    /// Sample standard deviation (ddof = 1).
    pub fn std(&self) -> f64 {
        self.std
    }

    /// Pearson correlation with another column of the same cohort.
    /// `None` on length mismatch or a non-finite result.
    pub fn pearson(&self, other: &ColumnStats) -> Option<f64> {
        if self.len() != other.len() {
            return None;
        }
        let dot: f64 = self
            .centered
            .iter()
            .zip(&other.centered)
            .map(|(a, b)| a * b)
            .sum();
        let r = dot / ((self.len() - 1) as f64 * self.std * other.std);
        r.is_finite().then_some(r)
    }
}

/// One-shot Pearson correlation of two raw columns.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    let sx = ColumnStats::compute(x)?;
    let sy = ColumnStats::compute(y)?;
    sx.pearson(&sy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_positive_and_negative() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 6.0, 8.0, 10.0];
        let z = [5.0, 4.0, 3.0, 2.0, 1.0];
        assert!((pearson(&x, &y).unwrap() - 1.0).abs() < 1e-12);
        assert!((pearson(&x, &z).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_known_value() {
        // centered dot = 4, Σ squares = 5 for both columns
        let r = pearson(&[1.0, 2.0, 3.0, 4.0], &[1.0, 3.0, 2.0, 4.0]).unwrap();
        assert!((r - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_sample_std() {
        let s = ColumnStats::compute(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        // Σ(x - 5)² = 32, / 7
        assert!((s.std() - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_two_samples_defined() {
        let r = pearson(&[0.0, 1.0], &[3.0, 5.0]).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_columns() {
        assert!(ColumnStats::compute(&[3.0, 3.0, 3.0]).is_none());
        assert!(ColumnStats::compute(&[1.0]).is_none());
        assert!(ColumnStats::compute(&[]).is_none());
        assert!(ColumnStats::compute(&[1.0, f64::NAN, 2.0]).is_none());
        assert!(ColumnStats::compute(&[1.0, f64::INFINITY]).is_none());
    }

    #[test]
    fn test_inexact_constants_are_degenerate() {
        for value in [0.1, 0.7, 1.1, 3.3] {
            for n in 2..=8 {
                let column = vec![value; n];
                assert!(ColumnStats::compute(&column).is_none(), "{value} x {n}");
                assert!(pearson(&[1.0, 2.0, 3.0][..n.min(3)], &column[..n.min(3)]).is_none());
            }
        }
    }

    #[test]
    fn test_length_mismatch() {
        let a = ColumnStats::compute(&[1.0, 2.0, 3.0]).unwrap();
        let b = ColumnStats::compute(&[1.0, 2.0]).unwrap();
        assert!(a.pearson(&b).is_none());
    }
}
