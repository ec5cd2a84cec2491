use std::fmt;

use serde::Serialize;

use crate::data::model::{NormalizedRecord, NumericField};

// ---------------------------------------------------------------------------
// Pearson correlation
// ---------------------------------------------------------------------------

/// Pearson correlation of two equal-length sequences.
///
/// Returns exactly 0.0 when either sequence has zero variance (the
/// denominator is zero) instead of NaN. Non-finite input is not masked:
/// an infinite or NaN element yields NaN. Extra elements of the longer
/// sequence are ignored.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    let (x, y) = (&x[..n], &y[..n]);
    if is_constant(x) || is_constant(y) {
        return 0.0;
    }
    let nf = n as f64;

    let sum_x: f64 = x.iter().sum();
    let sum_y: f64 = y.iter().sum();
    let sum_xy: f64 = x.iter().zip(y).map(|(a, b)| a * b).sum();
    let sum_x2: f64 = x.iter().map(|a| a * a).sum();
    let sum_y2: f64 = y.iter().map(|b| b * b).sum();

    let numerator = nf * sum_xy - sum_x * sum_y;
    let var_x = nf * sum_x2 - sum_x * sum_x;
    let var_y = nf * sum_y2 - sum_y * sum_y;

    // Rounding can leave a variance term at or slightly below zero for
    // near-constant input. NaN terms fail both comparisons and propagate.
    if var_x <= 0.0 || var_y <= 0.0 {
        return 0.0;
    }
    numerator / (var_x * var_y).sqrt()
}

/// Empty or all-equal sequences have zero variance; the sum formula can
/// round that to a tiny non-zero value, so test it directly.
fn is_constant(values: &[f64]) -> bool {
    match values.first() {
        Some(first) => values.iter().all(|v| v == first),
        None => true,
    }
}

// ---------------------------------------------------------------------------
// Correlation matrix
// ---------------------------------------------------------------------------

/// Square, symmetric matrix of Pearson coefficients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    /// Row and column order.
    pub fields: Vec<NumericField>,
    /// `values[i][j]` is the coefficient of `fields[i]` against `fields[j]`.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: NumericField, b: NumericField) -> Option<f64> {
        let i = self.fields.iter().position(|f| *f == a)?;
        let j = self.fields.iter().position(|f| *f == b)?;
        Some(self.values[i][j])
    }

    /// Display labels in row order.
    pub fn labels(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.label()).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Correlation matrix over [`NumericField::ALL`].
pub fn correlation_matrix(records: &[NormalizedRecord]) -> CorrelationMatrix {
    correlation_matrix_for(records, &NumericField::ALL)
}

/// Correlation matrix over an explicit field order. Every pair is computed,
/// the diagonal included.
pub fn correlation_matrix_for(
    records: &[NormalizedRecord],
    fields: &[NumericField],
) -> CorrelationMatrix {
    let columns: Vec<Vec<f64>> = fields.iter().map(|f| f.values(records)).collect();
    let values = columns
        .iter()
        .map(|a| columns.iter().map(|b| pearson_correlation(a, b)).collect())
        .collect();
    CorrelationMatrix {
        fields: fields.to_vec(),
        values,
    }
}

// ---------------------------------------------------------------------------
// Strength labels
// ---------------------------------------------------------------------------

/// Qualitative band of |r|. Lower bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum CorrelationStrength {
    VeryWeak,
    Weak,
    Moderate,
    Strong,
    VeryStrong,
}

impl CorrelationStrength {
    pub fn from_coefficient(r: f64) -> Self {
        let magnitude = r.abs();
        if magnitude >= 0.7 {
            CorrelationStrength::VeryStrong
        } else if magnitude >= 0.5 {
            CorrelationStrength::Strong
        } else if magnitude >= 0.3 {
            CorrelationStrength::Moderate
        } else if magnitude >= 0.1 {
            CorrelationStrength::Weak
        } else {
            CorrelationStrength::VeryWeak
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CorrelationStrength::VeryStrong => "Very Strong",
            CorrelationStrength::Strong => "Strong",
            CorrelationStrength::Moderate => "Moderate",
            CorrelationStrength::Weak => "Weak",
            CorrelationStrength::VeryWeak => "Very Weak",
        }
    }
}

impl fmt::Display for CorrelationStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    #[test]
    fn perfect_linear_relation() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [2.0, 4.0, 6.0, 8.0];
        assert!((pearson_correlation(&x, &y) - 1.0).abs() < 1e-9);
        let neg = [8.0, 6.0, 4.0, 2.0];
        assert!((pearson_correlation(&x, &neg) + 1.0).abs() < 1e-9);
    }

    #[test]
    fn zero_variance_is_exactly_zero() {
        let x = [5.0, 5.0, 5.0];
        let y = [1.0, 2.0, 3.0];
        assert_eq!(pearson_correlation(&x, &y), 0.0);
        assert_eq!(pearson_correlation(&x, &x), 0.0);
        assert_eq!(pearson_correlation(&[], &[]), 0.0);
    }

    #[test]
    fn non_finite_input_is_not_reported_as_uncorrelated() {
        let x = [f64::INFINITY, 50_000.0, 60_000.0];
        let y = [1.0, 2.0, 3.0];
        assert!(pearson_correlation(&x, &y).is_nan());
        assert!(pearson_correlation(&x, &x).is_nan());
        assert!(pearson_correlation(&[f64::NAN, 1.0], &[1.0, 2.0]).is_nan());
    }

    #[test]
    fn matrix_is_symmetric_with_unit_diagonal() {
        let records: Vec<_> = (0..6)
            .map(|i| {
                let mut r = record(1_000.0 * i as f64 + (i % 2) as f64 * 300.0);
                r.work_experience = i as f64;
                r.gpa = 4.0 - 0.2 * i as f64;
                r.certifications = (i % 3) as f64;
                r.internships = (i * i) as f64;
                r.job_changes = (5 - i) as f64;
                r.networking_score = (i % 4) as f64;
                r
            })
            .collect();
        let m = correlation_matrix(&records);
        assert_eq!(m.len(), 7);
        assert_eq!(m.labels()[0], "Experience");
        for i in 0..7 {
            assert!((m.values[i][i] - 1.0).abs() < 1e-9);
            for j in 0..7 {
                assert!((m.values[i][j] - m.values[j][i]).abs() < 1e-12);
            }
        }
        let r = m
            .get(NumericField::WorkExperience, NumericField::Gpa)
            .unwrap();
        assert!((r + 1.0).abs() < 1e-9);
    }

    #[test]
    fn strength_bands_are_inclusive_at_lower_bound() {
        use CorrelationStrength::*;
        assert_eq!(CorrelationStrength::from_coefficient(0.7), VeryStrong);
        assert_eq!(CorrelationStrength::from_coefficient(-0.69), Strong);
        assert_eq!(CorrelationStrength::from_coefficient(0.5), Strong);
        assert_eq!(CorrelationStrength::from_coefficient(0.3), Moderate);
        assert_eq!(CorrelationStrength::from_coefficient(-0.1), Weak);
        assert_eq!(CorrelationStrength::from_coefficient(0.09), VeryWeak);
        assert_eq!(VeryStrong.label(), "Very Strong");
    }
}
