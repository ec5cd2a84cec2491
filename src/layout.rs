use crate::data::model::{NormalizedRecord, NumericField};

/// (min, max) of the finite values; `None` when there are none.
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Map `value` from `extent` onto `[0, 1]`. A zero-width extent maps to 0.5.
pub fn unit_scale(value: f64, (lo, hi): (f64, f64)) -> f64 {
    let span = hi - lo;
    if span == 0.0 {
        0.5
    } else {
        (value - lo) / span
    }
}

/// Parallel-coordinates geometry: one polyline per record, vertex `k` being
/// `fields[k]` scaled to `[0, 1]` over that field's extent in `records`.
pub fn parallel_coordinates(
    records: &[NormalizedRecord],
    fields: &[NumericField],
) -> Vec<Vec<f64>> {
    let extents: Vec<(f64, f64)> = fields
        .iter()
        .map(|f| extent(records.iter().map(|r| f.value(r))).unwrap_or((0.0, 0.0)))
        .collect();

    records
        .iter()
        .map(|record| {
            fields
                .iter()
                .zip(&extents)
                .map(|(field, ext)| unit_scale(field.value(record), *ext))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    #[test]
    fn extent_skips_non_finite() {
        assert_eq!(extent([3.0, f64::NAN, -1.0, 7.0]), Some((-1.0, 7.0)));
        assert_eq!(extent([f64::NAN]), None);
        assert_eq!(extent(Vec::new()), None);
    }

    #[test]
    fn unit_scale_handles_flat_extent() {
        assert_eq!(unit_scale(5.0, (0.0, 10.0)), 0.5);
        assert_eq!(unit_scale(10.0, (0.0, 10.0)), 1.0);
        assert_eq!(unit_scale(4.0, (4.0, 4.0)), 0.5);
    }

    #[test]
    fn unit_scale_keeps_tiny_extent() {
        assert_eq!(unit_scale(0.0, (0.0, 1e-17)), 0.0);
        assert_eq!(unit_scale(1e-17, (0.0, 1e-17)), 1.0);
    }

    #[test]
    fn polylines_span_unit_interval() {
        let records: Vec<_> = [10.0, 20.0, 30.0].iter().map(|&s| record(s)).collect();
        let lines = parallel_coordinates(
            &records,
            &[NumericField::SalaryAt30, NumericField::Gpa],
        );
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], vec![0.0, 0.5]);
        assert_eq!(lines[1], vec![0.5, 0.5]);
        assert_eq!(lines[2], vec![1.0, 0.5]);
    }
}
