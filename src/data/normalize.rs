use tracing::warn;

use crate::error::{NetError, Result};

/// Per-column min/max statistics for min-max feature scaling.
///
/// Fitting and transforming are separate so the statistics can come from the
/// training rows alone and then be applied to held-out rows. Values outside
/// the fitted range map outside [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureScaler {
    mins: Vec<f64>,
    maxs: Vec<f64>,
}

impl FeatureScaler {
    /// Collects column minima and maxima. All rows must share one width.
    pub fn fit(rows: &[Vec<f64>]) -> Result<FeatureScaler> {
        let width = check_uniform(rows)?;
        let mut mins = vec![f64::INFINITY; width];
        let mut maxs = vec![f64::NEG_INFINITY; width];
        for row in rows {
            for (c, &v) in row.iter().enumerate() {
                mins[c] = mins[c].min(v);
                maxs[c] = maxs[c].max(v);
            }
        }
        Ok(FeatureScaler { mins, maxs })
    }

    /// Rescales every column to `(x - min) / (max - min)`.
    ///
    /// A column whose fitted range is zero is written as 0.0.
    pub fn transform(&self, rows: &mut [Vec<f64>]) -> Result<()> {
        for row in rows.iter() {
            if row.len() != self.width() {
                return Err(NetError::shape("feature row", self.width(), row.len()));
            }
        }

        for c in 0..self.width() {
            if self.is_degenerate(c) {
                if !rows.is_empty() {
                    warn!(column = c, value = self.mins[c], "constant feature column, scaling to 0.0");
                }
                rows.iter_mut().for_each(|row| row[c] = 0.0);
            } else {
                let range = self.maxs[c] - self.mins[c];
                rows.iter_mut().for_each(|row| row[c] = (row[c] - self.mins[c]) / range);
            }
        }
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.mins.len()
    }

    /// `true` when the fitted column has zero range. Unknown columns are not degenerate.
    pub fn is_degenerate(&self, column: usize) -> bool {
        matches!((self.mins.get(column), self.maxs.get(column)), (Some(lo), Some(hi)) if lo == hi)
    }
}

/// Min-max scales every column of `dataset` in place, using statistics from
/// all of its rows.
pub fn normalize_by_feature_scaling(dataset: &mut [Vec<f64>]) -> Result<()> {
    FeatureScaler::fit(dataset)?.transform(dataset)
}

fn check_uniform(rows: &[Vec<f64>]) -> Result<usize> {
    let width = rows.first().map_or(0, |r| r.len());
    match rows.iter().find(|r| r.len() != width) {
        Some(row) => Err(NetError::shape("feature row", width, row.len())),
        None => Ok(width),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_scale_independently() {
        let mut data = vec![
            vec![1.0, 10.0],
            vec![3.0, 20.0],
            vec![2.0, 40.0],
        ];
        normalize_by_feature_scaling(&mut data).unwrap();
        assert_eq!(data[0], vec![0.0, 0.0]);
        assert_eq!(data[1], vec![1.0, 1.0 / 3.0]);
        assert_eq!(data[2], vec![0.5, 1.0]);
    }

    #[test]
    fn constant_column_becomes_zero() {
        let mut data = vec![vec![5.0, 1.0], vec![5.0, 2.0]];
        normalize_by_feature_scaling(&mut data).unwrap();
        assert_eq!(data, vec![vec![0.0, 0.0], vec![0.0, 1.0]]);
    }

    #[test]
    fn ragged_rows_are_rejected_untouched() {
        let mut data = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(matches!(
            normalize_by_feature_scaling(&mut data),
            Err(NetError::ShapeMismatch { expected: 2, actual: 1, .. })
        ));
        assert_eq!(data, vec![vec![1.0, 2.0], vec![3.0]]);
    }

    #[test]
    fn empty_dataset_is_fine() {
        let mut data: Vec<Vec<f64>> = vec![];
        normalize_by_feature_scaling(&mut data).unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn train_only_statistics_apply_to_other_rows() {
        let train = vec![vec![0.0], vec![10.0]];
        let scaler = FeatureScaler::fit(&train).unwrap();
        let mut held_out = vec![vec![5.0], vec![20.0]];
        scaler.transform(&mut held_out).unwrap();
        assert_eq!(held_out, vec![vec![0.5], vec![2.0]]);
        assert!(!scaler.is_degenerate(0));
        assert!(!scaler.is_degenerate(5));
        assert!(scaler.transform(&mut [vec![1.0, 2.0]]).is_err());
    }
}
