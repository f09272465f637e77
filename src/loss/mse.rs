pub struct MseLoss;

impl MseLoss {
    /// Scalar MSE: mean((predicted - expected)²). Zero for empty slices.
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        if predicted.is_empty() {
            return 0.0;
        }
        MseLoss::squared_error(predicted, expected) / predicted.len() as f64
    }

    /// Sum of squared differences.
    pub fn squared_error(predicted: &[f64], expected: &[f64]) -> f64 {
        predicted.iter().zip(expected.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum()
    }
}
