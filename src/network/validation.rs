use serde::{Serialize, Deserialize};

/// Outcome of `Network::validate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Validation {
    pub correct: usize,
    pub total: usize,
    /// `correct / total`, or 0.0 when nothing was validated.
    pub accuracy: f64,
}

impl Validation {
    pub fn new(correct: usize, total: usize) -> Validation {
        let accuracy = if total == 0 { 0.0 } else { correct as f64 / total as f64 };
        Validation { correct, total, accuracy }
    }
}

impl From<Validation> for (usize, usize, f64) {
    fn from(v: Validation) -> Self {
        (v.correct, v.total, v.accuracy)
    }
}

impl std::fmt::Display for Validation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} correct of {} = {}%", self.correct, self.total, self.accuracy * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_total_gives_zero_accuracy() {
        let v = Validation::new(0, 0);
        assert_eq!(v.accuracy, 0.0);
        assert_eq!(<(usize, usize, f64)>::from(v), (0, 0, 0.0));
    }

    #[test]
    fn display_matches_report_line() {
        assert_eq!(Validation::new(1, 2).to_string(), "1 correct of 2 = 50%");
    }
}
