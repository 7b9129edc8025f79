//! Descriptive statistics
//!
//! Small helpers shared by the validation, fleet and analytics queries.
//! All of them ignore non-finite inputs so one corrupt reading cannot turn
//! an aggregate into NaN.

use serde::Serialize;

/// Finite values only
pub fn finite(values: impl IntoIterator<Item = f64>) -> Vec<f64> {
    values.into_iter().filter(|v| v.is_finite()).collect()
}

/// Arithmetic mean of the finite values, `None` if there are none
pub fn mean(values: &[f64]) -> Option<f64> {
    let (sum, n) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((0.0_f64, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Mean that treats "no data" as zero
pub fn mean_or_zero(values: &[f64]) -> f64 {
    mean(values).unwrap_or(0.0)
}

/// Population standard deviation (divides by n, not n - 1)
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    let avg = mean(values)?;
    let (sq, n) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((0.0_f64, 0usize), |(s, n), v| (s + (v - avg).powi(2), n + 1));
    Some((sq / n as f64).sqrt())
}

/// Summary of a series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Statistics {
    /// Number of finite values summarized
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Upper median (`sorted[n / 2]`)
    pub median: f64,
    /// Smallest value
    pub min: f64,
    /// Largest value
    pub max: f64,
    /// Population standard deviation
    pub std_dev: f64,
}

impl Statistics {
    /// Summarize the finite values, `None` if there are none
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut sorted = finite(values);
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let mean = mean(&sorted)?;
        let std_dev = population_std_dev(&sorted)?;
        Some(Self {
            count: sorted.len(),
            mean,
            median: sorted[sorted.len() / 2],
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            std_dev,
        })
    }
}
