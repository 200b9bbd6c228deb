use std::fmt;

use crate::temperature::Tenths;

/// Running min/mean/max of one station. Renders as `min/mean/max`.
pub trait Summary<T>: fmt::Display + fmt::Debug {
    fn new(first: T) -> Self;

    fn update(&mut self, value: T);

    fn min(&self) -> T;

    fn mean(&self) -> T;

    fn max(&self) -> T;

    fn count(&self) -> u64;
}

/// Exact fixed-point accumulator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedSummary {
    min: i16,
    max: i16,
    total: i64,
    count: u64,
}

impl Summary<Tenths> for FixedSummary {
    fn new(first: Tenths) -> Self {
        Self {
            min: first.0,
            max: first.0,
            total: first.0 as i64,
            count: 1,
        }
    }

    #[inline(always)]
    fn update(&mut self, value: Tenths) {
        self.min = self.min.min(value.0);
        self.max = self.max.max(value.0);
        self.total += value.0 as i64;
        self.count += 1;
    }

    fn min(&self) -> Tenths {
        Tenths(self.min)
    }

    /// `total / count` with integer division, so the mean truncates toward
    /// zero rather than rounding.
    fn mean(&self) -> Tenths {
        // Lies within [min, max], so it fits an i16.
        Tenths((self.total / self.count as i64) as i16)
    }

    fn max(&self) -> Tenths {
        Tenths(self.max)
    }

    fn count(&self) -> u64 {
        self.count
    }
}

impl fmt::Display for FixedSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.min(), self.mean(), self.max())
    }
}

/// Floating accumulator keeping an incremental mean instead of a sum.
#[derive(Clone, Debug, PartialEq)]
pub struct FloatSummary {
    min: f64,
    max: f64,
    mean: f64,
    count: u64,
}

impl Summary<f64> for FloatSummary {
    fn new(first: f64) -> Self {
        Self {
            min: first,
            max: first,
            mean: first,
            count: 1,
        }
    }

    #[inline(always)]
    fn update(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.count += 1;

        // Dividing each term first keeps `value - mean` from overflowing.
        let n = self.count as f64;
        self.mean = (self.mean + (value / n - self.mean / n)).clamp(self.min, self.max);
    }

    fn min(&self) -> f64 {
        self.min
    }

    fn mean(&self) -> f64 {
        self.mean
    }

    fn max(&self) -> f64 {
        self.max
    }

    fn count(&self) -> u64 {
        self.count
    }
}

impl fmt::Display for FloatSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}/{:.1}/{:.1}", self.min, self.mean, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(values: &[i16]) -> FixedSummary {
        let mut summary = FixedSummary::new(Tenths(values[0]));
        for &v in &values[1..] {
            summary.update(Tenths(v));
        }
        summary
    }

    fn float(values: &[f64]) -> FloatSummary {
        let mut summary = FloatSummary::new(values[0]);
        for &v in &values[1..] {
            summary.update(v);
        }
        summary
    }

    #[test]
    fn test_fixed_single_value() {
        let summary = fixed(&[-50]);
        assert_eq!(summary.count(), 1);
        assert_eq!(summary.to_string(), "-5.0/-5.0/-5.0");
    }

    #[test]
    fn test_fixed_mean_truncates() {
        let summary = fixed(&[234, 101]);
        assert_eq!(summary.min(), Tenths(101));
        assert_eq!(summary.mean(), Tenths(167));
        assert_eq!(summary.max(), Tenths(234));
        assert_eq!(summary.to_string(), "10.1/16.7/23.4");
    }

    #[test]
    fn test_fixed_mean_truncates_toward_zero() {
        // -335 / 2 = -167 rather than -168.
        let summary = fixed(&[-234, -101]);
        assert_eq!(summary.mean(), Tenths(-167));
        assert_eq!(summary.to_string(), "-23.4/-16.7/-10.1");

        let summary = fixed(&[-3, -4]);
        assert_eq!(summary.to_string(), "-0.4/-0.3/-0.3");
    }

    #[test]
    fn test_fixed_does_not_overflow() {
        let mut summary = FixedSummary::new(Tenths(999));
        for _ in 0..100_000 {
            summary.update(Tenths(999));
        }
        assert_eq!(summary.count(), 100_001);
        assert_eq!(summary.to_string(), "99.9/99.9/99.9");
    }

    #[test]
    fn test_float_incremental_mean() {
        let summary = float(&[23.4, 10.1, -5.0, 7.5]);
        assert_eq!(summary.min(), -5.0);
        assert_eq!(summary.max(), 23.4);
        assert!((summary.mean() - 9.0).abs() < 1e-9);
        assert_eq!(summary.count(), 4);
        assert_eq!(summary.to_string(), "-5.0/9.0/23.4");
    }

    #[test]
    fn test_float_mean_survives_extreme_values() {
        let summary = float(&[1e308, -1e308]);
        assert_eq!(summary.min(), -1e308);
        assert_eq!(summary.max(), 1e308);
        assert_eq!(summary.mean(), 0.0);

        let summary = float(&[f64::MAX, f64::MAX, f64::MAX]);
        assert_eq!(summary.mean(), f64::MAX);

        let summary = float(&[-f64::MAX, f64::MAX, -f64::MAX]);
        assert!(summary.mean().is_finite());
        assert!(summary.min() <= summary.mean() && summary.mean() <= summary.max());
    }

    #[test]
    fn test_float_mean_stays_within_bounds() {
        let values: Vec<f64> = (0..10_000)
            .map(|i| ((i * 37) % 1999) as f64 / 10.0 - 99.9)
            .collect();
        let summary = float(&values);

        assert!(summary.min() <= summary.mean());
        assert!(summary.mean() <= summary.max());

        let exact = values.iter().sum::<f64>() / values.len() as f64;
        assert!((summary.mean() - exact).abs() < 1e-6);
    }
}
