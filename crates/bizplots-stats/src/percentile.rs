//! Percentiles with linear interpolation
//!
//! For a sorted sample of n values the q-th percentile sits at rank
//! `q/100 * (n - 1)` and is interpolated between the two closest ranks.
//! NaN values are dropped before ranking; infinities are kept and rank
//! at the ends.

use crate::error::{validation, StatsError, StatsResult};

/// Non-NaN samples sorted ascending
#[derive(Debug, Clone)]
pub struct SortedSamples {
    values: Vec<f64>,
}

impl SortedSamples {
    /// Sort the non-NaN values of a sample set
    ///
    /// Fails when no value remains.
    pub fn from_data<'a>(data: impl IntoIterator<Item = &'a f64>) -> StatsResult<Self> {
        let mut values: Vec<f64> = data.into_iter().copied().filter(|x| !x.is_nan()).collect();
        if values.is_empty() {
            return Err(StatsError::invalid("sample set is empty"));
        }
        values.sort_by(f64::total_cmp);
        Ok(Self { values })
    }

    /// Value at percentile `q` in [0, 100]
    pub fn percentile(&self, q: f64) -> StatsResult<f64> {
        validation::validate_percentile(q)?;
        Ok(self.interpolate(q))
    }

    /// Median (50th percentile)
    pub fn median(&self) -> f64 {
        self.interpolate(50.0)
    }

    fn interpolate(&self, q: f64) -> f64 {
        let last = self.values.len() - 1;
        let rank = q / 100.0 * last as f64;
        let lo = rank.floor() as usize;
        let hi = rank.ceil() as usize;
        let frac = rank - lo as f64;

        let a = self.values[lo.min(last)];
        let b = self.values[hi.min(last)];
        if frac == 0.0 || a == b {
            return a;
        }
        // An infinite end absorbs the interpolation; `inf - inf` must not appear
        if a.is_infinite() {
            return a;
        }
        if b.is_infinite() {
            return b;
        }
        (a + (b - a) * frac).clamp(a, b)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Value at percentile `q` of `data`
pub fn percentile(data: &[f64], q: f64) -> StatsResult<f64> {
    SortedSamples::from_data(data)?.percentile(q)
}

/// Values at several percentiles of `data`, sorting only once
pub fn percentiles(data: &[f64], qs: &[f64]) -> StatsResult<Vec<f64>> {
    let sorted = SortedSamples::from_data(data)?;
    qs.iter().map(|&q| sorted.percentile(q)).collect()
}

/// Median of `data`
pub fn median(data: &[f64]) -> StatsResult<f64> {
    Ok(SortedSamples::from_data(data)?.median())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_interpolates() {
        let data = [1.0, 2.0, 3.0, 4.0];
        // rank = 0.25 * 3 = 0.75 -> 1 + 0.75
        assert!((percentile(&data, 25.0).unwrap() - 1.75).abs() < 1e-12);
        assert!((percentile(&data, 50.0).unwrap() - 2.5).abs() < 1e-12);
        assert_eq!(percentile(&data, 0.0).unwrap(), 1.0);
        assert_eq!(percentile(&data, 100.0).unwrap(), 4.0);
    }

    #[test]
    fn test_percentile_unsorted_input() {
        let data = [9.0, 1.0, 5.0];
        assert_eq!(percentile(&data, 50.0).unwrap(), 5.0);
    }

    #[test]
    fn test_median_matches_fiftieth_percentile() {
        let data = [3.0, 8.0, 1.0, 4.0, 10.0, 2.0];
        let m = median(&data).unwrap();
        let p = percentile(&data, 50.0).unwrap();
        assert!((m - p).abs() < 1e-12);
        assert!((m - 3.5).abs() < 1e-12);
    }

    #[test]
    fn test_nan_dropped() {
        let data = [1.0, f64::NAN, 3.0];
        assert_eq!(median(&data).unwrap(), 2.0);
    }

    #[test]
    fn test_infinities_kept() {
        let data = [1.0, f64::INFINITY];
        assert_eq!(percentile(&data, 100.0).unwrap(), f64::INFINITY);
        assert_eq!(percentile(&data, 0.0).unwrap(), 1.0);
        assert_eq!(median(&data).unwrap(), f64::INFINITY);

        assert_eq!(median(&[f64::INFINITY]).unwrap(), f64::INFINITY);
        assert_eq!(
            percentile(&[f64::NEG_INFINITY, 0.0, f64::INFINITY], 25.0).unwrap(),
            f64::NEG_INFINITY
        );
    }

    #[test]
    fn test_infinite_ends_never_nan() {
        let data = [f64::NEG_INFINITY, f64::INFINITY];
        for q in [0.0, 10.0, 50.0, 90.0, 100.0] {
            assert!(!percentile(&data, q).unwrap().is_nan());
        }
    }

    #[test]
    fn test_empty_rejected() {
        assert!(percentile(&[], 50.0).is_err());
        assert!(median(&[f64::NAN]).is_err());
    }

    #[test]
    fn test_out_of_range_percentile_rejected() {
        assert!(percentile(&[1.0], 101.0).is_err());
        assert!(percentile(&[1.0], -0.5).is_err());
    }

    #[test]
    fn test_percentiles_batch() {
        let data: Vec<f64> = (0..=100).map(|x| x as f64).collect();
        let out = percentiles(&data, &[2.5, 50.0, 97.5]).unwrap();
        assert!((out[0] - 2.5).abs() < 1e-12);
        assert!((out[1] - 50.0).abs() < 1e-12);
        assert!((out[2] - 97.5).abs() < 1e-12);
    }
}
