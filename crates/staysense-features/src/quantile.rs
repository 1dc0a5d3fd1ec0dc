//! Order-statistic helpers
//!
//! `quantile` follows the linear-interpolation estimator (Hyndman & Fan
//! type 7), which is the default of the common dataframe and array
//! libraries. The interpolation step mirrors their two-sided lerp so that
//! results match reference values bit for bit.

use std::cmp::Ordering;

/// The `q`-th quantile of `values` (`q` in `[0, 1]`)
///
/// Returns `None` for an empty slice, an out-of-range `q` or NaN input.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.iter().any(|v| v.is_nan()) {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    quantile_sorted(&sorted, q)
}

/// The `q`-th quantile of data already sorted in non-decreasing order
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 || !(0.0..=1.0).contains(&q) {
        return None;
    }
    if n == 1 {
        return Some(sorted[0]);
    }

    let h = (n - 1) as f64 * q;
    let j = h.floor() as usize;
    let g = h - h.floor();

    if j + 1 >= n {
        return Some(sorted[n - 1]);
    }
    Some(lerp(sorted[j], sorted[j + 1], g))
}

fn lerp(lo: f64, hi: f64, t: f64) -> f64 {
    let diff = hi - lo;
    if t >= 0.5 {
        hi - diff * (1.0 - t)
    } else {
        lo + diff * t
    }
}

/// Rate relative to its group percentile
///
/// A missing or non-positive percentile, or a missing rate, yields 0.
pub fn deviation(rate: Option<f64>, percentile: Option<f64>) -> f64 {
    match (rate, percentile) {
        (_, None) => 0.0,
        (_, Some(p)) if p.is_nan() || p <= 0.0 => 0.0,
        (None, Some(_)) => 0.0,
        (Some(r), Some(_)) if r.is_nan() => 0.0,
        (Some(r), Some(p)) => r / p,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantile_two_values() {
        assert_eq!(quantile(&[120.0, 80.0], 0.75), Some(110.0));
    }

    #[test]
    fn test_quantile_matches_linear_estimator() {
        let data = [1.0, 2.0, 3.0, 4.0];
        // h = 2.25 -> 3 + 0.25 * (4 - 3)
        assert_eq!(quantile(&data, 0.75), Some(3.25));
        assert_eq!(quantile(&data, 0.0), Some(1.0));
        assert_eq!(quantile(&data, 1.0), Some(4.0));
        assert_eq!(quantile(&data, 0.5), Some(2.5));
    }

    #[test]
    fn test_quantile_single_and_empty() {
        assert_eq!(quantile(&[42.0], 0.75), Some(42.0));
        assert_eq!(quantile(&[], 0.75), None);
    }

    #[test]
    fn test_quantile_rejects_bad_input() {
        assert_eq!(quantile(&[1.0, f64::NAN], 0.5), None);
        assert_eq!(quantile(&[1.0, 2.0], 1.5), None);
        assert_eq!(quantile(&[1.0, 2.0], -0.1), None);
    }

    #[test]
    fn test_deviation_branches() {
        assert_eq!(deviation(Some(110.0), Some(110.0)), 1.0);
        assert_eq!(deviation(Some(55.0), Some(110.0)), 0.5);
        assert_eq!(deviation(Some(55.0), Some(0.0)), 0.0);
        assert_eq!(deviation(Some(55.0), None), 0.0);
        assert_eq!(deviation(None, Some(110.0)), 0.0);
        assert_eq!(deviation(Some(f64::NAN), Some(110.0)), 0.0);
    }
}
