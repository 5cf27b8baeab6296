//! NaN-aware summary statistics for mapped fields.

/// Fraction of NaN values; `0.0` for an empty slice.
pub fn nan_ratio(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().filter(|v| v.is_nan()).count() as f64 / values.len() as f64
}

/// Check whether any value is NaN.
pub fn has_missing_values(values: &[f64]) -> bool {
    values.iter().any(|v| v.is_nan())
}

/// Mean over non-NaN values; NaN when there are none.
pub fn nan_mean(values: &[f64]) -> f64 {
    let (sum, count) = values
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// Population standard deviation over non-NaN values; NaN when there are none.
pub fn nan_std(values: &[f64]) -> f64 {
    let mean = nan_mean(values);
    if mean.is_nan() {
        return f64::NAN;
    }
    let (sum_sq, count) = values
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, count), v| {
            (sum + (v - mean) * (v - mean), count + 1)
        });
    (sum_sq / count as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_stats() {
        let values = [1.0, f64::NAN, 3.0, f64::NAN];
        assert_eq!(nan_ratio(&values), 0.5);
        assert_eq!(nan_mean(&values), 2.0);
        assert_eq!(nan_std(&values), 1.0);
        assert!(has_missing_values(&values));
    }

    #[test]
    fn test_all_nan() {
        let values = [f64::NAN; 3];
        assert_eq!(nan_ratio(&values), 1.0);
        assert!(nan_mean(&values).is_nan());
        assert!(nan_std(&values).is_nan());
        assert_eq!(nan_ratio(&[]), 0.0);
    }
}
