//! Shared test utilities for the mapraster workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Synthetic raster and target grid generators
//! - Recorded reference statistics for regression cases
//! - Approximate equality assertions
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{fake_wind_raster, REGRESSION_CASES};
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;

/// Install a test-friendly tracing subscriber once per process.
///
/// Honors `RUST_LOG`; later calls are no-ops.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("mapraster=debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Assert two floats differ by at most `epsilon`.
///
/// NaN on either side fails the assertion.
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001, 1.0, 0.001);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr $(,)?) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if !(diff <= epsilon) {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Assert that a mapped field's NaN-aware statistics match a recorded
/// [`FieldStats`].
///
/// Mean and standard deviation are compared within `epsilon`, the NaN
/// ratio within `1e-9`.
#[macro_export]
macro_rules! assert_field_stats {
    ($field:expr, $expected:expr, $epsilon:expr $(,)?) => {{
        let field = &$field;
        let expected: $crate::FieldStats = $expected;
        $crate::assert_approx_eq!(field.nan_ratio(), expected.nan_ratio, 1e-9);
        $crate::assert_approx_eq!(field.nan_mean(), expected.mean, $epsilon);
        $crate::assert_approx_eq!(field.nan_std(), expected.std, $epsilon);
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_assert_approx_eq_passes() {
        assert_approx_eq!(1.0001, 1.0, 0.001);
        assert_approx_eq!(-5.5, -5.500001, 0.0001);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq!(1.1, 1.0, 0.001);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn test_assert_approx_eq_rejects_nan() {
        assert_approx_eq!(f64::NAN, f64::NAN, 1.0);
    }
}
