//! Expression helpers shared by the ratio definitions.

use polars::prelude::*;

/// Divide `numerator` by `denominator`, yielding null where the denominator is zero.
///
/// Null inputs propagate as null through the division.
pub fn safe_div(numerator: Expr, denominator: Expr) -> Expr {
    when(denominator.clone().eq(lit(0.0)))
        .then(lit(NULL).cast(DataType::Float64))
        .otherwise(numerator / denominator)
}

/// Express a fraction as a percentage.
pub fn percent(fraction: Expr) -> Expr {
    fraction * lit(100.0)
}

/// Percent change from the previous row: `(x_t / x_{t-1} - 1) * 100`.
///
/// The first row, and any row whose predecessor is null or zero, is null.
pub fn pct_change(value: Expr) -> Expr {
    percent(safe_div(value.clone(), value.shift(lit(1i64))) - lit(1.0))
}

/// Map non-finite floats to `None`.
pub(crate) fn defined(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_div_zero_denominator() {
        let df = df![
            "num" => [10.0, 5.0, 0.0],
            "den" => [4.0, 0.0, 0.0]
        ]
        .unwrap();

        let result = df
            .lazy()
            .select([safe_div(col("num"), col("den")).alias("ratio")])
            .collect()
            .unwrap();

        let values = result.column("ratio").unwrap().f64().unwrap();
        assert!((values.get(0).unwrap() - 2.5).abs() < 1e-12);
        assert_eq!(values.get(1), None);
        assert_eq!(values.get(2), None);
    }

    #[test]
    fn test_pct_change_first_row_undefined() {
        let df = df!["value" => [2.0, 3.0, 1.5]].unwrap();

        let result = df
            .lazy()
            .select([pct_change(col("value")).alias("change")])
            .collect()
            .unwrap();

        let values = result.column("change").unwrap().f64().unwrap();
        assert_eq!(values.get(0), None);
        assert!((values.get(1).unwrap() - 50.0).abs() < 1e-9);
        assert!((values.get(2).unwrap() + 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_defined_filters_non_finite() {
        assert_eq!(defined(Some(f64::NAN)), None);
        assert_eq!(defined(Some(f64::INFINITY)), None);
        assert_eq!(defined(None), None);
        assert_eq!(defined(Some(1.5)), Some(1.5));
    }
}
