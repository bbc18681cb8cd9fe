//! Closed-form discounting and compounding of single amounts

/// Discount factor `1 / (1 + rate)^periods`
pub fn discount_factor(rate: f64, periods: u32) -> f64 {
    if periods == 0 {
        return 1.0;
    }

    1.0 / (1.0 + rate).powf(periods as f64)
}

/// Present value of a single future amount.
///
/// # Arguments
/// * `future_value` - Amount received (positive) or paid (negative) at `periods`
/// * `rate` - Per-period rate as a decimal (e.g., 0.023 for 2.3%)
/// * `periods` - Number of periods between today and the cash flow
///
/// Zero periods returns `future_value` unchanged. No rounding is applied.
pub fn present_value(future_value: f64, rate: f64, periods: u32) -> f64 {
    if periods == 0 {
        return future_value;
    }

    future_value / (1.0 + rate).powf(periods as f64)
}

/// Accumulated value of `principal` after `periods`, compounding
/// `compoundings_per_period` times per period at `nominal_rate`.
///
/// A compounding frequency of zero is treated as no compounding.
pub fn compound_interest(
    principal: f64,
    nominal_rate: f64,
    periods: u32,
    compoundings_per_period: u32,
) -> f64 {
    if compoundings_per_period == 0 {
        return principal;
    }

    let m = compoundings_per_period as f64;
    let exponent = compoundings_per_period as f64 * periods as f64;
    principal * (1.0 + nominal_rate / m).powf(exponent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_value() {
        let pv = present_value(40_000.00, 0.023, 4);
        assert!((pv - 36_522.24).abs() < 0.01, "got {}", pv);

        let pv = present_value(489_000.13, 0.053, 43);
        assert!((pv - 53_074.88).abs() < 0.01, "got {}", pv);
    }

    #[test]
    fn test_zero_periods_is_undiscounted() {
        for &rate in &[-0.5, 0.0, 0.07, 0.999] {
            assert_eq!(present_value(1234.56, rate, 0), 1234.56);
        }
    }

    #[test]
    fn test_zero_rate_is_undiscounted() {
        for n in 0..50 {
            assert_eq!(present_value(-250.0, 0.0, n), -250.0);
        }
    }

    #[test]
    fn test_period_counts_beyond_i32() {
        let n = i32::MAX as u32 + 1;
        let pv = present_value(100.0, 0.01, n);
        assert!(pv.is_finite() && pv >= 0.0 && pv < 1e-12, "got {}", pv);
        assert!(discount_factor(0.01, u32::MAX) < 1e-12);

        // A zero rate never discounts, however long the horizon
        assert_eq!(present_value(100.0, 0.0, u32::MAX), 100.0);
    }

    #[test]
    fn test_discount_factor_matches_present_value() {
        let v = discount_factor(0.06, 12);
        let expected = present_value(1.0, 0.06, 12);
        assert!((v - expected).abs() < 1e-12);
        assert_eq!(discount_factor(0.06, 0), 1.0);
    }

    #[test]
    fn test_compound_interest() {
        let s = compound_interest(1500.00, 0.043, 6, 4);
        assert!((s - 1938.84).abs() < 0.01, "got {}", s);
    }

    #[test]
    fn test_compound_interest_degenerate_inputs() {
        assert_eq!(compound_interest(1000.0, 0.05, 0, 12), 1000.0);
        assert_eq!(compound_interest(1000.0, 0.05, 10, 0), 1000.0);

        // Annual compounding is plain (1 + r)^n
        let s = compound_interest(1000.0, 0.05, 2, 1);
        assert!((s - 1102.5).abs() < 1e-9);
    }
}
