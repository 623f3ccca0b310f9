//! Live quote arithmetic from the off-chain reference price
//!
//! Display-only: this path never touches the chain and carries no
//! correctness guarantee for execution, which prices against pool
//! reserves. The caller guards display of zero/NaN results.

/// Target tokens receivable for a base-currency amount at the reference price.
pub fn quote_from_base(base_amount: f64, price_bnb: f64) -> f64 {
    base_amount / price_bnb
}

/// Base currency needed for a target-token amount at the reference price.
pub fn quote_from_target(target_amount: f64, price_bnb: f64) -> f64 {
    target_amount * price_bnb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_round_trips_within_rounding() {
        let price = 0.002;
        for base in [0.001, 0.5, 1.0, 42.0, 1_000_000.0] {
            let target = quote_from_base(base, price);
            let back = quote_from_target(target, price);
            assert!((back - base).abs() < base * 1e-12);
        }
    }

    #[test]
    fn spec_scenario_display_quote() {
        // 1.0 BNB at 0.002 BNB/token reads as 500 tokens
        assert_eq!(quote_from_base(1.0, 0.002), 500.0);
    }

    #[test]
    fn zero_price_is_the_callers_problem() {
        assert!(quote_from_base(1.0, 0.0).is_infinite());
        assert_eq!(quote_from_target(1.0, 0.0), 0.0);
    }
}
