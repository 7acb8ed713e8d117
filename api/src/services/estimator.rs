// Emission estimation strategies
//
// The static factor table is a coarse approximation; the trait seam
// lets a calibrated calculation engine replace it without touching the
// emission or ledger services.

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::error::{LedgerError, LedgerResult};

/// Strategy for mapping (category, amount) to an estimated CO2e mass
pub trait EmissionEstimator: Send + Sync {
    fn estimate(&self, category: &str, amount: Decimal) -> LedgerResult<Decimal>;
}

/// Estimator backed by a fixed per-category factor table, in kg CO2e
/// per unit amount
pub struct StaticFactorEstimator {
    factors: HashMap<&'static str, Decimal>,
    default_factor: Decimal,
}

impl StaticFactorEstimator {
    pub fn new() -> Self {
        let factors: HashMap<&'static str, Decimal> = HashMap::from([
            ("car", Decimal::new(21, 2)),
            ("flight", Decimal::new(25, 2)),
            ("train", Decimal::new(4, 2)),
            ("bus", Decimal::new(10, 2)),
            ("electricity", Decimal::new(45, 2)),
            ("gas", Decimal::new(18, 2)),
            ("heating", Decimal::new(20, 2)),
            ("meat", Decimal::new(50, 1)),
            ("dairy", Decimal::new(13, 1)),
            ("produce", Decimal::new(3, 1)),
            ("waste", Decimal::new(5, 1)),
            ("shopping", Decimal::new(20, 1)),
            ("misc", Decimal::new(10, 1)),
        ]);

        StaticFactorEstimator {
            factors,
            default_factor: Decimal::ONE,
        }
    }
}

impl Default for StaticFactorEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl EmissionEstimator for StaticFactorEstimator {
    fn estimate(&self, category: &str, amount: Decimal) -> LedgerResult<Decimal> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidRequest(
                "amount must be positive".to_string(),
            ));
        }

        let factor = self
            .factors
            .get(category)
            .copied()
            .unwrap_or(self.default_factor);

        Ok(amount * factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn known_categories_use_their_factor() {
        let estimator = StaticFactorEstimator::new();

        assert_eq!(estimator.estimate("car", dec!(100)).unwrap(), dec!(21.00));
        assert_eq!(estimator.estimate("meat", dec!(2)).unwrap(), dec!(10.0));
        assert_eq!(estimator.estimate("flight", dec!(4)).unwrap(), dec!(1.00));
    }

    #[test]
    fn unknown_category_defaults_to_factor_one() {
        let estimator = StaticFactorEstimator::new();

        assert_eq!(
            estimator.estimate("unknown_category", dec!(5)).unwrap(),
            dec!(5)
        );
    }

    #[test]
    fn estimates_are_deterministic() {
        let estimator = StaticFactorEstimator::new();

        let first = estimator.estimate("electricity", dec!(12.5)).unwrap();
        let second = estimator.estimate("electricity", dec!(12.5)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        let estimator = StaticFactorEstimator::new();

        assert!(estimator.estimate("car", dec!(0)).is_err());
        assert!(estimator.estimate("car", dec!(-3)).is_err());
    }
}
