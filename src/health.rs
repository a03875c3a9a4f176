use crate::schema::{HealthScore, HealthStatus, ScoreBreakdown};
use rust_decimal::Decimal;

// Tiers are (exclusive lower bound, points), checked top-down.
const BALANCE_TIERS: [(Decimal, u8); 3] = [
    (Decimal::from_parts(500, 0, 0, false, 0), 40),
    (Decimal::from_parts(200, 0, 0, false, 0), 30),
    (Decimal::ZERO, 20),
];

const BENEFIT_TIERS: [(Decimal, u8); 3] = [
    (Decimal::from_parts(200, 0, 0, false, 0), 30),
    (Decimal::from_parts(100, 0, 0, false, 0), 20),
    (Decimal::ZERO, 10),
];

const RATIO_TIERS: [(Decimal, u8); 3] = [
    (Decimal::from_parts(3, 0, 0, false, 1), 30),
    (Decimal::from_parts(1, 0, 0, false, 1), 20),
    (Decimal::ZERO, 10),
];

fn tier_points(value: Decimal, tiers: &[(Decimal, u8)]) -> u8 {
    tiers
        .iter()
        .find(|(floor, _)| value > *floor)
        .map(|(_, points)| *points)
        .unwrap_or(0)
}

/// Scores short-term stability out of 100.
///
/// The benefit component is skipped without a benefit balance and the ratio
/// component is skipped when there is no income.
pub fn score(
    total_income: Decimal,
    total_expenses: Decimal,
    benefit_balance: Option<Decimal>,
) -> HealthScore {
    let current_balance = total_income - total_expenses;

    let ratio = if total_income > Decimal::ZERO {
        tier_points(current_balance / total_income, &RATIO_TIERS)
    } else {
        0
    };

    let breakdown = ScoreBreakdown {
        balance: tier_points(current_balance, &BALANCE_TIERS),
        benefit: benefit_balance
            .map(|b| tier_points(b, &BENEFIT_TIERS))
            .unwrap_or(0),
        ratio,
    };

    let score = breakdown.total();
    HealthScore {
        score,
        breakdown,
        days_until_crisis: None,
        status: HealthStatus::from_score(score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_nothing_qualifies() {
        let result = score(Decimal::ZERO, Decimal::ZERO, None);
        assert_eq!(result.score, 0);
        assert_eq!(result.breakdown, ScoreBreakdown::default());
        assert_eq!(result.status, HealthStatus::Critical);
        assert_eq!(result.days_until_crisis, None);
    }

    #[test]
    fn test_household_scenario() {
        let result = score(dec!(2400), dec!(2263), Some(dec!(296.55)));
        assert_eq!(result.breakdown.balance, 20);
        assert_eq!(result.breakdown.benefit, 30);
        assert_eq!(result.breakdown.ratio, 10);
        assert_eq!(result.score, 60);
        assert_eq!(result.status, HealthStatus::Stable);
    }

    #[test]
    fn test_maximum() {
        let result = score(dec!(5000), dec!(1000), Some(dec!(250)));
        assert_eq!(result.score, 100);
        assert_eq!(result.status, HealthStatus::Thriving);
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        // Balance exactly 500 earns the 200 tier.
        assert_eq!(score(dec!(500), dec!(0), None).breakdown.balance, 30);
        assert_eq!(score(dec!(500.01), dec!(0), None).breakdown.balance, 40);
        assert_eq!(score(dec!(200), dec!(0), None).breakdown.balance, 20);

        assert_eq!(score(dec!(0), dec!(0), Some(dec!(200))).breakdown.benefit, 20);
        assert_eq!(score(dec!(0), dec!(0), Some(dec!(100))).breakdown.benefit, 10);
        assert_eq!(score(dec!(0), dec!(0), Some(dec!(0))).breakdown.benefit, 0);

        // Ratio exactly 0.3 earns the 0.1 tier.
        assert_eq!(score(dec!(1000), dec!(700), None).breakdown.ratio, 20);
        assert_eq!(score(dec!(1000), dec!(900), None).breakdown.ratio, 10);
        assert_eq!(score(dec!(1000), dec!(1000), None).breakdown.ratio, 0);
    }

    #[test]
    fn test_deficit_scores_zero_on_balance_and_ratio() {
        let result = score(dec!(1000), dec!(1500), Some(dec!(50)));
        assert_eq!(result.breakdown.balance, 0);
        assert_eq!(result.breakdown.ratio, 0);
        assert_eq!(result.breakdown.benefit, 10);
        assert_eq!(result.score, 10);
    }

    #[test]
    fn test_expenses_without_income_skip_ratio() {
        let result = score(Decimal::ZERO, dec!(300), Some(dec!(150)));
        assert_eq!(result.breakdown.ratio, 0);
        assert_eq!(result.score, 20);
    }

    #[test]
    fn test_score_is_bounded() {
        let values = [
            dec!(0),
            dec!(0.01),
            dec!(99.99),
            dec!(100),
            dec!(150),
            dec!(200),
            dec!(450),
            dec!(500),
            dec!(1000),
            dec!(1_000_000),
        ];

        for income in values {
            for expenses in values {
                for benefit in values.iter().map(|b| Some(*b)).chain([None]) {
                    let result = score(income, expenses, benefit);
                    assert!(result.score <= 100);
                    assert_eq!(result.score, result.breakdown.total());
                    assert!(result.breakdown.balance <= 40);
                    assert!(result.breakdown.benefit <= 30);
                    assert!(result.breakdown.ratio <= 30);
                }
            }
        }
    }
}
