use crate::schema::{EntryKind, LedgerEntry};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LedgerTotals {
    #[schemars(with = "f64")]
    pub total_income: Decimal,

    #[schemars(with = "f64")]
    pub total_expenses: Decimal,

    /// Expense sums keyed by the exact category label.
    #[schemars(with = "BTreeMap<String, f64>")]
    pub by_category: BTreeMap<String, Decimal>,
}

impl LedgerTotals {
    pub fn current_balance(&self) -> Decimal {
        self.total_income - self.total_expenses
    }
}

pub fn aggregate(entries: &[LedgerEntry]) -> LedgerTotals {
    entries
        .iter()
        .fold(LedgerTotals::default(), |mut totals, entry| {
            match entry.kind {
                EntryKind::Income => totals.total_income += entry.amount,
                EntryKind::Expense => {
                    totals.total_expenses += entry.amount;
                    *totals
                        .by_category
                        .entry(entry.category.clone())
                        .or_insert(Decimal::ZERO) += entry.amount;
                }
            }
            totals
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_empty_ledger() {
        let totals = aggregate(&[]);
        assert_eq!(totals.total_income, Decimal::ZERO);
        assert_eq!(totals.total_expenses, Decimal::ZERO);
        assert!(totals.by_category.is_empty());
        assert_eq!(totals.current_balance(), Decimal::ZERO);
    }

    #[test]
    fn test_totals_and_categories() {
        let entries = vec![
            LedgerEntry::income("Salary", dec!(2400), date()),
            LedgerEntry::expense("Rent", dec!(850), date()),
            LedgerEntry::expense("Groceries", dec!(120.50), date()),
            LedgerEntry::expense("Groceries", dec!(79.50), date()),
            LedgerEntry::expense("groceries", dec!(10), date()),
        ];

        let totals = aggregate(&entries);
        assert_eq!(totals.total_income, dec!(2400));
        assert_eq!(totals.total_expenses, dec!(1060));
        assert_eq!(totals.current_balance(), dec!(1340));
        assert_eq!(totals.by_category.len(), 3);
        assert_eq!(totals.by_category["Groceries"], dec!(200));
        assert_eq!(totals.by_category["groceries"], dec!(10));
        assert_eq!(totals.by_category["Rent"], dec!(850));
        assert!(!totals.by_category.contains_key("Salary"));
    }

    #[test]
    fn test_partition_property() {
        let amounts = [dec!(0), dec!(0.01), dec!(12.34), dec!(999.99), dec!(5000)];
        let mut entries = Vec::new();
        for (i, amount) in amounts.iter().enumerate() {
            for j in 0..=i {
                let entry = if (i + j) % 2 == 0 {
                    LedgerEntry::income(format!("in-{j}"), *amount, date())
                } else {
                    LedgerEntry::expense(format!("out-{j}"), *amount, date())
                };
                entries.push(entry);
            }

            let totals = aggregate(&entries);
            let sum: Decimal = entries.iter().map(|e| e.amount).sum();
            assert_eq!(totals.total_income + totals.total_expenses, sum);

            let category_sum: Decimal = totals.by_category.values().copied().sum();
            assert_eq!(category_sum, totals.total_expenses);
        }
    }
}
