use crate::aggregator::LedgerTotals;
use crate::policy::{ForecastPolicy, TagKeywords};
use crate::schema::{EntryKind, EntryTag, LedgerEntry};
use log::debug;
use rust_decimal::Decimal;

/// Resolves the role of an entry: the explicit tag when present, otherwise a
/// keyword match on the category. Rent only applies to expenses and recurring
/// income only to income.
pub fn effective_tag(entry: &LedgerEntry, keywords: &TagKeywords) -> EntryTag {
    if let Some(tag) = entry.tag {
        return tag;
    }

    let category = entry.category.to_lowercase();
    let matches = |words: &[String]| {
        words
            .iter()
            .map(|w| w.trim().to_lowercase())
            .any(|w| !w.is_empty() && category.contains(&w))
    };

    match entry.kind {
        EntryKind::Expense if matches(&keywords.rent) => EntryTag::Rent,
        EntryKind::Income if matches(&keywords.recurring_income) => EntryTag::RecurringIncome,
        _ => EntryTag::Other,
    }
}

/// The ledger-derived quantities the calendar rules draw on.
#[derive(Debug, Clone, PartialEq)]
pub struct CashFlowDrivers {
    pub rent: Option<Decimal>,
    pub paycheck: Option<Decimal>,
    pub daily_baseline: Decimal,
    pub has_income: bool,
    pub has_expenses: bool,
}

impl CashFlowDrivers {
    pub fn detect(entries: &[LedgerEntry], totals: &LedgerTotals, policy: &ForecastPolicy) -> Self {
        let mut rent = None;
        let mut paycheck = None;
        let mut baseline_expenses = Decimal::ZERO;

        for entry in entries {
            let tag = effective_tag(entry, &policy.keywords);
            match (entry.kind, tag) {
                (EntryKind::Expense, EntryTag::Rent) => {
                    rent.get_or_insert(entry.amount);
                }
                (EntryKind::Expense, _) => baseline_expenses += entry.amount,
                (EntryKind::Income, EntryTag::RecurringIncome) => {
                    paycheck.get_or_insert(entry.amount);
                }
                (EntryKind::Income, _) => {}
            }
        }

        let daily_baseline = baseline_expenses / Decimal::from(policy.baseline_days.max(1));

        let drivers = Self {
            rent,
            paycheck,
            daily_baseline,
            has_income: entries.iter().any(|e| e.is_income() && e.amount > Decimal::ZERO),
            has_expenses: entries.iter().any(|e| e.is_expense() && e.amount > Decimal::ZERO),
        };

        debug!(
            "Detected drivers: rent={:?}, paycheck={:?}, daily baseline={} (income total {}, expense total {})",
            drivers.rent,
            drivers.paycheck,
            drivers.daily_baseline,
            totals.total_income,
            totals.total_expenses
        );

        drivers
    }

    /// Detected amount for a tag, `None` when no entry carries it.
    pub fn detected(&self, tag: EntryTag) -> Option<Decimal> {
        match tag {
            EntryTag::Rent => self.rent,
            EntryTag::RecurringIncome => self.paycheck,
            EntryTag::Other => None,
        }
    }

    /// Whether the ledger records any activity of the kind a tag belongs to.
    pub fn has_activity_for(&self, tag: EntryTag) -> bool {
        match tag {
            EntryTag::Rent => self.has_expenses,
            EntryTag::RecurringIncome => self.has_income,
            EntryTag::Other => false,
        }
    }
}
