//! Seeded demo ledgers for onboarding screens and walkthroughs.
//!
//! The fixed amounts describe a single-earner household a few days away from a
//! rent crunch: $2,400 of salary against $2,263 of spending, $850 of it rent.

use crate::error::{OasisError, Result};
use crate::schema::{BenefitAccount, EntryTag, LedgerEntry};
use chrono::{Datelike, Days, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

struct DemoLine {
    category: &'static str,
    amount: f64,
    day_offset: u64,
    income: bool,
    tag: Option<EntryTag>,
    noisy: bool,
}

const DEMO_LINES: [DemoLine; 5] = [
    DemoLine {
        category: "Salary",
        amount: 2400.0,
        day_offset: 0,
        income: true,
        tag: Some(EntryTag::RecurringIncome),
        noisy: false,
    },
    DemoLine {
        category: "Rent",
        amount: 850.0,
        day_offset: 0,
        income: false,
        tag: Some(EntryTag::Rent),
        noisy: false,
    },
    DemoLine {
        category: "Groceries",
        amount: 900.0,
        day_offset: 4,
        income: false,
        tag: None,
        noisy: true,
    },
    DemoLine {
        category: "Transport",
        amount: 200.0,
        day_offset: 7,
        income: false,
        tag: None,
        noisy: true,
    },
    DemoLine {
        category: "Utilities",
        amount: 313.0,
        day_offset: 9,
        income: false,
        tag: None,
        noisy: true,
    },
];

pub const DEMO_SNAP_BALANCE: Decimal = Decimal::from_parts(29655, 0, 0, false, 2);

#[derive(Debug, Clone)]
pub struct DemoLedger {
    seed: u64,
    noise_factor: f64,
}

impl DemoLedger {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            noise_factor: 0.0,
        }
    }

    pub fn with_noise(mut self, noise_factor: f64) -> Self {
        self.noise_factor = noise_factor;
        self
    }

    /// One month of entries starting at `month_start`. Identical seeds give
    /// identical ledgers; salary and rent never vary.
    pub fn generate(&self, month_start: NaiveDate) -> Result<Vec<LedgerEntry>> {
        if !(0.0..=1.0).contains(&self.noise_factor) {
            return Err(OasisError::InvalidNoiseFactor(self.noise_factor));
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut entries = Vec::with_capacity(DEMO_LINES.len());

        for line in &DEMO_LINES {
            let raw = if line.noisy && self.noise_factor > 0.0 {
                let normal = Normal::new(line.amount, line.amount * self.noise_factor)
                    .map_err(|_| OasisError::InvalidNoiseFactor(self.noise_factor))?;
                normal.sample(&mut rng).max(0.0)
            } else {
                line.amount
            };

            let amount = Decimal::from_f64(raw)
                .unwrap_or(Decimal::ZERO)
                .round_dp(2);
            let date = month_start
                .checked_add_days(Days::new(line.day_offset))
                .unwrap_or(month_start);

            let entry = if line.income {
                LedgerEntry::income(line.category, amount, date)
            } else {
                LedgerEntry::expense(line.category, amount, date)
            };

            entries.push(match line.tag {
                Some(tag) => entry.with_tag(tag),
                None => entry,
            });
        }

        Ok(entries)
    }
}

/// SNAP card matching the demo ledger, refilling on the 20th of `month_start`'s month.
pub fn demo_benefit_account(month_start: NaiveDate) -> BenefitAccount {
    BenefitAccount {
        current_balance: DEMO_SNAP_BALANCE,
        refill_date: month_start.with_day(20),
    }
}
