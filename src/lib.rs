//! # Oasis Forecast
//!
//! Cash-flow forecasting and financial-health scoring for households tracking
//! wages, bills and SNAP/EBT benefits.
//!
//! ## Core Concepts
//!
//! - **Ledger Snapshot**: the user's income/expense entries plus an optional benefit
//!   account, fetched by the caller and passed in read-only
//! - **Event Calendar**: one entry per projected day, carrying either a scheduled
//!   event (rent, paycheck, SNAP refill) or the ordinary daily spending drift
//! - **Forecast Points**: the running balance per day, classified as normal, crisis
//!   or income, ready to chart
//! - **Health Score**: a 0-100 composite of balance, benefits and savings ratio
//!
//! Every operation is a pure function of its inputs; `today` is always explicit.
//!
//! ## Example
//!
//! ```rust,ignore
//! use oasis_forecast::*;
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
//! let snapshot = LedgerSnapshot::new(
//!     vec![
//!         LedgerEntry::income("Salary", dec!(2400), today),
//!         LedgerEntry::expense("Rent", dec!(850), today),
//!         LedgerEntry::expense("Groceries", dec!(1413), today),
//!     ],
//!     Some(BenefitAccount {
//!         current_balance: dec!(296.55),
//!         refill_date: None,
//!     }),
//! );
//!
//! let outlook = forecast_outlook(&snapshot, today, 30);
//! println!("{}", outlook.health.headline());
//! ```

pub mod aggregator;
pub mod calendar;
pub mod demo;
pub mod drivers;
pub mod error;
pub mod health;
pub mod ingestion;
pub mod policy;
pub mod projector;
pub mod schema;
pub mod utils;

pub use aggregator::{aggregate, LedgerTotals};
pub use calendar::build_calendar;
pub use demo::{demo_benefit_account, DemoLedger};
pub use drivers::{effective_tag, CashFlowDrivers};
pub use error::{OasisError, Result};
pub use health::score;
pub use ingestion::*;
pub use policy::*;
pub use projector::{project, Projection};
pub use schema::*;

use chrono::NaiveDate;
use log::{debug, info};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything the dashboard needs from one forecast run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FinancialOutlook {
    #[schemars(description = "First projected day")]
    pub as_of: NaiveDate,

    pub horizon_days: usize,

    pub totals: LedgerTotals,

    #[schemars(with = "f64", description = "Total income minus total expenses")]
    pub starting_balance: Decimal,

    pub points: Vec<ForecastPoint>,

    pub days_until_crisis: Option<usize>,

    pub health: HealthScore,
}

impl FinancialOutlook {
    pub fn schema_as_json() -> std::result::Result<String, serde_json::Error> {
        let schema = schemars::schema_for!(FinancialOutlook);
        serde_json::to_string_pretty(&schema)
    }

    pub fn crisis_point(&self) -> Option<&ForecastPoint> {
        self.days_until_crisis.and_then(|i| self.points.get(i))
    }

    pub fn lowest_point(&self) -> Option<&ForecastPoint> {
        self.points.iter().min_by_key(|p| p.balance)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ForecastEngine {
    policy: ForecastPolicy,
}

impl ForecastEngine {
    pub fn new(policy: ForecastPolicy) -> Result<Self> {
        policy.validate()?;
        Ok(Self { policy })
    }

    pub fn from_policy_file(path: impl AsRef<Path>) -> Result<Self> {
        let policy = ForecastPolicy::from_json_file(path)?;
        Ok(Self { policy })
    }

    pub fn policy(&self) -> &ForecastPolicy {
        &self.policy
    }

    pub fn outlook(
        &self,
        snapshot: &LedgerSnapshot,
        today: NaiveDate,
        horizon_days: usize,
    ) -> FinancialOutlook {
        info!(
            "Forecasting {} days from {} over {} ledger entries",
            horizon_days,
            today,
            snapshot.entries.len()
        );

        let totals = aggregate(&snapshot.entries);
        let starting_balance = totals.current_balance();

        let calendar = build_calendar(
            &snapshot.entries,
            snapshot.benefit_account.as_ref(),
            horizon_days,
            today,
            &self.policy,
        );
        let projection = project(starting_balance, &calendar);

        let health = score(
            totals.total_income,
            totals.total_expenses,
            snapshot.benefit_balance(),
        )
        .with_days_until_crisis(projection.days_until_crisis);

        debug!(
            "Outlook: starting balance {}, score {}, first crisis day {:?}",
            starting_balance, health.score, projection.days_until_crisis
        );

        FinancialOutlook {
            as_of: today,
            horizon_days,
            totals,
            starting_balance,
            points: projection.points,
            days_until_crisis: projection.days_until_crisis,
            health,
        }
    }
}

/// Runs the default policy over `snapshot`.
pub fn forecast_outlook(
    snapshot: &LedgerSnapshot,
    today: NaiveDate,
    horizon_days: usize,
) -> FinancialOutlook {
    ForecastEngine::default().outlook(snapshot, today, horizon_days)
}
