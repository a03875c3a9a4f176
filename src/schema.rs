use chrono::NaiveDate;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    #[schemars(description = "Money received (wages, benefits paid in cash, gifts)")]
    Income,

    #[schemars(description = "Money spent (rent, groceries, utilities, transport)")]
    Expense,
}

/// Explicit role of a ledger entry in the forecast.
///
/// Entries without a tag are classified from their category text using the
/// policy keywords (see [`crate::policy::TagKeywords`]).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntryTag {
    #[schemars(description = "Monthly housing payment charged on the rent day")]
    Rent,

    #[schemars(description = "Recurring wage income split across paydays")]
    RecurringIncome,

    #[schemars(description = "Anything else; expenses feed the daily baseline")]
    Other,
}

impl EntryTag {
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "rent" => Some(Self::Rent),
            "recurring_income" | "income_recurring" => Some(Self::RecurringIncome),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct LedgerEntry {
    #[schemars(description = "Free-text label such as 'Rent', 'Groceries' or 'Salary'")]
    pub category: String,

    #[schemars(
        with = "f64",
        description = "Non-negative magnitude. The direction is carried by `kind`, never by the sign."
    )]
    pub amount: Decimal,

    pub kind: EntryKind,

    #[schemars(description = "Calendar date of the movement (YYYY-MM-DD)")]
    pub date: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(
        description = "Optional explicit role. When absent the role is inferred from the category text."
    )]
    pub tag: Option<EntryTag>,
}

impl LedgerEntry {
    pub fn new(
        category: impl Into<String>,
        amount: Decimal,
        kind: EntryKind,
        date: NaiveDate,
    ) -> Self {
        Self {
            category: category.into(),
            amount,
            kind,
            date,
            tag: None,
        }
    }

    pub fn income(category: impl Into<String>, amount: Decimal, date: NaiveDate) -> Self {
        Self::new(category, amount, EntryKind::Income, date)
    }

    pub fn expense(category: impl Into<String>, amount: Decimal, date: NaiveDate) -> Self {
        Self::new(category, amount, EntryKind::Expense, date)
    }

    pub fn with_tag(mut self, tag: EntryTag) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == EntryKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == EntryKind::Expense
    }
}

/// Externally tracked assistance balance (SNAP/EBT). Read-only to the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct BenefitAccount {
    #[schemars(with = "f64", description = "Balance currently available on the card")]
    pub current_balance: Decimal,

    #[serde(default)]
    #[schemars(description = "Next scheduled refill date, if known")]
    pub refill_date: Option<NaiveDate>,
}

/// Immutable input to a forecast run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub entries: Vec<LedgerEntry>,

    #[serde(default)]
    pub benefit_account: Option<BenefitAccount>,
}

impl LedgerSnapshot {
    pub fn new(entries: Vec<LedgerEntry>, benefit_account: Option<BenefitAccount>) -> Self {
        Self {
            entries,
            benefit_account,
        }
    }

    pub fn benefit_balance(&self) -> Option<Decimal> {
        self.benefit_account.as_ref().map(|a| a.current_balance)
    }
}

/// One day of the event calendar, before projection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct EventDay {
    pub day_index: usize,
    pub date: NaiveDate,
    #[schemars(with = "f64")]
    pub scheduled_delta: Decimal,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    #[schemars(description = "Ordinary day, balance non-negative")]
    Normal,

    #[schemars(description = "Projected balance is below zero")]
    Crisis,

    #[schemars(description = "A scheduled inflow lands on this day")]
    Income,
}

/// One projected day as consumed by the chart renderer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct ForecastPoint {
    pub date: NaiveDate,

    #[schemars(with = "f64", description = "Running balance rounded to cents")]
    pub balance: Decimal,

    pub classification: Classification,

    #[schemars(description = "Explanation of the scheduled event, e.g. 'Rent Due -$850'")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Thriving,
    Stable,
    Vulnerable,
    Critical,
}

impl HealthStatus {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => Self::Thriving,
            60..=79 => Self::Stable,
            30..=59 => Self::Vulnerable,
            _ => Self::Critical,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Thriving => "Thriving",
            Self::Stable => "Stable",
            Self::Vulnerable => "Vulnerable",
            Self::Critical => "Critical",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct ScoreBreakdown {
    #[schemars(description = "Points from the ledger balance (0-40)")]
    pub balance: u8,

    #[schemars(description = "Points from the benefit balance (0-30)")]
    pub benefit: u8,

    #[schemars(description = "Points from the savings ratio (0-30)")]
    pub ratio: u8,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u8 {
        self.balance + self.benefit + self.ratio
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct HealthScore {
    #[schemars(description = "Composite score in [0, 100]")]
    pub score: u8,

    pub breakdown: ScoreBreakdown,

    #[schemars(description = "Index of the first projected crisis day, if any")]
    pub days_until_crisis: Option<usize>,

    pub status: HealthStatus,
}

impl HealthScore {
    pub fn with_days_until_crisis(mut self, days_until_crisis: Option<usize>) -> Self {
        self.days_until_crisis = days_until_crisis;
        self
    }

    pub fn headline(&self) -> String {
        match self.days_until_crisis {
            Some(0) => format!("{}: balance is projected negative today", self.status.label()),
            Some(1) => format!("{}: balance is projected negative tomorrow", self.status.label()),
            Some(days) => format!(
                "{}: balance is projected negative in {} days",
                self.status.label(),
                days
            ),
            None => format!("{}: no shortfall projected", self.status.label()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_entry_tag_parse() {
        assert_eq!(EntryTag::parse("rent"), Some(EntryTag::Rent));
        assert_eq!(EntryTag::parse(" Income-Recurring "), Some(EntryTag::RecurringIncome));
        assert_eq!(EntryTag::parse("recurring_income"), Some(EntryTag::RecurringIncome));
        assert_eq!(EntryTag::parse("groceries"), None);
    }

    #[test]
    fn test_status_thresholds() {
        assert_eq!(HealthStatus::from_score(100), HealthStatus::Thriving);
        assert_eq!(HealthStatus::from_score(80), HealthStatus::Thriving);
        assert_eq!(HealthStatus::from_score(79), HealthStatus::Stable);
        assert_eq!(HealthStatus::from_score(60), HealthStatus::Stable);
        assert_eq!(HealthStatus::from_score(30), HealthStatus::Vulnerable);
        assert_eq!(HealthStatus::from_score(0), HealthStatus::Critical);
    }

    #[test]
    fn test_forecast_point_field_names() {
        let point = ForecastPoint {
            date: NaiveDate::from_ymd_opt(2024, 3, 12).unwrap(),
            balance: dec!(-807.20),
            classification: Classification::Crisis,
            note: Some("Rent Due -$850".to_string()),
        };

        let value = serde_json::to_value(&point).unwrap();
        assert_eq!(value["date"], "2024-03-12");
        assert_eq!(value["classification"], "crisis");
        assert_eq!(value["note"], "Rent Due -$850");
        assert!(value["balance"].is_number());
        assert!((value["balance"].as_f64().unwrap() + 807.2).abs() < 1e-9);
    }

    #[test]
    fn test_headline() {
        let score = HealthScore {
            score: 60,
            breakdown: ScoreBreakdown {
                balance: 20,
                benefit: 30,
                ratio: 10,
            },
            days_until_crisis: None,
            status: HealthStatus::Stable,
        };
        assert_eq!(score.headline(), "Stable: no shortfall projected");

        let score = score.with_days_until_crisis(Some(2));
        assert_eq!(
            score.headline(),
            "Stable: balance is projected negative in 2 days"
        );
    }

    #[test]
    fn test_snapshot_deserialization_defaults() {
        let snapshot: LedgerSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.entries.is_empty());
        assert!(snapshot.benefit_account.is_none());
        assert_eq!(snapshot.benefit_balance(), None);
    }
}
