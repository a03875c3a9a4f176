//! Forecast policy: the calendar rule set and the category heuristics.
//!
//! The default policy reproduces the household calendar the app was built around:
//! rent on the 12th, paydays on the 15th and 30th, the SNAP refill on the 20th.
//! Every rule is plain data so a deployment can reshape the calendar from JSON
//! without touching the projection loop.

use crate::error::{OasisError, Result};
use crate::schema::EntryTag;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BASELINE_DAYS: u32 = 30;
pub const RENT_DAY: u32 = 12;
pub const PAYDAYS: [u32; 2] = [15, 30];
pub const SNAP_REFILL_DAY: u32 = 20;
pub const WARM_UP_DAYS: usize = 5;
pub const RENT_BUFFER: Decimal = Decimal::from_parts(50, 0, 0, false, 0);
pub const SNAP_REFILL_AMOUNT: Decimal = Decimal::from_parts(277, 0, 0, false, 0);
pub const PAYCHECK_FALLBACK: Decimal = Decimal::from_parts(590, 0, 0, false, 0);
pub const PAYCHECK_SHARE: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[schemars(description = "Money arrives: the delta is positive")]
    Inflow,

    #[schemars(description = "Money leaves: the delta is negative")]
    Outflow,
}

impl Direction {
    pub fn sign(&self) -> &'static str {
        match self {
            Self::Inflow => "+",
            Self::Outflow => "-",
        }
    }

    pub fn apply(&self, amount: Decimal) -> Decimal {
        match self {
            Self::Inflow => amount,
            Self::Outflow => -amount,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleGuard {
    #[schemars(description = "The rule fires whenever its day matches")]
    Always,

    #[schemars(
        description = "Fires only when the projected balance minus the rule amount would drop below `buffer`"
    )]
    BalanceBelowBuffer {
        #[schemars(with = "f64")]
        buffer: Decimal,
    },

    #[schemars(description = "Fires only when the snapshot carries a benefit account")]
    BenefitAccountPresent,
}

impl Default for RuleGuard {
    fn default() -> Self {
        Self::Always
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AmountSource {
    /// Amount taken from the first ledger entry carrying `tag`, multiplied by `share`.
    Detected {
        tag: EntryTag,

        #[schemars(with = "f64", description = "Fraction of the detected amount per event")]
        share: Decimal,

        #[serde(default)]
        #[schemars(
            with = "Option<f64>",
            description = "Amount used when no entry carries the tag but the ledger has activity of that kind"
        )]
        fallback: Option<Decimal>,
    },

    /// A constant amount, independent of the ledger.
    Fixed {
        #[schemars(with = "f64")]
        amount: Decimal,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct CalendarRule {
    #[schemars(description = "Prefix of the event note, e.g. 'Rent Due'")]
    pub label: String,

    pub direction: Direction,

    #[schemars(description = "Days of the month (1-31) on which the rule may fire")]
    pub days_of_month: Vec<u32>,

    #[serde(default)]
    #[schemars(description = "The rule only fires on day indices strictly greater than this")]
    pub after_day_index: Option<usize>,

    #[serde(default)]
    #[schemars(
        description = "Move days that do not exist in a month (e.g. the 30th in February) to its last day"
    )]
    pub clamp_to_month_end: bool,

    #[serde(default)]
    pub guard: RuleGuard,

    pub amount: AmountSource,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct TagKeywords {
    #[schemars(description = "Case-insensitive substrings marking an expense as rent")]
    pub rent: Vec<String>,

    #[schemars(description = "Case-insensitive substrings marking income as a recurring paycheck")]
    pub recurring_income: Vec<String>,
}

impl Default for TagKeywords {
    fn default() -> Self {
        Self {
            rent: vec!["rent".to_string()],
            recurring_income: vec!["paycheck".to_string(), "salary".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct ForecastPolicy {
    #[schemars(description = "Divisor turning monthly non-rent expenses into a daily baseline")]
    pub baseline_days: u32,

    pub keywords: TagKeywords,

    #[schemars(description = "Calendar rules in priority order; the first match wins for a day")]
    pub rules: Vec<CalendarRule>,
}

impl Default for ForecastPolicy {
    fn default() -> Self {
        Self {
            baseline_days: DEFAULT_BASELINE_DAYS,
            keywords: TagKeywords::default(),
            rules: vec![
                CalendarRule {
                    label: "Rent Due".to_string(),
                    direction: Direction::Outflow,
                    days_of_month: vec![RENT_DAY],
                    after_day_index: None,
                    clamp_to_month_end: false,
                    guard: RuleGuard::BalanceBelowBuffer {
                        buffer: RENT_BUFFER,
                    },
                    amount: AmountSource::Detected {
                        tag: EntryTag::Rent,
                        share: Decimal::ONE,
                        fallback: None,
                    },
                },
                CalendarRule {
                    label: "Paycheck".to_string(),
                    direction: Direction::Inflow,
                    days_of_month: PAYDAYS.to_vec(),
                    after_day_index: Some(WARM_UP_DAYS),
                    clamp_to_month_end: false,
                    guard: RuleGuard::Always,
                    amount: AmountSource::Detected {
                        tag: EntryTag::RecurringIncome,
                        share: PAYCHECK_SHARE,
                        fallback: Some(PAYCHECK_FALLBACK),
                    },
                },
                CalendarRule {
                    label: "SNAP Refill".to_string(),
                    direction: Direction::Inflow,
                    days_of_month: vec![SNAP_REFILL_DAY],
                    after_day_index: Some(WARM_UP_DAYS),
                    clamp_to_month_end: false,
                    guard: RuleGuard::BenefitAccountPresent,
                    amount: AmountSource::Fixed {
                        amount: SNAP_REFILL_AMOUNT,
                    },
                },
            ],
        }
    }
}

impl ForecastPolicy {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let policy: Self = serde_json::from_str(json)?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.baseline_days == 0 {
            return Err(OasisError::InvalidPolicy {
                rule: "baseline_days".to_string(),
                details: "must be at least 1".to_string(),
            });
        }

        if self.keywords.rent.iter().all(|k| k.trim().is_empty())
            || self.keywords.recurring_income.iter().all(|k| k.trim().is_empty())
        {
            return Err(OasisError::InvalidPolicy {
                rule: "keywords".to_string(),
                details: "each keyword list needs at least one non-empty keyword".to_string(),
            });
        }

        for rule in &self.rules {
            validate_rule(rule)?;
        }

        Ok(())
    }

    pub fn schema_as_json() -> std::result::Result<String, serde_json::Error> {
        let schema = schemars::schema_for!(ForecastPolicy);
        serde_json::to_string_pretty(&schema)
    }
}

fn validate_rule(rule: &CalendarRule) -> Result<()> {
    let invalid = |details: String| OasisError::InvalidPolicy {
        rule: rule.label.clone(),
        details,
    };

    if rule.days_of_month.is_empty() {
        return Err(invalid("days_of_month is empty".to_string()));
    }

    if let Some(&day) = rule.days_of_month.iter().find(|d| !(1..=31).contains(*d)) {
        return Err(OasisError::InvalidDayOfMonth(day));
    }

    if let RuleGuard::BalanceBelowBuffer { buffer } = rule.guard {
        if buffer.is_sign_negative() {
            return Err(invalid(format!("buffer {} is negative", buffer)));
        }
    }

    match &rule.amount {
        AmountSource::Detected {
            tag,
            share,
            fallback,
        } => {
            if *tag == EntryTag::Other {
                return Err(invalid(
                    "detected amounts need a rent or recurring_income tag".to_string(),
                ));
            }
            if share.is_sign_negative() {
                return Err(invalid(format!("share {} is negative", share)));
            }
            if let Some(fallback) = fallback {
                if fallback.is_sign_negative() {
                    return Err(invalid(format!("fallback {} is negative", fallback)));
                }
            }
        }
        AmountSource::Fixed { amount } => {
            if amount.is_sign_negative() {
                return Err(invalid(format!("amount {} is negative", amount)));
            }
        }
    }

    Ok(())
}
