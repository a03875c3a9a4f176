use crate::error::{OasisError, Result};
use crate::schema::{BenefitAccount, EntryKind, EntryTag, LedgerEntry, LedgerSnapshot};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A budget-entry row as returned by the persistence API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerRow {
    pub category: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub entry_type: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub tag: Option<String>,
}

/// An EBT account record as returned by the persistence API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenefitAccountRow {
    pub current_balance: Decimal,
    #[serde(default)]
    pub refill_date: Option<NaiveDate>,
}

pub fn parse_ledger_rows(json: &str) -> Result<Vec<LedgerRow>> {
    Ok(serde_json::from_str(json)?)
}

pub fn parse_benefit_account(json: &str) -> Result<BenefitAccountRow> {
    Ok(serde_json::from_str(json)?)
}

pub fn rows_to_snapshot(
    rows: &[LedgerRow],
    benefit_account: Option<&BenefitAccountRow>,
) -> Result<LedgerSnapshot> {
    let entries = rows
        .iter()
        .enumerate()
        .map(|(index, row)| row_to_entry(index, row))
        .collect::<Result<Vec<_>>>()?;

    let benefit_account = benefit_account
        .map(|row| {
            if row.current_balance < Decimal::ZERO {
                return Err(OasisError::InvalidBenefitAccount(format!(
                    "current balance {} is negative",
                    row.current_balance
                )));
            }
            Ok(BenefitAccount {
                current_balance: row.current_balance,
                refill_date: row.refill_date,
            })
        })
        .transpose()?;

    Ok(LedgerSnapshot::new(entries, benefit_account))
}

fn row_to_entry(index: usize, row: &LedgerRow) -> Result<LedgerEntry> {
    let invalid = |details: String| OasisError::InvalidLedgerRow { index, details };

    let kind = match row.entry_type.trim().to_ascii_lowercase().as_str() {
        "income" => EntryKind::Income,
        "expense" => EntryKind::Expense,
        other => return Err(invalid(format!("unknown entry type '{}'", other))),
    };

    if row.amount < Decimal::ZERO {
        return Err(invalid(format!(
            "amount {} is negative; the sign belongs in the entry type",
            row.amount
        )));
    }

    let tag = match row.tag.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(text) => Some(
            EntryTag::parse(text).ok_or_else(|| invalid(format!("unknown tag '{}'", text)))?,
        ),
    };

    Ok(LedgerEntry {
        category: row.category.clone(),
        amount: row.amount,
        kind,
        date: row.date,
        tag,
    })
}
