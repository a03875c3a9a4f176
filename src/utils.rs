use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.checked_sub_days(Days::new(1))
}

/// Returns true when `date` is the `day_of_month`-th of its month.
///
/// With `clamp_to_month_end`, a day that does not exist in the month (the 30th
/// in February) matches the month's last day instead.
pub fn falls_on_day_of_month(date: NaiveDate, day_of_month: u32, clamp_to_month_end: bool) -> bool {
    if date.day() == day_of_month {
        return true;
    }

    if !clamp_to_month_end {
        return false;
    }

    match last_day_of_month(date.year(), date.month()) {
        Some(last) => day_of_month > last.day() && date == last,
        None => false,
    }
}

/// Rounds to cents, half away from zero.
pub fn round_to_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Renders an amount for event notes: `850` stays `850`, `1200.50` becomes `1200.5`.
pub fn format_note_amount(value: Decimal) -> String {
    round_to_cents(value.abs()).normalize().to_string()
}
