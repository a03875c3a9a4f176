use crate::schema::{Classification, EventDay, ForecastPoint};
use crate::utils::round_to_cents;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub points: Vec<ForecastPoint>,
    pub days_until_crisis: Option<usize>,
}

/// Walks the calendar once, accumulating deltas onto `starting_balance`.
///
/// The running balance stays exact; each point carries it rounded to cents and is
/// classified on that rounded value, so `days_until_crisis` always agrees with the
/// emitted balances.
pub fn project(starting_balance: Decimal, calendar: &[EventDay]) -> Projection {
    let mut balance = starting_balance;
    let mut points = Vec::with_capacity(calendar.len());
    let mut days_until_crisis = None;

    for (index, day) in calendar.iter().enumerate() {
        balance += day.scheduled_delta;
        let rounded = round_to_cents(balance);

        let classification = if rounded < Decimal::ZERO {
            Classification::Crisis
        } else if day.scheduled_delta > Decimal::ZERO && day.note.is_some() {
            Classification::Income
        } else {
            Classification::Normal
        };

        if classification == Classification::Crisis && days_until_crisis.is_none() {
            days_until_crisis = Some(index);
        }

        points.push(ForecastPoint {
            date: day.date,
            balance: rounded,
            classification,
            note: day.note.clone(),
        });
    }

    Projection {
        points,
        days_until_crisis,
    }
}
