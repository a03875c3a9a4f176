use crate::aggregator::aggregate;
use crate::drivers::CashFlowDrivers;
use crate::policy::{AmountSource, CalendarRule, ForecastPolicy, RuleGuard};
use crate::schema::{BenefitAccount, EventDay, LedgerEntry};
use crate::utils::{falls_on_day_of_month, format_note_amount};
use chrono::NaiveDate;
use log::warn;
use rust_decimal::Decimal;

/// What a rule sees when deciding whether it fires on a given day.
struct RuleContext<'a> {
    day_index: usize,
    date: NaiveDate,
    projected_balance: Decimal,
    has_benefit_account: bool,
    drivers: &'a CashFlowDrivers,
}

struct ScheduledEvent {
    delta: Decimal,
    note: String,
}

impl CalendarRule {
    fn matches_day(&self, date: NaiveDate) -> bool {
        self.days_of_month
            .iter()
            .any(|&d| falls_on_day_of_month(date, d, self.clamp_to_month_end))
    }

    fn resolve_amount(&self, drivers: &CashFlowDrivers) -> Decimal {
        match &self.amount {
            AmountSource::Fixed { amount } => *amount,
            AmountSource::Detected {
                tag,
                share,
                fallback,
            } => match drivers.detected(*tag) {
                Some(amount) => amount * share,
                None if drivers.has_activity_for(*tag) => fallback.unwrap_or(Decimal::ZERO),
                None => Decimal::ZERO,
            },
        }
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<ScheduledEvent> {
        if !self.matches_day(ctx.date) {
            return None;
        }

        if let Some(after) = self.after_day_index {
            if ctx.day_index <= after {
                return None;
            }
        }

        let amount = self.resolve_amount(ctx.drivers);
        if amount.is_zero() {
            return None;
        }

        let passes_guard = match &self.guard {
            RuleGuard::Always => true,
            RuleGuard::BalanceBelowBuffer { buffer } => ctx.projected_balance - amount < *buffer,
            RuleGuard::BenefitAccountPresent => ctx.has_benefit_account,
        };
        if !passes_guard {
            return None;
        }

        Some(ScheduledEvent {
            delta: self.direction.apply(amount),
            note: format!(
                "{} {}${}",
                self.label,
                self.direction.sign(),
                format_note_amount(amount)
            ),
        })
    }
}

/// Lays out `horizon_days` calendar days starting at `today`.
///
/// Each day takes the first matching rule in policy order; days without a rule
/// drift down by the daily baseline. The projected balance used by guards starts
/// at the ledger's current balance and follows the emitted deltas.
pub fn build_calendar(
    entries: &[LedgerEntry],
    benefit_account: Option<&BenefitAccount>,
    horizon_days: usize,
    today: NaiveDate,
    policy: &ForecastPolicy,
) -> Vec<EventDay> {
    let totals = aggregate(entries);
    let drivers = CashFlowDrivers::detect(entries, &totals, policy);
    warn_on_fallbacks(&drivers, policy);

    let mut projected_balance = totals.current_balance();
    let mut calendar = Vec::with_capacity(horizon_days);

    for (day_index, date) in today.iter_days().take(horizon_days).enumerate() {
        let ctx = RuleContext {
            day_index,
            date,
            projected_balance,
            has_benefit_account: benefit_account.is_some(),
            drivers: &drivers,
        };

        let (scheduled_delta, note) = match policy.rules.iter().find_map(|r| r.evaluate(&ctx)) {
            Some(event) => (event.delta, Some(event.note)),
            None => (-drivers.daily_baseline, None),
        };

        projected_balance += scheduled_delta;
        calendar.push(EventDay {
            day_index,
            date,
            scheduled_delta,
            note,
        });
    }

    calendar
}

fn warn_on_fallbacks(drivers: &CashFlowDrivers, policy: &ForecastPolicy) {
    for rule in &policy.rules {
        if let AmountSource::Detected {
            tag,
            fallback: Some(fallback),
            ..
        } = &rule.amount
        {
            if drivers.detected(*tag).is_none() && drivers.has_activity_for(*tag) {
                warn!(
                    "No {:?} entry found for rule '{}', using fallback amount {}",
                    tag, rule.label, fallback
                );
            }
        }
    }
}
