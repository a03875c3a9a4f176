use chrono::NaiveDate;
use oasis_forecast::*;

fn main() -> Result<()> {
    println!("📊 Oasis Cash-Flow Outlook Demo\n");
    println!("A single-earner household: $2,400 salary, $850 rent, $1,413 of everyday spending,");
    println!("and $296.55 left on the SNAP card.\n");

    let month_start = NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date");
    let today = NaiveDate::from_ymd_opt(2024, 3, 10).expect("valid date");

    let entries = DemoLedger::new(2024).with_noise(0.03).generate(month_start)?;
    let snapshot = LedgerSnapshot::new(entries, Some(demo_benefit_account(month_start)));

    println!("📋 Ledger:");
    for entry in &snapshot.entries {
        println!(
            "  {:<10} {:>9} {:?}",
            entry.category,
            format!("${:.2}", entry.amount),
            entry.kind
        );
    }

    let outlook = forecast_outlook(&snapshot, today, 30);

    println!("\n📈 30-day projection from {}:", outlook.as_of);
    for point in &outlook.points {
        let marker = match point.classification {
            Classification::Crisis => "🔴",
            Classification::Income => "🟢",
            Classification::Normal => "  ",
        };
        println!(
            "  {} {} {:>10}  {}",
            marker,
            point.date.format("%b %d"),
            format!("{:.2}", point.balance),
            point.note.as_deref().unwrap_or("")
        );
    }

    println!(
        "\n🩺 Health score: {}/100 (balance {}, benefits {}, ratio {})",
        outlook.health.score,
        outlook.health.breakdown.balance,
        outlook.health.breakdown.benefit,
        outlook.health.breakdown.ratio
    );
    println!("   {}", outlook.health.headline());

    if let Some(lowest) = outlook.lowest_point() {
        println!(
            "   Lowest projected balance: ${:.2} on {}",
            lowest.balance, lowest.date
        );
    }

    Ok(())
}
