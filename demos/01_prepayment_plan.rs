/// prepayment plan - several prepayments compared against the original tenure
use loan_tenure_rs::{calculate_tenure, Decimal, Money, PrepaymentEffect, Tenure, TenureRequest};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=loan_tenure_rs=debug shows each applied prepayment
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== prepayment plan ===\n");

    let request = TenureRequest::builder()
        .loan_amount(Money::from_major(5_028_000))
        .annual_rate_percent(Decimal::new(87, 1))
        .monthly_emi(Money::from_major(41_200))
        .start(2023, 7)
        .prepayment(Money::from_major(200_000), 2024, 8)
        .prepayment(Money::from_major(200_000), 2025, 6)
        .prepayment(Money::from_major(300_000), 2026, 3)
        .original_tenure_years(25)
        .build()?;

    let result = calculate_tenure(&request)?;

    for (i, snapshot) in result.snapshots.iter().enumerate() {
        println!("prepayment #{} ({})", i + 1, snapshot.effective_month);
        println!("  months of EMIs since previous: {}", snapshot.months_elapsed);
        println!("  principal before: {}", snapshot.principal_before);
        println!("  prepaid:          {}", snapshot.amount);
        println!("  principal after:  {}", snapshot.principal_after);
    }

    println!("\ntenure calculation starts from: {}", result.tenure_start_month);
    println!("months paid up to last prepayment: {}", result.total_months_paid_to_last_prepayment);

    match (result.remaining_tenure, result.loan_closure_month) {
        (Tenure::Months(months), Some(closure)) => {
            println!("✓ remaining tenure: {} months", months);
            println!("✓ expected loan closure: {}", closure);
        }
        _ => println!("! EMI does not cover the monthly interest, the loan never closes"),
    }

    match result.prepayment_effect {
        Some(PrepaymentEffect::MonthsSaved { months, original_closure_month }) => {
            println!("✓ months saved: {} (originally closing {})", months, original_closure_month);
        }
        Some(PrepaymentEffect::NoMeaningfulEffect { original_closure_month }) => {
            println!("! prepayments had no effect on the original closure of {}", original_closure_month);
        }
        None => {}
    }

    Ok(())
}
