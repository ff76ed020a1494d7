/// quick start - minimal example to get started
use loan_tenure_rs::{Decimal, Money, TenureRequest};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // a 50.28 lakh home loan at 8.7% with one prepayment
    let request = TenureRequest::builder()
        .loan_amount(Money::from_major(5_028_000))
        .annual_rate_percent(Decimal::new(87, 1))
        .monthly_emi(Money::from_major(41_200))
        .start(2023, 7)
        .prepayment(Money::from_major(200_000), 2024, 8)
        .build()?;

    let result = request.calculate()?;

    // print the result
    println!("{}", result.json());

    Ok(())
}
