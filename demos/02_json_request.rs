/// json request - hand a json document to the calculator and get json back
use loan_tenure_rs::{calculate_tenure_with_config, CalculatorConfig, TenureRequest};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== json request ===\n");

    let request = TenureRequest::from_json(
        r#"{
            "loan_amount": "2500000",
            "annual_rate_percent": "9.15",
            "monthly_emi": "27000",
            "start_year": 2022,
            "start_month": 4,
            "prepayments": [
                { "amount": "150000", "year": 2023, "month": 3 },
                { "amount": "150000", "year": 2024, "month": 3 }
            ],
            "original_tenure_years": 20
        }"#,
    )?;

    // report principals in whole rupees
    let config = CalculatorConfig::from_json(r#"{ "currency_dp": 0 }"#)?;

    let result = calculate_tenure_with_config(&request, &config)?;
    println!("{}", result.json());

    // an EMI below the monthly interest is reported, not rejected
    let mut underpaying = request.clone();
    underpaying.monthly_emi = loan_tenure_rs::Money::from_major(15_000);

    let result = calculate_tenure_with_config(&underpaying, &config)?;
    println!("\nwith an EMI of 15000: never amortizes = {}", result.never_amortizes());

    Ok(())
}
