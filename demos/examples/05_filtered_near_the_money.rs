use eodhd_demos::common::{get_client, init_tracing};
use eodhd_options::{OptionType, OptionsQuery};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let client = get_client()?;

    // Puts within 10% of the underlying, expiring in the first half of 2025.
    let spot = client.current_price("AAPL.US")?;
    let query = OptionsQuery::builder("AAPL")
        .expires_from("2025-01-01")
        .expires_to("2025-06-30")
        .strike_from((spot * 0.9).floor())
        .strike_to((spot * 1.1).ceil())
        .option_type(OptionType::Put)
        .limit(250)
        .build()?;

    let rows = client.options(&query)?;
    println!("AAPL spot {spot:.2}: {} puts near the money", rows.len());

    let oi: f64 = rows.iter().filter_map(|r| r.f64_field("open_interest")).sum();
    println!("Total open interest: {oi}");

    Ok(())
}
