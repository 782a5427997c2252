use eodhd_demos::common::{get_client, init_tracing};
use eodhd_options::OptionType;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let client = get_client()?;

    // Expirations accept dates, datetimes, or common date strings.
    let details = client.contract_details("AAPL", "March 21, 2025", 150.0, OptionType::Call)?;
    println!("{details:#}");

    let put: OptionType = "p".parse()?;
    let details = client.contract_details("AAPL", "2025-03-21", 150.0, put)?;
    println!("{details:#}");

    Ok(())
}
