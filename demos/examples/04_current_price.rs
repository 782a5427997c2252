use eodhd_demos::common::{get_client, init_tracing};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let client = get_client()?;

    for ticker in ["AAPL.US", "MSFT.US", "SPY.US"] {
        let price = client.current_price(ticker)?;
        println!("{ticker:<8} {price:>9.2}");
    }

    Ok(())
}
