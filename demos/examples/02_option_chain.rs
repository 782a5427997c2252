use eodhd_demos::common::{get_client, init_tracing};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let client = get_client()?;

    println!("Fetching the MSFT option chain...");
    let chain = client.option_chain("MSFT")?;

    println!("{} contracts, columns: {:?}", chain.len(), chain.columns());
    for row in chain.iter().take(5) {
        println!(
            "  {:<22} {:>4} strike {:>7.2}",
            row.str_field("contract").unwrap_or("?"),
            row.str_field("type").unwrap_or("?"),
            row.f64_field("strike").unwrap_or(f64::NAN),
        );
    }

    Ok(())
}
