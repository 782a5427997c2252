use std::fs::File;

use eodhd_demos::common::{get_client, init_tracing, output_path};
use eodhd_options::{MAX_OFFSET, OptionsQuery, PAGE_SIZE, ToDataFrame};
use polars::prelude::{CsvWriter, SerWriter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // 1. Build the client (mock in CI when EODHD_DEMOS_USE_MOCK is set).
    let client = get_client()?;

    // 2. AAPL options expiring from today onwards, sorted by expiration.
    let today = chrono::Local::now().date_naive();
    let query = OptionsQuery::builder("AAPL")
        .expires_from(today)
        .sort("exp_date")
        .build()?;

    println!("Fetching AAPL options expiring from {today} onwards...");
    println!(
        "Note: the API serves at most {} records per query.",
        MAX_OFFSET + PAGE_SIZE
    );

    // 3. Fetch every page, reporting progress as we go.
    let rows = client.options_with_progress(&query, |p| {
        println!("  page {} (offset {}): {} records, {} total", p.page, p.offset, p.batch_len, p.fetched);
    })?;

    println!("\nFetched {} options", rows.len());
    if rows.is_empty() {
        println!("\nNo options found matching the criteria.");
        return Ok(());
    }

    // 4. Tabulate and save for analysis.
    let mut df = rows.to_dataframe()?;
    println!("\nFirst few options:\n{}", df.head(Some(5)));

    let path = output_path("aapl_options.csv");
    let mut file = File::create(&path)?;
    CsvWriter::new(&mut file).include_header(true).finish(&mut df)?;
    println!("\nSaved all results to {}", path.display());

    Ok(())
}
