use eodhd_demos::common::get_client;
use eodhd_options::{OptionType, OptionsQuery};
use tracing_subscriber::fmt::format::FmtSpan;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Human-friendly subscriber with env-based filtering.
    // Suggested: RUST_LOG=info,eodhd_options=trace
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(true)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let client = get_client()?;

    // Listing (spans per call, debug events per page)
    let query = OptionsQuery::builder("AAPL")
        .option_type(OptionType::Call)
        .limit(1500)
        .build()?;
    let _ = client.options(&query)?;

    // Chain and underlying price
    let _ = client.option_chain("AAPL")?;
    let _ = client.current_price("AAPL.US")?;

    Ok(())
}
