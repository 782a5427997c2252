use serde_json::{Value, json};

const EXPIRATIONS: &[&str] = &[
    "2025-01-17",
    "2025-02-21",
    "2025-03-21",
    "2025-06-20",
    "2025-09-19",
    "2025-12-19",
    "2026-01-16",
    "2026-06-18",
];

/// Size of the synthetic listing served for an underlying.
pub fn listing_total(underlying: &str) -> usize {
    match underlying {
        "AAPL" => 2_345,
        "MSFT" => 640,
        "SPY" => 12_500,
        _ => 0,
    }
}

/// Attributes of the `index`-th contract for `underlying`.
///
/// Contracts are ordered by expiration, then strike, alternating call/put.
pub fn contract(underlying: &str, index: usize) -> Value {
    let exp = EXPIRATIONS[(index / 200) % EXPIRATIONS.len()];
    let is_call = index % 2 == 0;
    let strike_steps = u32::try_from((index / 2) % 100).unwrap_or(0);
    let strike = f64::from(strike_steps).mul_add(2.5, 100.0);
    let yymmdd: String = exp.chars().filter(char::is_ascii_digit).skip(2).collect();
    let strike_code = format!("{:08}", (strike * 1000.0).round() as u64);
    let side = if is_call { 'C' } else { 'P' };
    let mid = (f64::from(strike_steps) * 0.05 + 0.4).max(0.05);
    json!({
        "contract": format!("{underlying}{yymmdd}{side}{strike_code}"),
        "underlying_symbol": underlying,
        "exp_date": exp,
        "expiration_type": "monthly",
        "type": if is_call { "call" } else { "put" },
        "strike": strike,
        "bid": ((mid - 0.05) * 100.0).round() / 100.0,
        "ask": ((mid + 0.05) * 100.0).round() / 100.0,
        "last": mid,
        "volume": index % 300,
        "open_interest": (index * 7) % 5_000,
        "volatility": 0.25 + f64::from(strike_steps) * 0.001,
        "delta": if is_call { 0.5 } else { -0.5 },
        "tradetime": "2024-10-15"
    })
}

/// One page of the listing in the API's `data`/`attributes` envelope.
pub fn listing_page(underlying: &str, offset: usize, limit: usize) -> Value {
    let total = listing_total(underlying);
    let start = offset.min(total);
    let end = offset.saturating_add(limit).min(total);
    envelope(underlying, start, end - start, total)
}

/// `n` consecutive contracts starting at `start`, regardless of listing size.
pub fn page(underlying: &str, start: usize, n: usize) -> Value {
    envelope(underlying, start, n, start + n)
}

fn envelope(underlying: &str, start: usize, n: usize, total: usize) -> Value {
    let data: Vec<Value> = (start..start + n)
        .map(|i| {
            let attrs = contract(underlying, i);
            json!({
                "id": attrs["contract"].clone(),
                "type": "options-eod",
                "attributes": attrs
            })
        })
        .collect();
    json!({
        "meta": { "offset": start, "limit": n, "total": total },
        "data": data,
        "links": { "next": Value::Null }
    })
}

/// Chain snapshot: the first few contracts of the nearest expiration.
pub fn chain(underlying: &str) -> Option<Value> {
    if listing_total(underlying) == 0 {
        return None;
    }
    let data: Vec<Value> = (0..6).map(|i| contract(underlying, i)).collect();
    Some(json!({ "data": data }))
}

/// Details payload echoing the requested contract.
pub fn details(symbol: &str, expiration: &str, strike: &str, kind: &str) -> Value {
    json!({
        "symbol": symbol,
        "expiration": expiration,
        "strike": strike.parse::<f64>().unwrap_or_default(),
        "type": kind,
        "bid": 1.2,
        "ask": 1.3,
        "open_interest": 456
    })
}
