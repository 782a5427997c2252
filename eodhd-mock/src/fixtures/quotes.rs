use serde_json::{Value, json};

/// Real-time payload for a ticker (exchange suffix such as `.US` is ignored).
pub fn realtime(ticker: &str) -> Option<Value> {
    let base = ticker.split('.').next().unwrap_or(ticker);
    let (close, prev) = match base {
        "AAPL" => (227.52, 225.91),
        "MSFT" => (418.16, 420.55),
        "SPY" => (571.04, 568.25),
        // Mirrors the API's "NA" for instruments without a print today
        "HALT" => return Some(q(ticker, json!("NA"), json!("NA"))),
        _ => return None,
    };
    Some(q(ticker, json!(close), json!(prev)))
}

fn q(code: &str, close: Value, prev: Value) -> Value {
    json!({
        "code": code,
        "timestamp": 1_729_108_800,
        "gmtoffset": 0,
        "open": prev,
        "high": close,
        "low": prev,
        "close": close,
        "volume": 41_255_000,
        "previousClose": prev,
        "change": 0,
        "change_p": 0
    })
}
