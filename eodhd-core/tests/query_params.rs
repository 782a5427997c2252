use eodhd_core::{EodhdError, OptionType, OptionsQuery, PAGE_SIZE};

fn param<'a>(params: &'a [(String, String)], name: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

#[test]
fn minimal_query_sends_ticker_sort_and_page_size_only() {
    let q = OptionsQuery::new("AAPL").unwrap();
    let p = q.base_params();
    assert_eq!(param(&p, "filter[underlying_symbol]"), Some("AAPL"));
    assert_eq!(param(&p, "sort"), Some("exp_date"));
    assert_eq!(param(&p, "page[limit]"), Some("1000"));
    assert_eq!(p.len(), 3);
    assert_eq!(PAGE_SIZE, 1000);
}

#[test]
fn full_query_encodes_every_filter() {
    let q = OptionsQuery::builder("AAPL")
        .expires_from("2024-01-01")
        .expires_to("2024-06-30")
        .strike_from(150.0)
        .strike_to(152.5)
        .option_type(OptionType::Put)
        .sort("-strike")
        .limit(150)
        .build()
        .unwrap();
    let p = q.page_params(2000);
    assert_eq!(param(&p, "filter[exp_date_from]"), Some("2024-01-01"));
    assert_eq!(param(&p, "filter[exp_date_to]"), Some("2024-06-30"));
    assert_eq!(param(&p, "filter[strike_from]"), Some("150"));
    assert_eq!(param(&p, "filter[strike_to]"), Some("152.5"));
    assert_eq!(param(&p, "filter[type]"), Some("put"));
    assert_eq!(param(&p, "sort"), Some("-strike"));
    assert_eq!(param(&p, "page[offset]"), Some("2000"));
    assert_eq!(q.limit(), Some(150));
}

#[test]
fn zero_strike_is_still_sent() {
    let q = OptionsQuery::builder("SPY").strike_from(0.0).build().unwrap();
    assert_eq!(param(&q.base_params(), "filter[strike_from]"), Some("0"));
}

#[test]
fn option_type_casing_is_endpoint_specific() {
    let t: OptionType = "call".parse().unwrap();
    assert_eq!(t.as_filter(), "call");
    assert_eq!(t.as_contract(), "CALL");
    let t: OptionType = " PUT ".parse().unwrap();
    assert_eq!(t, OptionType::Put);
    assert!(matches!(
        "straddle".parse::<OptionType>(),
        Err(EodhdError::InvalidArg(_))
    ));
}

#[test]
fn validation_rejects_bad_inputs() {
    let cases = [
        OptionsQuery::builder("  ").build(),
        OptionsQuery::builder("AAPL").sort("").build(),
        OptionsQuery::builder("AAPL").limit(0).build(),
        OptionsQuery::builder("AAPL").strike_from(-1.0).build(),
        OptionsQuery::builder("AAPL").strike_to(f64::NAN).build(),
        OptionsQuery::builder("AAPL")
            .strike_from(200.0)
            .strike_to(100.0)
            .build(),
        OptionsQuery::builder("AAPL")
            .expires_from("2024-06-01")
            .expires_to("2024-01-01")
            .build(),
        OptionsQuery::builder("AAPL").expires_to("not a date").build(),
    ];
    for (i, res) in cases.into_iter().enumerate() {
        assert!(
            matches!(res, Err(EodhdError::InvalidArg(_))),
            "case {i} should be rejected"
        );
    }
}

#[test]
fn ticker_is_trimmed() {
    let q = OptionsQuery::new(" MSFT ").unwrap();
    assert_eq!(q.ticker(), "MSFT");
}
