use eodhd_core::{Flattening, RecordSet};
use proptest::prelude::*;
use serde_json::{Value, json};

#[test]
fn attributes_are_extracted_in_server_order() {
    let payload = json!({
        "meta": {"total": 2},
        "data": [
            {"id": "a", "type": "options-eod", "attributes": {"contract": "A", "strike": 100}},
            {"id": "b", "type": "options-eod", "attributes": {"contract": "B", "strike": 105}}
        ]
    });
    let rows = Flattening::Attributes.apply(payload).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].str_field("contract"), Some("A"));
    assert_eq!(rows[1].f64_field("strike"), Some(105.0));
    assert!(rows[0].get("id").is_none());
}

#[test]
fn attributes_requires_data_array() {
    assert!(Flattening::Attributes.apply(json!([1, 2])).is_none());
    assert!(Flattening::Attributes.apply(json!({"errors": []})).is_none());
    assert!(Flattening::Attributes.apply(json!({"data": {}})).is_none());
    assert_eq!(
        Flattening::Attributes.apply(json!({"data": []})).map(|v| v.len()),
        Some(0)
    );
}

#[test]
fn items_without_attributes_object_are_skipped() {
    let payload = json!({"data": [
        {"attributes": {"k": 1}},
        {"id": "no-attrs"},
        {"attributes": "scalar"},
        7
    ]});
    let rows = Flattening::Attributes.apply(payload).unwrap();
    assert_eq!(rows.len(), 1);
}

#[test]
fn pass_through_unwraps_data_when_present() {
    let rows = Flattening::PassThrough
        .apply(json!({"data": [{"strike": 1}, {"strike": 2}]}))
        .unwrap();
    assert_eq!(rows.len(), 2);

    let rows = Flattening::PassThrough
        .apply(json!({"strike": 1, "type": "CALL"}))
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].str_field("type"), Some("CALL"));

    let rows = Flattening::PassThrough.apply(json!([1, "x"])).unwrap();
    assert_eq!(rows[1].str_field("value"), Some("x"));

    assert!(Flattening::PassThrough.apply(Value::Null).unwrap().is_empty());
    assert!(
        Flattening::PassThrough
            .apply(json!({"data": null}))
            .unwrap()
            .is_empty()
    );
}

#[test]
fn columns_are_union_in_first_seen_order() {
    let rows = Flattening::PassThrough
        .apply(json!([{"a": 1, "b": 2}, {"c": 3, "a": 4}]))
        .unwrap();
    let set: RecordSet = rows.into_iter().collect();
    // serde_json maps sort keys unless preserve_order is enabled, so compare as sets
    let mut cols = set.columns();
    cols.sort();
    assert_eq!(cols, vec!["a", "b", "c"]);
}

#[test]
fn numeric_strings_read_as_numbers() {
    let rows = Flattening::PassThrough
        .apply(json!({"close": "187.44", "bad": "NA"}))
        .unwrap();
    assert_eq!(rows[0].f64_field("close"), Some(187.44));
    assert_eq!(rows[0].f64_field("bad"), None);
}

fn arb_item() -> impl Strategy<Value = (bool, Value)> {
    prop_oneof![
        (0i64..1_000).prop_map(|n| (true, json!({"attributes": {"n": n}}))),
        (0i64..1_000).prop_map(|n| (false, json!({"id": n}))),
        Just((false, json!(null))),
    ]
}

proptest! {
    #[test]
    fn attributes_keeps_exactly_items_with_attributes(items in proptest::collection::vec(arb_item(), 0..64)) {
        let expected: Vec<i64> = items
            .iter()
            .filter(|(has, _)| *has)
            .map(|(_, v)| v["attributes"]["n"].as_i64().unwrap())
            .collect();
        let payload = json!({"data": items.into_iter().map(|(_, v)| v).collect::<Vec<_>>()});
        let rows = Flattening::Attributes.apply(payload).unwrap();
        let got: Vec<i64> = rows.iter().map(|r| r.get("n").and_then(Value::as_i64).unwrap()).collect();
        prop_assert_eq!(got, expected);
    }
}
