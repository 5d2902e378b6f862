use std::collections::BTreeSet;

use chrono::NaiveDate;
use multibucket::{DataType, Decimal, Element, ElementType, Multibucket, JSON};

fn setup() -> Multibucket<&'static str> {
    let mut mb = Multibucket::new();
    mb.put("k", 1);
    mb.put("k", "one");
    mb.put("k", 1);
    mb.put("k", vec![1, 2]);
    mb.put("k", BTreeSet::from([1, 2]));
    mb.put(
        "k",
        NaiveDate::from_ymd_opt(2024, 2, 29).expect("leap day"),
    );
    mb
}

#[test]
fn contains_uses_element_equality() {
    let mb = setup();
    assert!(mb.contains("k", 1));
    assert!(mb.contains("k", "one"));
    assert!(mb.contains("k", vec![1, 2]));
    assert!(!mb.contains("k", vec![2, 1]));
    assert!(!mb.contains("k", "1"), "text never equals an integer");
    assert!(!mb.contains("missing", 1));
}

#[test]
fn index_searches() {
    let mb = setup();
    assert_eq!(mb.first_index("k", 1), Some(0));
    assert_eq!(mb.all_indexes("k", 1), vec![0, 2]);
    assert_eq!(mb.first_index("k", vec![1, 2]), Some(3));
    assert_eq!(mb.first_index("k", 42), None);
    assert!(mb.all_indexes("k", 42).is_empty());
    assert_eq!(mb.first_index("missing", 1), None);
    assert!(mb.all_indexes("missing", 1).is_empty());
}

#[test]
fn contains_type_is_exact() {
    let mb = setup();
    assert!(mb.contains_type("k", ElementType::Integer));
    assert!(mb.contains_type("k", ElementType::Date));
    assert!(!mb.contains_type("k", ElementType::DateTime));
    assert!(!mb.contains_type("k", ElementType::Map));
    assert!(mb.contains_type("k", i64::ELEMENT_TYPE));
    assert!(!mb.contains_type("missing", ElementType::Integer));
}

#[test]
fn exact_type_excludes_related_types() {
    let mut mb: Multibucket<&str> = Multibucket::new();
    mb.put("k", vec![1]);
    let bucket = &mb.get_all("k")[0];
    assert!(bucket.contains_collection(), "a list is a collection");
    assert!(!mb.contains_type("k", ElementType::Set));
    assert!(mb.get_all_of_type("k", ElementType::Set).is_empty());
}

#[test]
fn typed_get() {
    let mb = setup();
    let one: Option<i64> = mb.get("k", 0);
    assert_eq!(one, Some(1));
    let text: Option<String> = mb.get("k", 1);
    assert_eq!(text.as_deref(), Some("one"));
    let list: Option<Vec<Element>> = mb.get("k", 3);
    assert_eq!(list, Some(vec![Element::from(1), Element::from(2)]));
    let date = mb.get::<NaiveDate, _>("k", 5);
    assert_eq!(date, NaiveDate::from_ymd_opt(2024, 2, 29));
}

#[test]
fn failed_gets_are_indistinguishable() {
    let mb = setup();
    let missing_key: Option<i64> = mb.get("missing", 0);
    let bad_index: Option<i64> = mb.get("k", 999);
    let wrong_type: Option<i64> = mb.get("k", 1);
    assert_eq!(missing_key, None);
    assert_eq!(missing_key, bad_index);
    assert_eq!(bad_index, wrong_type);
    assert_eq!(mb.element("missing", 0), mb.element("k", 999));
}

#[test]
fn get_all_of_type_keeps_order() {
    let mb = setup();
    let ints = mb.get_all_of_type("k", ElementType::Integer);
    assert_eq!(ints.len(), 2);
    assert!(ints.iter().all(|b| b.element_type() == ElementType::Integer));
    let collections = mb.get_all_of_type("k", ElementType::List);
    assert_eq!(collections.len(), 1);
    assert_eq!(collections[0].to_string(), "[1, 2]");
    assert!(mb.get_all_of_type("missing", ElementType::Integer).is_empty());
}

#[test]
fn get_all_of_missing_key_is_empty() {
    let mb = setup();
    assert!(mb.get_all("missing").is_empty());
    assert_eq!(mb.get_all("k").len(), 6);
}

#[test]
fn decimal_and_json_elements() {
    let mut mb: Multibucket<&str> = Multibucket::new();
    let price = Decimal::from_str("19.90").expect("valid decimal");
    let doc = JSON::from_str(r#"{"id": 7}"#).expect("valid json");
    mb.put("k", price.clone());
    mb.put("k", doc.clone());
    assert!(mb.contains("k", price.clone()));
    assert!(mb.contains("k", doc));
    assert!(mb.contains_type("k", ElementType::Json));
    let back: Option<Decimal> = mb.get("k", 0);
    assert_eq!(back, Some(price));
    let json: Option<JSON> = mb.get("k", 1);
    assert_eq!(json.as_deref().and_then(|v| v.get("id")), Some(&serde_json::json!(7)));
}
