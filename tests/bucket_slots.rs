use std::collections::{BTreeMap, BTreeSet};

use multibucket::{Bucket, Element, ElementType, MultibucketError};

#[test]
fn put_returns_previous_element() {
    let mut bucket: Bucket = Bucket::new();
    assert!(bucket.is_empty());
    assert_eq!(bucket.put(Element::from(1)), None);
    assert_eq!(bucket.put(Element::from("two")), Some(Element::from(1)));
    assert_eq!(bucket.get(), Some(&Element::from("two")));
}

#[test]
fn put_if_empty_keeps_existing_element() {
    let mut bucket = Bucket::of(Element::from(1));
    assert_eq!(bucket.put_if_empty(Element::from(2)), Some(&Element::from(1)));
    assert_eq!(bucket.get(), Some(&Element::from(1)), "no overwrite");
    bucket.empty();
    assert!(bucket.is_empty());
    assert_eq!(bucket.put_if_empty(Element::from(3)), None);
    assert_eq!(bucket.get(), Some(&Element::from(3)));
}

#[test]
fn empty_is_idempotent() {
    let mut bucket: Bucket<u8> = Bucket::default();
    bucket.empty();
    bucket.empty();
    assert!(bucket.is_empty());
    assert_eq!(bucket.into_inner(), None);
}

#[test]
fn generic_buckets_hold_any_type() {
    let mut bucket = Bucket::of(vec![1u8, 2]);
    bucket.get_mut().expect("filled").push(3);
    assert_eq!(bucket.get(), Some(&vec![1, 2, 3]));
    assert_eq!(bucket.put(vec![]), Some(vec![1, 2, 3]));
}

#[test]
fn collection_queries_follow_held_type() {
    let list = Bucket::of(Element::from(Vec::<Element>::new()));
    let set = Bucket::of(Element::from(BTreeSet::<Element>::new()));
    let map = Bucket::of(Element::from(BTreeMap::<Element, Element>::new()));
    let scalar = Bucket::of(Element::from(5));
    let empty: Bucket = Bucket::new();
    assert!(list.contains_collection() && !list.contains_map());
    assert!(set.contains_collection() && !set.contains_map());
    assert!(map.contains_map() && !map.contains_collection());
    assert!(!scalar.contains_collection() && !scalar.contains_map());
    assert!(!empty.contains_collection() && !empty.contains_map());
}

#[test]
fn add_to_collection_accepts_mismatched_types() {
    let mut bucket = Bucket::of(Element::from(vec![1, 2]));
    assert!(bucket.add_to_collection("three"));
    assert!(bucket.add_to_collection(vec![4]));
    assert!(bucket.contained_in_collection("three"));
    assert!(bucket.contained_in_collection(vec![4]));
    assert!(!bucket.contained_in_collection(4));
    assert_eq!(bucket.to_string(), "[1, 2, three, [4]]");
}

#[test]
fn add_to_collection_fails_without_collection() {
    let mut scalar = Bucket::of(Element::from(5));
    assert!(!scalar.add_to_collection(6));
    let mut empty: Bucket = Bucket::new();
    assert!(!empty.add_to_collection(6));
    assert!(!empty.contained_in_collection(6));
}

#[test]
fn set_reports_duplicate_insertions() {
    let mut bucket = Bucket::of(Element::from(BTreeSet::from([1])));
    assert!(!bucket.add_to_collection(1));
    assert!(bucket.add_to_collection(2));
}

#[test]
fn map_operations_return_previous_values() {
    let mut bucket = Bucket::of(Element::from(BTreeMap::<Element, Element>::new()));
    assert_eq!(bucket.add_to_map("a", 1), None);
    assert_eq!(bucket.add_to_map("a", 2), Some(Element::from(1)));
    assert_eq!(bucket.get_from_map("a"), Some(&Element::from(2)));
    assert_eq!(bucket.get_from_map("b"), None);

    let mut scalar = Bucket::of(Element::from("not a map"));
    assert_eq!(scalar.add_to_map("a", 1), None);
    assert_eq!(scalar.get_from_map("a"), None);
    assert_eq!(scalar.get(), Some(&Element::from("not a map")));
}

#[test]
fn element_type_of_filled_bucket() {
    let bucket = Bucket::of(Element::from(true));
    assert_eq!(bucket.element_type(), ElementType::Boolean);
    assert_eq!(bucket.try_element_type().expect("filled"), ElementType::Boolean);
}

#[test]
#[should_panic(expected = "empty bucket")]
fn element_type_of_empty_bucket_panics() {
    let bucket: Bucket = Bucket::new();
    bucket.element_type();
}

#[test]
fn try_element_type_reports_empty_bucket() {
    let bucket: Bucket = Bucket::new();
    assert!(matches!(
        bucket.try_element_type(),
        Err(MultibucketError::EmptyBucket)
    ));
}

#[test]
fn equality_and_display_follow_element() {
    let a = Bucket::of(Element::from(vec!["x", "y"]));
    let b = Bucket::of(Element::from(vec!["x", "y"]));
    assert_eq!(a, b);
    assert_ne!(a, Bucket::of(Element::from(vec!["y", "x"])));
    assert_eq!(a.to_string(), "[x, y]");
    let empty: Bucket = Bucket::new();
    assert_ne!(a, empty);
    assert_eq!(empty, Bucket::new());
}

#[test]
fn display_of_empty_bucket_fails() {
    use std::fmt::Write;
    let empty: Bucket = Bucket::new();
    let mut out = String::new();
    assert!(write!(out, "{}", empty).is_err());
}
