// used for dates and timestamps held in buckets
use chrono::{NaiveDate, NaiveDateTime};
// used for decimal numbers
use bigdecimal::BigDecimal;
// used for JSON
use serde_json::Value;

// used to parse decimals from text
use std::str::FromStr;
// nested collections need a total order so elements can be set members and map keys
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
// used to print out readable forms of an element
use std::fmt;
// used to indicate that elements need to be hashable
use std::hash::{Hash, Hasher};
use std::ops;

// ------------- Element Type -------------

/// The exact runtime type of an [`Element`].
///
/// Type matching in this crate always compares these tags for equality.
/// `List` and `Set` are both collections, but neither ever matches the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementType {
    Boolean,
    Integer,
    Text,
    Decimal,
    Date,
    DateTime,
    Json,
    List,
    Set,
    Map,
}

impl ElementType {
    pub fn name(&self) -> &'static str {
        match self {
            ElementType::Boolean => "Boolean",
            ElementType::Integer => "Integer",
            ElementType::Text => "Text",
            ElementType::Decimal => "Decimal",
            ElementType::Date => "Date",
            ElementType::DateTime => "DateTime",
            ElementType::Json => "Json",
            ElementType::List => "List",
            ElementType::Set => "Set",
            ElementType::Map => "Map",
        }
    }
    /// Sequence-like types, the ones nested values can be added to.
    pub fn is_collection(&self) -> bool {
        matches!(self, ElementType::List | ElementType::Set)
    }
    pub fn is_map(&self) -> bool {
        matches!(self, ElementType::Map)
    }
}
impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ------------- Element -------------

/// A value of one of the supported runtime types.
///
/// Equality, ordering and hashing are structural, so nested lists, sets and
/// maps compare deeply.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Element {
    Boolean(bool),
    Integer(i64),
    Text(String),
    Decimal(Decimal),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Json(JSON),
    List(Vec<Element>),
    Set(BTreeSet<Element>),
    Map(BTreeMap<Element, Element>),
}

impl Element {
    pub fn element_type(&self) -> ElementType {
        match self {
            Element::Boolean(_) => ElementType::Boolean,
            Element::Integer(_) => ElementType::Integer,
            Element::Text(_) => ElementType::Text,
            Element::Decimal(_) => ElementType::Decimal,
            Element::Date(_) => ElementType::Date,
            Element::DateTime(_) => ElementType::DateTime,
            Element::Json(_) => ElementType::Json,
            Element::List(_) => ElementType::List,
            Element::Set(_) => ElementType::Set,
            Element::Map(_) => ElementType::Map,
        }
    }
    pub fn is_collection(&self) -> bool {
        self.element_type().is_collection()
    }
    pub fn is_map(&self) -> bool {
        self.element_type().is_map()
    }
    // Nested content is weakly typed: any element may join any collection.
    pub(crate) fn add_to_collection(&mut self, value: Element) -> bool {
        match self {
            Element::List(list) => {
                list.push(value);
                true
            }
            Element::Set(set) => set.insert(value),
            _ => false,
        }
    }
    pub(crate) fn collection_contains(&self, value: &Element) -> bool {
        match self {
            Element::List(list) => list.contains(value),
            Element::Set(set) => set.contains(value),
            _ => false,
        }
    }
    pub(crate) fn insert_into_map(&mut self, key: Element, value: Element) -> Option<Element> {
        match self {
            Element::Map(map) => map.insert(key, value),
            _ => None,
        }
    }
    pub(crate) fn map_get(&self, key: &Element) -> Option<&Element> {
        match self {
            Element::Map(map) => map.get(key),
            _ => None,
        }
    }
}

fn write_joined<'a, I>(f: &mut fmt::Formatter, items: I) -> fmt::Result
where
    I: Iterator<Item = &'a Element>,
{
    write!(f, "[")?;
    for (i, item) in items.enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    write!(f, "]")
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Element::Boolean(b) => write!(f, "{}", b),
            Element::Integer(i) => write!(f, "{}", i),
            Element::Text(s) => write!(f, "{}", s),
            Element::Decimal(d) => write!(f, "{}", d),
            Element::Date(d) => write!(f, "{}", d),
            Element::DateTime(d) => write!(f, "{}", d),
            Element::Json(j) => write!(f, "{}", j),
            Element::List(list) => write_joined(f, list.iter()),
            Element::Set(set) => write_joined(f, set.iter()),
            Element::Map(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}={}", k, v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

// ------------- Conversions into elements -------------
impl From<bool> for Element {
    fn from(b: bool) -> Self {
        Element::Boolean(b)
    }
}
impl From<i64> for Element {
    fn from(i: i64) -> Self {
        Element::Integer(i)
    }
}
impl From<i32> for Element {
    fn from(i: i32) -> Self {
        Element::Integer(i64::from(i))
    }
}
impl From<&str> for Element {
    fn from(s: &str) -> Self {
        Element::Text(s.to_owned())
    }
}
impl From<String> for Element {
    fn from(s: String) -> Self {
        Element::Text(s)
    }
}
impl From<Decimal> for Element {
    fn from(d: Decimal) -> Self {
        Element::Decimal(d)
    }
}
impl From<BigDecimal> for Element {
    fn from(d: BigDecimal) -> Self {
        Element::Decimal(Decimal(d))
    }
}
impl From<NaiveDate> for Element {
    fn from(d: NaiveDate) -> Self {
        Element::Date(d)
    }
}
impl From<NaiveDateTime> for Element {
    fn from(d: NaiveDateTime) -> Self {
        Element::DateTime(d)
    }
}
impl From<JSON> for Element {
    fn from(j: JSON) -> Self {
        Element::Json(j)
    }
}
impl From<Value> for Element {
    fn from(v: Value) -> Self {
        Element::Json(JSON(v))
    }
}
impl<T: Into<Element>> From<Vec<T>> for Element {
    fn from(list: Vec<T>) -> Self {
        Element::List(list.into_iter().map(Into::into).collect())
    }
}
impl<T: Into<Element>> From<BTreeSet<T>> for Element {
    fn from(set: BTreeSet<T>) -> Self {
        Element::Set(set.into_iter().map(Into::into).collect())
    }
}
impl<K: Into<Element>, V: Into<Element>> From<BTreeMap<K, V>> for Element {
    fn from(map: BTreeMap<K, V>) -> Self {
        Element::Map(map.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

// ------------- Data Types --------------

/// A Rust type that maps onto exactly one [`ElementType`].
///
/// `convert` is the checked cast back out of an [`Element`]; it yields `None`
/// when the element holds a different type.
pub trait DataType: Into<Element> + Sized {
    // static stuff which needs to be implemented downstream
    const ELEMENT_TYPE: ElementType;
    const DATA_TYPE: &'static str;
    fn convert(element: &Element) -> Option<Self>;
    // instance callable with pre-made implementation
    fn data_type(&self) -> &'static str {
        Self::DATA_TYPE
    }
    fn element_type(&self) -> ElementType {
        Self::ELEMENT_TYPE
    }
}

impl DataType for bool {
    const ELEMENT_TYPE: ElementType = ElementType::Boolean;
    const DATA_TYPE: &'static str = "bool";
    fn convert(element: &Element) -> Option<bool> {
        match element {
            Element::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}
impl DataType for i64 {
    const ELEMENT_TYPE: ElementType = ElementType::Integer;
    const DATA_TYPE: &'static str = "i64";
    fn convert(element: &Element) -> Option<i64> {
        match element {
            Element::Integer(i) => Some(*i),
            _ => None,
        }
    }
}
impl DataType for String {
    const ELEMENT_TYPE: ElementType = ElementType::Text;
    const DATA_TYPE: &'static str = "String";
    fn convert(element: &Element) -> Option<String> {
        match element {
            Element::Text(s) => Some(s.clone()),
            _ => None,
        }
    }
}
impl DataType for Decimal {
    const ELEMENT_TYPE: ElementType = ElementType::Decimal;
    const DATA_TYPE: &'static str = "Decimal";
    fn convert(element: &Element) -> Option<Decimal> {
        match element {
            Element::Decimal(d) => Some(d.clone()),
            _ => None,
        }
    }
}
impl DataType for NaiveDate {
    const ELEMENT_TYPE: ElementType = ElementType::Date;
    const DATA_TYPE: &'static str = "NaiveDate";
    fn convert(element: &Element) -> Option<NaiveDate> {
        match element {
            Element::Date(d) => Some(*d),
            _ => None,
        }
    }
}
impl DataType for NaiveDateTime {
    const ELEMENT_TYPE: ElementType = ElementType::DateTime;
    const DATA_TYPE: &'static str = "NaiveDateTime";
    fn convert(element: &Element) -> Option<NaiveDateTime> {
        match element {
            Element::DateTime(d) => Some(*d),
            _ => None,
        }
    }
}
impl DataType for JSON {
    const ELEMENT_TYPE: ElementType = ElementType::Json;
    const DATA_TYPE: &'static str = "JSON";
    fn convert(element: &Element) -> Option<JSON> {
        match element {
            Element::Json(j) => Some(j.clone()),
            _ => None,
        }
    }
}
impl DataType for Vec<Element> {
    const ELEMENT_TYPE: ElementType = ElementType::List;
    const DATA_TYPE: &'static str = "Vec<Element>";
    fn convert(element: &Element) -> Option<Vec<Element>> {
        match element {
            Element::List(list) => Some(list.clone()),
            _ => None,
        }
    }
}
impl DataType for BTreeSet<Element> {
    const ELEMENT_TYPE: ElementType = ElementType::Set;
    const DATA_TYPE: &'static str = "BTreeSet<Element>";
    fn convert(element: &Element) -> Option<BTreeSet<Element>> {
        match element {
            Element::Set(set) => Some(set.clone()),
            _ => None,
        }
    }
}
impl DataType for BTreeMap<Element, Element> {
    const ELEMENT_TYPE: ElementType = ElementType::Map;
    const DATA_TYPE: &'static str = "BTreeMap<Element, Element>";
    fn convert(element: &Element) -> Option<BTreeMap<Element, Element>> {
        match element {
            Element::Map(map) => Some(map.clone()),
            _ => None,
        }
    }
}

// Special types below
#[derive(Debug, Clone)]
pub struct JSON(Value);

impl JSON {
    pub fn from_str(s: &str) -> Option<JSON> {
        match serde_json::from_str::<Value>(s) {
            Ok(json) => Some(JSON(json)),
            _ => None,
        }
    }
}
// serde_json keeps object keys sorted, so the rendered text is canonical.
// Equality, ordering and hashing all go through it, which keeps -0.0 and 0.0 apart.
impl PartialEq for JSON {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_string() == other.0.to_string()
    }
}
impl Eq for JSON {}
impl Hash for JSON {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_string().hash(state);
    }
}
impl Ord for JSON {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.to_string().cmp(&other.0.to_string())
    }
}
impl PartialOrd for JSON {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl fmt::Display for JSON {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl ops::Deref for JSON {
    type Target = Value;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Clone)]
pub struct Decimal(BigDecimal);

impl Decimal {
    pub fn from_str(s: &str) -> Option<Decimal> {
        match BigDecimal::from_str(s) {
            Ok(decimal) => Some(Decimal(decimal)),
            _ => None,
        }
    }
}
impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl ops::Deref for Decimal {
    type Target = BigDecimal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
