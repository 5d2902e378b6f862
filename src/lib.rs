//! Multibucket – a multi-valued map whose values are type-tagged buckets.
//!
//! The crate centers on two constructs:
//! * A [`bucket::Bucket`] is a single slot holding one element or nothing.
//! * A [`multibucket::Multibucket`] maps each key to an insertion-ordered
//!   sequence of buckets, so one key can hold many values of many types.
//!
//! Elements are [`datatype::Element`]s, a closed set of runtime types
//! (booleans, integers, text, decimals, dates, timestamps, JSON, lists, sets
//! and maps). Every element reports its exact [`datatype::ElementType`], and
//! all type matching in the container compares those tags for equality. A
//! list and a set are both collections, yet never match each other.
//!
//! ## Modules
//! * [`datatype`] – [`datatype::Element`], [`datatype::ElementType`] and the
//!   [`datatype::DataType`] trait mapping Rust types onto elements.
//! * [`bucket`] – the single-slot holder.
//! * [`multibucket`] – the key to bucket-sequence container.
//! * [`settings`] – configuration loading and tracing setup.
//! * [`error`] – the crate error type.
//!
//! ## Indexes
//! Most positional operations take an *absolute* index, the position in the
//! full sequence of a key. [`multibucket::Multibucket::replace_same_type`]
//! instead takes a *type-relative* index, counted only among buckets whose
//! current element has the same exact type as the new value.
//!
//! ## Failures
//! Container operations never return errors. An absent key, an index out of
//! range and a bucket holding the wrong kind of element all produce the same
//! `false`, `None` or empty result. Enable `trace` level logging for the
//! `multibucket` target to see which cause applied.
//!
//! ## Quick Start
//! ```
//! use multibucket::{Element, ElementType, Multibucket};
//! let mut mb: Multibucket<&str> = Multibucket::new();
//! mb.put("k", 1);
//! mb.put("k", "x");
//! mb.put("k", 2);
//! assert_eq!(mb.get_all("k").len(), 3);
//! // the second integer, counted among integers only
//! let previous = mb.replace_same_type("k", 9, 1);
//! assert_eq!(previous, Some(Element::Integer(2)));
//! let nine: Option<i64> = mb.get("k", 2);
//! assert_eq!(nine, Some(9));
//! assert!(mb.contains_type("k", ElementType::Text));
//! ```
//!
//! ## Concurrency
//! A multibucket has no internal locking and expects a single writer. To
//! share one between threads, wrap it in a [`multibucket::SharedMultibucket`]
//! (see [`multibucket::Multibucket::into_shared`]) and hold the lock for the
//! duration of each operation, or of each read-modify-write sequence that
//! must not interleave.

pub mod bucket;
pub mod datatype;
pub mod error;
pub mod multibucket;
pub mod settings;

pub use crate::bucket::Bucket;
pub use crate::datatype::{DataType, Decimal, Element, ElementType, JSON};
pub use crate::error::{MultibucketError, Result};
pub use crate::multibucket::{KeyHasher, Multibucket, SharedMultibucket};
pub use crate::settings::{init_tracing, Settings};
