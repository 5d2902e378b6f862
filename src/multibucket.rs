use std::sync::{Arc, Mutex};

// the key map uses SeaHash unless another hasher is supplied
use core::hash::{BuildHasher, BuildHasherDefault};
use seahash::SeaHasher;
use std::borrow::Borrow;
use std::collections::hash_map::{Entry, Keys};
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

// used to print out readable forms of a multibucket
use std::fmt;

use tracing::trace;

use crate::bucket::Bucket;
use crate::datatype::{DataType, Element, ElementType};
use crate::settings::Settings;

pub type KeyHasher = BuildHasherDefault<SeaHasher>;

/// A multibucket behind the lock that concurrent callers must go through.
pub type SharedMultibucket<K, H = KeyHasher> = Arc<Mutex<Multibucket<K, H>>>;

// ------------- Multibucket -------------

/// A map from keys to insertion-ordered sequences of [`Bucket`]s.
///
/// A key's sequence is created by its first insertion and never shrinks;
/// there is no removal. Every bucket held here is filled.
///
/// Two kinds of index are used:
/// * the *absolute* index is the position in the full sequence of a key,
/// * the *type-relative* index (only in [`Multibucket::replace_same_type`])
///   counts just the buckets whose current element has the same exact
///   [`ElementType`] as the new value, in the same order.
///
/// Failures are not told apart: an absent key, an index out of range and a
/// bucket holding the wrong kind of element all give the same `false`, `None`
/// or empty result. The cause is emitted as a `trace` event.
///
/// The structure has no internal locking. Share it across threads through a
/// [`SharedMultibucket`].
#[derive(Debug, Clone)]
pub struct Multibucket<K, H = KeyHasher> {
    kept: HashMap<K, Vec<Bucket>, H>,
}

impl<K: Eq + Hash, H: BuildHasher + Default> Multibucket<K, H> {
    pub fn new() -> Self {
        Self {
            kept: HashMap::default(),
        }
    }
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            kept: HashMap::with_capacity_and_hasher(capacity, H::default()),
        }
    }
    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_capacity(settings.initial_capacity)
    }
    pub fn into_shared(self) -> SharedMultibucket<K, H> {
        Arc::new(Mutex::new(self))
    }
}

impl<K: Eq + Hash, H: BuildHasher> Multibucket<K, H> {
    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.kept.len()
    }
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
    /// All keys, in no particular order.
    pub fn keys(&self) -> Keys<'_, K, Vec<Bucket>> {
        self.kept.keys()
    }
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.kept.contains_key(key)
    }

    // ---- insertion ----

    /// Appends a new bucket holding `value`, creating the key's sequence if
    /// needed.
    pub fn put(&mut self, key: K, value: impl Into<Element>) {
        self.kept.entry(key).or_default().push(Bucket::of(value.into()));
    }
    /// Appends `value` unless some bucket of the key already holds an equal
    /// element. Returns whether it was appended.
    pub fn put_if_absent(&mut self, key: K, value: impl Into<Element>) -> bool {
        let value = value.into();
        self.put_unless(key, value, |held, value| held == value)
    }
    /// Appends `value` unless some bucket of the key already holds an element
    /// of the exact same type. Returns whether it was appended.
    pub fn put_if_absent_type(&mut self, key: K, value: impl Into<Element>) -> bool {
        let value = value.into();
        self.put_unless(key, value, |held, value| {
            held.element_type() == value.element_type()
        })
    }
    fn put_unless<F>(&mut self, key: K, value: Element, clashes: F) -> bool
    where
        F: Fn(&Element, &Element) -> bool,
    {
        match self.kept.entry(key) {
            Entry::Vacant(e) => {
                e.insert(vec![Bucket::of(value)]);
                true
            }
            Entry::Occupied(mut e) => {
                let clash = e
                    .get()
                    .iter()
                    .filter_map(Bucket::get)
                    .any(|held| clashes(held, &value));
                if clash {
                    trace!(element_type = %value.element_type(), "insertion refused, clashing element present");
                    return false;
                }
                e.get_mut().push(Bucket::of(value));
                true
            }
        }
    }
    /// Adds `value` into the collection held at absolute position `index`.
    ///
    /// Returns `false` if the key is absent, the index is out of range or the
    /// bucket there holds no list or set. A set that already contains `value`
    /// is left as is and still counts as success.
    pub fn put_in_collection<Q>(&mut self, key: &Q, value: impl Into<Element>, index: usize) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(bucket) = self.locate_mut(key, index) else {
            return false;
        };
        if !bucket.contains_collection() {
            trace!(index, "bucket holds no collection");
            return false;
        }
        bucket.add_to_collection(value);
        true
    }
    /// Same as [`Multibucket::put_in_collection`].
    ///
    /// `index` is an absolute index and `_element_type` takes no part in
    /// locating the bucket. Callers that rely on an index relative to the
    /// buckets of one type have to translate it first, for example through
    /// [`Multibucket::all_positions_of_type`].
    pub fn put_in_collection_of_type<Q>(
        &mut self,
        key: &Q,
        value: impl Into<Element>,
        _element_type: ElementType,
        index: usize,
    ) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.put_in_collection(key, value, index)
    }
    /// Puts `(map_key, value)` into the map held at absolute position `index`
    /// and returns the value previously stored under `map_key`.
    ///
    /// `None` also covers every failure: absent key, bad index, no map held.
    pub fn put_in_map<Q>(
        &mut self,
        key: &Q,
        map_key: impl Into<Element>,
        value: impl Into<Element>,
        index: usize,
    ) -> Option<Element>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let bucket = self.locate_mut(key, index)?;
        if !bucket.contains_map() {
            trace!(index, "bucket holds no map");
            return None;
        }
        bucket.add_to_map(map_key, value)
    }

    // ---- replacement ----

    /// Overwrites the bucket at absolute position `index` with one holding
    /// `value`, whatever type either element has. Returns the old element.
    pub fn replace<Q>(&mut self, key: &Q, value: impl Into<Element>, index: usize) -> Option<Element>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let bucket = self.locate_mut(key, index)?;
        bucket.take_replaced(value.into())
    }
    /// Overwrites the `index`-th bucket (0-based) among those whose current
    /// element has the same exact type as `value`. Returns the old element.
    ///
    /// The count is taken over the sequence as it is now, so earlier
    /// replacements shift later type-relative indexes.
    pub fn replace_same_type<Q>(
        &mut self,
        key: &Q,
        value: impl Into<Element>,
        index: usize,
    ) -> Option<Element>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let value = value.into();
        let wanted = value.element_type();
        let Some(buckets) = self.kept.get_mut(key) else {
            trace!("key not present");
            return None;
        };
        let position = buckets
            .iter()
            .enumerate()
            .filter(|(_, b)| b.get().map(Element::element_type) == Some(wanted))
            .nth(index)
            .map(|(position, _)| position);
        match position {
            Some(position) => buckets[position].take_replaced(value),
            None => {
                trace!(index, element_type = %wanted, "type-relative index out of range");
                None
            }
        }
    }

    // ---- lookup ----

    /// True iff some bucket of the key holds an element equal to `value`.
    pub fn contains<Q>(&self, key: &Q, value: impl Into<Element>) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.first_index(key, value).is_some()
    }
    /// True iff some bucket of the key holds an element of exactly this type.
    pub fn contains_type<Q>(&self, key: &Q, element_type: ElementType) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.elements(key).any(|e| e.element_type() == element_type)
    }
    /// Absolute position of the first element equal to `value`.
    pub fn first_index<Q>(&self, key: &Q, value: impl Into<Element>) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let value = value.into();
        self.elements(key).position(|e| *e == value)
    }
    /// Absolute positions of every element equal to `value`, ascending.
    pub fn all_indexes<Q>(&self, key: &Q, value: impl Into<Element>) -> Vec<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let value = value.into();
        self.elements(key)
            .enumerate()
            .filter(|(_, e)| **e == value)
            .map(|(i, _)| i)
            .collect()
    }
    /// Absolute positions of every element of exactly this type, ascending.
    /// Position `n` of the result is type-relative index `n`.
    pub fn all_positions_of_type<Q>(&self, key: &Q, element_type: ElementType) -> Vec<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.elements(key)
            .enumerate()
            .filter(|(_, e)| e.element_type() == element_type)
            .map(|(i, _)| i)
            .collect()
    }
    /// The element at absolute position `index`, converted to `V`.
    ///
    /// The target type is usually inferred: `let n: Option<i64> = mb.get("k", 0);`
    ///
    /// `None` if the key is absent, the index is out of range or the element
    /// is not a `V`.
    pub fn get<V: DataType, Q>(&self, key: &Q, index: usize) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let element = self.element(key, index)?;
        let converted = V::convert(element);
        if converted.is_none() {
            trace!(index, held = %element.element_type(), wanted = V::DATA_TYPE, "element not convertible");
        }
        converted
    }
    pub fn element<Q>(&self, key: &Q, index: usize) -> Option<&Element>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.locate(key, index).and_then(Bucket::get)
    }
    /// The value under `map_key` in the map held at absolute position `index`.
    pub fn get_from_map<Q>(&self, key: &Q, map_key: impl Into<Element>, index: usize) -> Option<&Element>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let bucket = self.locate(key, index)?;
        if !bucket.contains_map() {
            trace!(index, "bucket holds no map");
            return None;
        }
        bucket.get_from_map(map_key)
    }
    /// The buckets whose element has exactly this type, in sequence order.
    pub fn get_all_of_type<Q>(&self, key: &Q, element_type: ElementType) -> Vec<&Bucket>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_all(key)
            .iter()
            .filter(|b| b.get().map(Element::element_type) == Some(element_type))
            .collect()
    }
    /// Every bucket of the key in insertion order; empty if the key is absent.
    pub fn get_all<Q>(&self, key: &Q) -> &[Bucket]
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.kept.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    // ---- helpers ----

    fn elements<Q>(&self, key: &Q) -> impl Iterator<Item = &Element>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_all(key).iter().filter_map(Bucket::get)
    }
    fn locate<Q>(&self, key: &Q, index: usize) -> Option<&Bucket>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(buckets) = self.kept.get(key) else {
            trace!("key not present");
            return None;
        };
        let bucket = buckets.get(index);
        if bucket.is_none() {
            trace!(index, len = buckets.len(), "bucket index out of range");
        }
        bucket
    }
    fn locate_mut<Q>(&mut self, key: &Q, index: usize) -> Option<&mut Bucket>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(buckets) = self.kept.get_mut(key) else {
            trace!("key not present");
            return None;
        };
        let len = buckets.len();
        let bucket = buckets.get_mut(index);
        if bucket.is_none() {
            trace!(index, len, "bucket index out of range");
        }
        bucket
    }
}

impl<K: Eq + Hash, H: BuildHasher + Default> Default for Multibucket<K, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, H: BuildHasher> PartialEq for Multibucket<K, H> {
    fn eq(&self, other: &Self) -> bool {
        self.kept == other.kept
    }
}
impl<K: Eq + Hash, H: BuildHasher> Eq for Multibucket<K, H> {}

// Map iteration order is unspecified, so entries are digested one by one and
// summed; equal multibuckets hash equal whatever order their keys were added in.
impl<K: Eq + Hash, H: BuildHasher> Hash for Multibucket<K, H> {
    fn hash<S: Hasher>(&self, state: &mut S) {
        let digest = self.kept.iter().fold(0u64, |sum, (key, buckets)| {
            let mut entry = SeaHasher::default();
            key.hash(&mut entry);
            buckets.hash(&mut entry);
            sum.wrapping_add(entry.finish())
        });
        self.kept.len().hash(state);
        digest.hash(state);
    }
}

impl<K, H> fmt::Display for Multibucket<K, H> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Multibucket of size: {}", self.kept.len())
    }
}
