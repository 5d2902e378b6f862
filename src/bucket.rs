// used to print out readable forms of a bucket
use std::fmt;
use std::mem;

use crate::datatype::{Element, ElementType};
use crate::error::{MultibucketError, Result};

// ------------- Bucket -------------

/// A single slot that holds one element or nothing.
///
/// The generic operations work for any `E`. The nested collection and map
/// operations, and the type queries, are available when the slot holds an
/// [`Element`], which is what a [`crate::Multibucket`] stores.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bucket<E = Element> {
    element: Option<E>,
}

impl<E> Bucket<E> {
    pub fn new() -> Self {
        Self { element: None }
    }
    pub fn of(element: E) -> Self {
        Self {
            element: Some(element),
        }
    }
    pub fn is_empty(&self) -> bool {
        self.element.is_none()
    }
    pub fn empty(&mut self) {
        self.element = None;
    }
    /// Stores `e` unconditionally and hands back whatever was there before.
    pub fn put(&mut self, e: E) -> Option<E> {
        self.element.replace(e)
    }
    /// Stores `e` only if the bucket is empty.
    ///
    /// Returns the element that is already held when the bucket was full (and
    /// `e` is dropped), or `None` after a successful store.
    pub fn put_if_empty(&mut self, e: E) -> Option<&E> {
        if self.element.is_some() {
            return self.element.as_ref();
        }
        self.element = Some(e);
        None
    }
    pub fn get(&self) -> Option<&E> {
        self.element.as_ref()
    }
    pub fn get_mut(&mut self) -> Option<&mut E> {
        self.element.as_mut()
    }
    pub fn into_inner(self) -> Option<E> {
        self.element
    }
    // used by the multibucket when a position is overwritten
    pub(crate) fn take_replaced(&mut self, e: E) -> Option<E> {
        mem::replace(self, Bucket::of(e)).into_inner()
    }
}

impl Bucket<Element> {
    pub fn contains_collection(&self) -> bool {
        self.element.as_ref().is_some_and(Element::is_collection)
    }
    pub fn contains_map(&self) -> bool {
        self.element.as_ref().is_some_and(Element::is_map)
    }
    /// True iff the bucket holds a collection that contains `e`.
    pub fn contained_in_collection(&self, e: impl Into<Element>) -> bool {
        let e = e.into();
        self.element
            .as_ref()
            .is_some_and(|held| held.collection_contains(&e))
    }
    /// Adds `e` to the held list or set.
    ///
    /// Returns `false` when the bucket does not hold a collection, or when the
    /// held set already contains `e`. The type of `e` is not checked against
    /// the other members.
    pub fn add_to_collection(&mut self, e: impl Into<Element>) -> bool {
        match self.element.as_mut() {
            Some(held) if held.is_collection() => held.add_to_collection(e.into()),
            _ => false,
        }
    }
    /// Puts `(key, value)` into the held map and returns the value previously
    /// stored under `key`. Returns `None` as well when no map is held.
    pub fn add_to_map(
        &mut self,
        key: impl Into<Element>,
        value: impl Into<Element>,
    ) -> Option<Element> {
        match self.element.as_mut() {
            Some(held) if held.is_map() => held.insert_into_map(key.into(), value.into()),
            _ => None,
        }
    }
    pub fn get_from_map(&self, key: impl Into<Element>) -> Option<&Element> {
        let key = key.into();
        self.element.as_ref().and_then(|held| held.map_get(&key))
    }
    /// The exact type of the held element.
    ///
    /// # Panics
    /// Panics if the bucket is empty. Asking an empty bucket for its type is a
    /// caller error; use [`Bucket::try_element_type`] to check instead.
    pub fn element_type(&self) -> ElementType {
        match &self.element {
            Some(held) => held.element_type(),
            None => panic!("element type requested from an empty bucket"),
        }
    }
    pub fn try_element_type(&self) -> Result<ElementType> {
        self.element
            .as_ref()
            .map(Element::element_type)
            .ok_or(MultibucketError::EmptyBucket)
    }
}

impl<E> Default for Bucket<E> {
    fn default() -> Self {
        Self::new()
    }
}

// An empty bucket has no display form; formatting it reports an error.
impl<E: fmt::Display> fmt::Display for Bucket<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.element {
            Some(e) => write!(f, "{}", e),
            None => Err(fmt::Error),
        }
    }
}
