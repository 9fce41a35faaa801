use crate::value::{DictMap, Value};
use std::{collections::btree_map, iter::FusedIterator};

///
/// DictIter
///
/// Owned `(field, value)` pairs of one full-default `asdict` result.
/// Finite; call `Dictable::iter_dict` again to restart from fresh state.
///

#[derive(Debug)]
pub struct DictIter {
    inner: btree_map::IntoIter<String, Value>,
}

impl DictIter {
    #[must_use]
    pub fn new(data: DictMap) -> Self {
        Self {
            inner: data.into_iter(),
        }
    }
}

impl Iterator for DictIter {
    type Item = (String, Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for DictIter {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl ExactSizeIterator for DictIter {}

impl FusedIterator for DictIter {}
