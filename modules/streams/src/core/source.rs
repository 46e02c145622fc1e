use alloc::{boxed::Box, vec::Vec};
use core::iter::Fuse;

use super::{DynValue, SourceLogic};


/// Source over a finite, already-materialized ordered sequence.
///
/// The length is known before any element is pulled.
pub(in crate::core) struct CollectionSourceLogic<T> {
  values: alloc::vec::IntoIter<T>,
}

impl<T> CollectionSourceLogic<T> {
  pub(in crate::core) fn new(values: Vec<T>) -> Self {
    Self { values: values.into_iter() }
  }
}

impl<T> SourceLogic for CollectionSourceLogic<T>
where
  T: Send + Sync + 'static,
{
  fn pull(&mut self) -> Option<DynValue> {
    self.values.next().map(|value| Box::new(value) as DynValue)
  }
}

/// Source over an opaque single-pass producer of unknown size.
///
/// The producer is fused so that pulling past exhaustion keeps returning
/// `None` even for iterators that do not guarantee it themselves.
pub(in crate::core) struct IteratorSourceLogic<I>
where
  I: Iterator, {
  values: Fuse<I>,
}

impl<I> IteratorSourceLogic<I>
where
  I: Iterator,
{
  pub(in crate::core) fn new(values: I) -> Self {
    Self { values: values.fuse() }
  }
}

impl<I, T> SourceLogic for IteratorSourceLogic<I>
where
  I: Iterator<Item = T> + Send + 'static,
  T: Send + Sync + 'static,
{
  fn pull(&mut self) -> Option<DynValue> {
    self.values.next().map(|value| Box::new(value) as DynValue)
  }
}
