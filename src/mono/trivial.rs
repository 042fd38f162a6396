//! Monos that emit no value: [`Empty`], [`Error`] and [`Never`].

use std::{convert::Infallible, marker::PhantomData};

use crate::{mono::Mono, mono::MonoSink, subscriber::Subscriber};

/// Completes immediately without a value.
pub struct Empty<Item>(PhantomData<fn() -> Item>);

impl<Item> Default for Empty<Item> {
  fn default() -> Self { Self(PhantomData) }
}

impl<Item> Clone for Empty<Item> {
  fn clone(&self) -> Self { Self::default() }
}

impl<Item: 'static> Mono for Empty<Item> {
  type Item = Item;
  type Err = Infallible;

  fn actual_subscribe<O>(self, subscriber: O)
  where
    O: Subscriber<Item, Infallible> + 'static,
  {
    MonoSink::attach(subscriber).empty();
  }
}

/// Fails immediately with an error, never emits a value.
pub struct Error<Item, Err> {
  err: Err,
  _p: PhantomData<fn() -> Item>,
}

impl<Item, Err> Error<Item, Err> {
  pub fn new(err: Err) -> Self { Self { err, _p: PhantomData } }
}

impl<Item, Err: Clone> Clone for Error<Item, Err> {
  fn clone(&self) -> Self { Self::new(self.err.clone()) }
}

impl<Item: 'static, Err: 'static> Mono for Error<Item, Err> {
  type Item = Item;
  type Err = Err;

  fn actual_subscribe<O>(self, subscriber: O)
  where
    O: Subscriber<Item, Err> + 'static,
  {
    MonoSink::attach(subscriber).error(self.err);
  }
}

/// Never emits and never terminates. The subscriber is held until the
/// subscription is cancelled or dropped.
pub struct Never<Item>(PhantomData<fn() -> Item>);

impl<Item> Default for Never<Item> {
  fn default() -> Self { Self(PhantomData) }
}

impl<Item> Clone for Never<Item> {
  fn clone(&self) -> Self { Self::default() }
}

impl<Item: 'static> Mono for Never<Item> {
  type Item = Item;
  type Err = Infallible;

  fn actual_subscribe<O>(self, subscriber: O)
  where
    O: Subscriber<Item, Infallible> + 'static,
  {
    MonoSink::<Item, Infallible>::attach(subscriber);
  }
}
