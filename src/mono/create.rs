use std::marker::PhantomData;

use crate::{mono::Mono, mono::MonoSink, subscriber::Subscriber};

/// Mono driven by a producer closure.
///
/// This struct is created by [`create`](crate::factory::create). The closure
/// runs once per subscription, after `on_subscribe`, and receives the
/// [`MonoSink`] of that subscription.
pub struct Create<F, Item, Err> {
  f: F,
  _marker: PhantomData<fn() -> (Item, Err)>,
}

impl<F, Item, Err> Create<F, Item, Err> {
  pub fn new(f: F) -> Self { Self { f, _marker: PhantomData } }
}

impl<F: Clone, Item, Err> Clone for Create<F, Item, Err> {
  fn clone(&self) -> Self { Self::new(self.f.clone()) }
}

impl<F, Item, Err> Mono for Create<F, Item, Err>
where
  F: FnOnce(MonoSink<Item, Err>),
  Item: 'static,
  Err: 'static,
{
  type Item = Item;
  type Err = Err;

  fn actual_subscribe<O>(self, subscriber: O)
  where
    O: Subscriber<Item, Err> + 'static,
  {
    (self.f)(MonoSink::attach(subscriber));
  }
}
