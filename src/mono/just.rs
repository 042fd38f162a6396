use std::marker::PhantomData;

use crate::{mono::Mono, mono::MonoSink, subscriber::Subscriber};

/// Emits one value, then completes.
///
/// This struct is created by [`just`](crate::factory::just).
pub struct Just<Item, Err> {
  value: Item,
  _p: PhantomData<fn() -> Err>,
}

impl<Item, Err> Just<Item, Err> {
  pub fn new(value: Item) -> Self { Self { value, _p: PhantomData } }
}

impl<Item: Clone, Err> Clone for Just<Item, Err> {
  fn clone(&self) -> Self { Self::new(self.value.clone()) }
}

impl<Item: 'static, Err: 'static> Mono for Just<Item, Err> {
  type Item = Item;
  type Err = Err;

  fn actual_subscribe<O>(self, subscriber: O)
  where
    O: Subscriber<Item, Err> + 'static,
  {
    MonoSink::attach(subscriber).success(self.value);
  }
}

/// Emits the value if there is one, completes empty otherwise.
///
/// This struct is created by [`just_or_empty`](crate::factory::just_or_empty).
pub struct JustOrEmpty<Item, Err> {
  value: Option<Item>,
  _p: PhantomData<fn() -> Err>,
}

impl<Item, Err> JustOrEmpty<Item, Err> {
  pub fn new(value: Option<Item>) -> Self { Self { value, _p: PhantomData } }
}

impl<Item: Clone, Err> Clone for JustOrEmpty<Item, Err> {
  fn clone(&self) -> Self { Self::new(self.value.clone()) }
}

impl<Item: 'static, Err: 'static> Mono for JustOrEmpty<Item, Err> {
  type Item = Item;
  type Err = Err;

  fn actual_subscribe<O>(self, subscriber: O)
  where
    O: Subscriber<Item, Err> + 'static,
  {
    let sink = MonoSink::attach(subscriber);
    match self.value {
      Some(value) => sink.success(value),
      None => sink.empty(),
    }
  }
}
