use crate::{
  mono::Mono,
  subscriber::Subscriber,
  subscription::{BoxedSubscription, Subscription},
};

// ==================== Map ====================

/// Transforms the value with an infallible function.
#[derive(Clone)]
pub struct Map<S, F> {
  pub source: S,
  pub func: F,
}

impl<S, F> Map<S, F> {
  pub fn new(source: S, func: F) -> Self { Self { source, func } }
}

pub struct MapSubscriber<O, F> {
  subscriber: O,
  func: Option<F>,
}

impl<Item, Err, U, O, F> Subscriber<Item, Err> for MapSubscriber<O, F>
where
  O: Subscriber<U, Err>,
  F: FnOnce(Item) -> U,
{
  fn on_subscribe(&mut self, subscription: BoxedSubscription) {
    self.subscriber.on_subscribe(subscription)
  }

  fn on_next(&mut self, value: Item) {
    if let Some(func) = self.func.take() {
      self.subscriber.on_next(func(value));
    }
  }

  fn on_error(self, err: Err) { self.subscriber.on_error(err) }

  fn on_complete(self) { self.subscriber.on_complete() }
}

impl<S, F, U> Mono for Map<S, F>
where
  S: Mono,
  F: FnOnce(S::Item) -> U + 'static,
{
  type Item = U;
  type Err = S::Err;

  fn actual_subscribe<O>(self, subscriber: O)
  where
    O: Subscriber<U, S::Err> + 'static,
  {
    let Map { source, func } = self;
    source.actual_subscribe(MapSubscriber { subscriber, func: Some(func) })
  }
}

// ==================== TryMap ====================

/// Transforms the value with a fallible function.
///
/// When the function returns `Err`, the upstream subscription is cancelled
/// and the error is delivered downstream in place of the value.
#[derive(Clone)]
pub struct TryMap<S, F> {
  pub source: S,
  pub func: F,
}

impl<S, F> TryMap<S, F> {
  pub fn new(source: S, func: F) -> Self { Self { source, func } }
}

pub struct TryMapSubscriber<O, F> {
  subscriber: Option<O>,
  func: Option<F>,
  upstream: Option<BoxedSubscription>,
}

impl<Item, Err, U, O, F> Subscriber<Item, Err> for TryMapSubscriber<O, F>
where
  O: Subscriber<U, Err>,
  F: FnOnce(Item) -> Result<U, Err>,
{
  fn on_subscribe(&mut self, subscription: BoxedSubscription) {
    self.upstream = Some(subscription.clone());
    if let Some(subscriber) = self.subscriber.as_mut() {
      subscriber.on_subscribe(subscription);
    }
  }

  fn on_next(&mut self, value: Item) {
    let Some(func) = self.func.take() else { return };
    match func(value) {
      Ok(mapped) => {
        if let Some(subscriber) = self.subscriber.as_mut() {
          subscriber.on_next(mapped);
        }
      }
      Err(err) => {
        if let Some(upstream) = self.upstream.take() {
          upstream.cancel();
        }
        if let Some(subscriber) = self.subscriber.take() {
          subscriber.on_error(err);
        }
      }
    }
  }

  fn on_error(self, err: Err) {
    if let Some(subscriber) = self.subscriber {
      subscriber.on_error(err);
    }
  }

  fn on_complete(self) {
    if let Some(subscriber) = self.subscriber {
      subscriber.on_complete();
    }
  }
}

impl<S, F, U> Mono for TryMap<S, F>
where
  S: Mono,
  F: FnOnce(S::Item) -> Result<U, S::Err> + 'static,
{
  type Item = U;
  type Err = S::Err;

  fn actual_subscribe<O>(self, subscriber: O)
  where
    O: Subscriber<U, S::Err> + 'static,
  {
    let TryMap { source, func } = self;
    source.actual_subscribe(TryMapSubscriber {
      subscriber: Some(subscriber),
      func: Some(func),
      upstream: None,
    })
  }
}
