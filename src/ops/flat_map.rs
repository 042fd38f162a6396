use std::rc::Rc;

use crate::{
  mono::Mono,
  subscriber::Subscriber,
  subscription::{BoxedSubscription, SubscriptionArbiter},
};

/// Continues with the mono built from the value.
///
/// Downstream sees a single subscription for the whole chain. Demand
/// requested before the inner mono starts is passed on to it.
#[derive(Clone)]
pub struct FlatMap<S, F> {
  pub source: S,
  pub func: F,
}

impl<S, F> FlatMap<S, F> {
  pub fn new(source: S, func: F) -> Self { Self { source, func } }
}

pub struct FlatMapSubscriber<O, F> {
  subscriber: Option<O>,
  func: Option<F>,
  arbiter: Rc<SubscriptionArbiter>,
}

impl<Item, Err, O, F, R> Subscriber<Item, Err> for FlatMapSubscriber<O, F>
where
  O: Subscriber<R::Item, Err> + 'static,
  F: FnOnce(Item) -> R,
  R: Mono<Err = Err>,
{
  fn on_subscribe(&mut self, subscription: BoxedSubscription) {
    self.arbiter.set(subscription);
    if let Some(subscriber) = self.subscriber.as_mut() {
      subscriber.on_subscribe(BoxedSubscription::from_rc(self.arbiter.clone()));
    }
  }

  fn on_next(&mut self, value: Item) {
    if let (Some(func), Some(subscriber)) = (self.func.take(), self.subscriber.take()) {
      func(value).actual_subscribe(ArbitedSubscriber::new(subscriber, self.arbiter.clone()));
    }
  }

  fn on_error(self, err: Err) {
    if let Some(subscriber) = self.subscriber {
      subscriber.on_error(err);
    }
  }

  fn on_complete(self) {
    // Still holding the subscriber means no value arrived.
    if let Some(subscriber) = self.subscriber {
      subscriber.on_complete();
    }
  }
}

impl<S, F, R> Mono for FlatMap<S, F>
where
  S: Mono,
  F: FnOnce(S::Item) -> R + 'static,
  R: Mono<Err = S::Err>,
{
  type Item = R::Item;
  type Err = S::Err;

  fn actual_subscribe<O>(self, subscriber: O)
  where
    O: Subscriber<R::Item, S::Err> + 'static,
  {
    let FlatMap { source, func } = self;
    source.actual_subscribe(FlatMapSubscriber {
      subscriber: Some(subscriber),
      func: Some(func),
      arbiter: Rc::new(SubscriptionArbiter::default()),
    })
  }
}

/// Forwards the signals of a follow-up mono to a subscriber that was already
/// handed the arbiter, registering the follow-up's subscription with it.
pub(crate) struct ArbitedSubscriber<O> {
  subscriber: O,
  arbiter: Rc<SubscriptionArbiter>,
}

impl<O> ArbitedSubscriber<O> {
  pub(crate) fn new(subscriber: O, arbiter: Rc<SubscriptionArbiter>) -> Self {
    Self { subscriber, arbiter }
  }
}

impl<Item, Err, O> Subscriber<Item, Err> for ArbitedSubscriber<O>
where
  O: Subscriber<Item, Err>,
{
  fn on_subscribe(&mut self, subscription: BoxedSubscription) { self.arbiter.set(subscription) }

  fn on_next(&mut self, value: Item) { self.subscriber.on_next(value) }

  fn on_error(self, err: Err) { self.subscriber.on_error(err) }

  fn on_complete(self) { self.subscriber.on_complete() }
}

#[cfg(test)]
mod tests {
  use std::{cell::Cell, convert::Infallible, rc::Rc};

  use crate::{prelude::*, test_util::Recorder};

  #[rxmono_macro::test]
  fn chains_inner_value() {
    let (recorder, log, _) = Recorder::<i32, Infallible>::unbounded();
    just(2).flat_map(|v| just(v * 10)).subscribe_with(recorder);
    assert_eq!(*log.borrow(), vec!["subscribe", "next(20)", "complete"]);
  }

  #[rxmono_macro::test]
  fn inner_error_reaches_downstream() {
    let (recorder, log, _) = Recorder::<i32, &str>::unbounded();
    just(2)
      .with_err::<&str>()
      .flat_map(|_| error::<i32, _>("inner"))
      .subscribe_with(recorder);
    assert_eq!(*log.borrow(), vec!["subscribe", "error(\"inner\")"]);
  }

  #[rxmono_macro::test]
  fn empty_source_skips_mapper() {
    let called = Rc::new(Cell::new(false));
    let called_clone = called.clone();
    let (recorder, log, _) = Recorder::<i32, Infallible>::unbounded();
    empty::<i32>()
      .flat_map(move |v| {
        called_clone.set(true);
        just(v)
      })
      .subscribe_with(recorder);
    assert!(!called.get());
    assert_eq!(*log.borrow(), vec!["subscribe", "complete"]);
  }

  #[rxmono_macro::test]
  fn late_demand_reaches_inner() {
    let (recorder, log, subscription) = Recorder::<&str, Infallible>::with_request(0);
    just(1).flat_map(|_| just("inner")).subscribe_with(recorder);
    assert_eq!(*log.borrow(), vec!["subscribe"]);

    subscription.borrow().clone().unwrap().request(1);
    assert_eq!(*log.borrow(), vec!["subscribe", "next(\"inner\")", "complete"]);
  }

  #[rxmono_macro::test]
  fn cancel_reaches_inner() {
    let inner_cancelled = Rc::new(Cell::new(false));
    let flag = inner_cancelled.clone();
    let (recorder, log, subscription) = Recorder::<i32, Infallible>::unbounded();
    just(1)
      .flat_map(move |_| never::<i32>().do_on_cancel(move || flag.set(true)))
      .subscribe_with(recorder);

    subscription.borrow().clone().unwrap().cancel();
    assert!(inner_cancelled.get());
    assert_eq!(*log.borrow(), vec!["subscribe"]);
  }
}
