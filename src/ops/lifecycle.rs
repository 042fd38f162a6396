//! Lifecycle operators: side effects on every kind of signal.
//!
//! Hooks observe a signal and run before it is forwarded, except
//! [`DoFinally`], which runs once the subscription has ended.

use std::{cell::Cell, rc::Rc};

use crate::{
  mono::Mono,
  signal::SignalType,
  subscriber::Subscriber,
  subscription::{BoxedSubscription, Subscription},
};

/// Declares the operator struct, its constructor and a `Mono` impl that
/// wraps the downstream subscriber with `$subscriber`.
macro_rules! lifecycle_op {
  ($(#[$meta:meta])* $name:ident, $subscriber:ident, $($bound:tt)+) => {
    $(#[$meta])*
    #[derive(Clone)]
    pub struct $name<S, F> {
      pub source: S,
      pub func: F,
    }

    impl<S, F> $name<S, F> {
      pub fn new(source: S, func: F) -> Self { Self { source, func } }
    }

    impl<S, F> Mono for $name<S, F>
    where
      S: Mono,
      F: $($bound)+ + 'static,
    {
      type Item = S::Item;
      type Err = S::Err;

      fn actual_subscribe<O>(self, subscriber: O)
      where
        O: Subscriber<S::Item, S::Err> + 'static,
      {
        let $name { source, func } = self;
        source.actual_subscribe($subscriber::new(subscriber, func))
      }
    }
  };
}

// ==================== DoOnSubscribe ====================

lifecycle_op!(
  /// Runs a callback with the subscription before downstream receives it.
  DoOnSubscribe,
  DoOnSubscribeSubscriber,
  FnOnce(&BoxedSubscription)
);

pub struct DoOnSubscribeSubscriber<O, F> {
  subscriber: O,
  func: Option<F>,
}

impl<O, F> DoOnSubscribeSubscriber<O, F> {
  fn new(subscriber: O, func: F) -> Self { Self { subscriber, func: Some(func) } }
}

impl<Item, Err, O, F> Subscriber<Item, Err> for DoOnSubscribeSubscriber<O, F>
where
  O: Subscriber<Item, Err>,
  F: FnOnce(&BoxedSubscription),
{
  fn on_subscribe(&mut self, subscription: BoxedSubscription) {
    if let Some(func) = self.func.take() {
      func(&subscription);
    }
    self.subscriber.on_subscribe(subscription)
  }

  fn on_next(&mut self, value: Item) { self.subscriber.on_next(value) }

  fn on_error(self, err: Err) { self.subscriber.on_error(err) }

  fn on_complete(self) { self.subscriber.on_complete() }
}

// ==================== DoOnRequest ====================

lifecycle_op!(
  /// Runs a callback with every demand downstream signals.
  DoOnRequest,
  DoOnRequestSubscriber,
  Fn(usize)
);

pub struct DoOnRequestSubscriber<O, F> {
  subscriber: O,
  func: Option<F>,
}

impl<O, F> DoOnRequestSubscriber<O, F> {
  fn new(subscriber: O, func: F) -> Self { Self { subscriber, func: Some(func) } }
}

struct RequestHook<F> {
  inner: BoxedSubscription,
  func: F,
}

impl<F: Fn(usize)> Subscription for RequestHook<F> {
  fn request(&self, n: usize) {
    (self.func)(n);
    self.inner.request(n)
  }

  fn cancel(&self) { self.inner.cancel() }

  fn is_cancelled(&self) -> bool { self.inner.is_cancelled() }
}

impl<Item, Err, O, F> Subscriber<Item, Err> for DoOnRequestSubscriber<O, F>
where
  O: Subscriber<Item, Err>,
  F: Fn(usize) + 'static,
{
  fn on_subscribe(&mut self, subscription: BoxedSubscription) {
    let subscription = match self.func.take() {
      Some(func) => BoxedSubscription::new(RequestHook { inner: subscription, func }),
      None => subscription,
    };
    self.subscriber.on_subscribe(subscription)
  }

  fn on_next(&mut self, value: Item) { self.subscriber.on_next(value) }

  fn on_error(self, err: Err) { self.subscriber.on_error(err) }

  fn on_complete(self) { self.subscriber.on_complete() }
}

// ==================== DoOnCancel ====================

lifecycle_op!(
  /// Runs a callback the first time downstream cancels.
  DoOnCancel,
  DoOnCancelSubscriber,
  FnOnce()
);

pub struct DoOnCancelSubscriber<O, F> {
  subscriber: O,
  func: Option<F>,
}

impl<O, F> DoOnCancelSubscriber<O, F> {
  fn new(subscriber: O, func: F) -> Self { Self { subscriber, func: Some(func) } }
}

struct CancelHook<F> {
  inner: BoxedSubscription,
  func: Cell<Option<F>>,
}

impl<F: FnOnce()> Subscription for CancelHook<F> {
  fn request(&self, n: usize) { self.inner.request(n) }

  fn cancel(&self) {
    if let Some(func) = self.func.take() {
      func();
    }
    self.inner.cancel()
  }

  fn is_cancelled(&self) -> bool { self.inner.is_cancelled() }
}

impl<Item, Err, O, F> Subscriber<Item, Err> for DoOnCancelSubscriber<O, F>
where
  O: Subscriber<Item, Err>,
  F: FnOnce() + 'static,
{
  fn on_subscribe(&mut self, subscription: BoxedSubscription) {
    let subscription = match self.func.take() {
      Some(func) => {
        BoxedSubscription::new(CancelHook { inner: subscription, func: Cell::new(Some(func)) })
      }
      None => subscription,
    };
    self.subscriber.on_subscribe(subscription)
  }

  fn on_next(&mut self, value: Item) { self.subscriber.on_next(value) }

  fn on_error(self, err: Err) { self.subscriber.on_error(err) }

  fn on_complete(self) { self.subscriber.on_complete() }
}

// ==================== DoOnNext ====================

lifecycle_op!(
  /// Runs a callback with the value before it is emitted.
  DoOnNext,
  DoOnNextSubscriber,
  FnOnce(&S::Item)
);

pub struct DoOnNextSubscriber<O, F> {
  subscriber: O,
  func: Option<F>,
}

impl<O, F> DoOnNextSubscriber<O, F> {
  fn new(subscriber: O, func: F) -> Self { Self { subscriber, func: Some(func) } }
}

impl<Item, Err, O, F> Subscriber<Item, Err> for DoOnNextSubscriber<O, F>
where
  O: Subscriber<Item, Err>,
  F: FnOnce(&Item),
{
  fn on_subscribe(&mut self, subscription: BoxedSubscription) {
    self.subscriber.on_subscribe(subscription)
  }

  fn on_next(&mut self, value: Item) {
    if let Some(func) = self.func.take() {
      func(&value);
    }
    self.subscriber.on_next(value)
  }

  fn on_error(self, err: Err) { self.subscriber.on_error(err) }

  fn on_complete(self) { self.subscriber.on_complete() }
}

// ==================== DoOnSuccess ====================

lifecycle_op!(
  /// Runs a callback on successful termination, with the value if there is
  /// one.
  DoOnSuccess,
  DoOnSuccessSubscriber,
  FnOnce(Option<&S::Item>)
);

pub struct DoOnSuccessSubscriber<O, F> {
  subscriber: O,
  func: Option<F>,
}

impl<O, F> DoOnSuccessSubscriber<O, F> {
  fn new(subscriber: O, func: F) -> Self { Self { subscriber, func: Some(func) } }
}

impl<Item, Err, O, F> Subscriber<Item, Err> for DoOnSuccessSubscriber<O, F>
where
  O: Subscriber<Item, Err>,
  F: FnOnce(Option<&Item>),
{
  fn on_subscribe(&mut self, subscription: BoxedSubscription) {
    self.subscriber.on_subscribe(subscription)
  }

  fn on_next(&mut self, value: Item) {
    if let Some(func) = self.func.take() {
      func(Some(&value));
    }
    self.subscriber.on_next(value)
  }

  fn on_error(self, err: Err) { self.subscriber.on_error(err) }

  fn on_complete(self) {
    // Not consumed by a value: empty completion.
    if let Some(func) = self.func {
      func(None);
    }
    self.subscriber.on_complete()
  }
}

// ==================== DoOnError ====================

lifecycle_op!(
  /// Runs a callback with the error before it is delivered.
  DoOnError,
  DoOnErrorSubscriber,
  FnOnce(&S::Err)
);

pub struct DoOnErrorSubscriber<O, F> {
  subscriber: O,
  func: F,
}

impl<O, F> DoOnErrorSubscriber<O, F> {
  fn new(subscriber: O, func: F) -> Self { Self { subscriber, func } }
}

impl<Item, Err, O, F> Subscriber<Item, Err> for DoOnErrorSubscriber<O, F>
where
  O: Subscriber<Item, Err>,
  F: FnOnce(&Err),
{
  fn on_subscribe(&mut self, subscription: BoxedSubscription) {
    self.subscriber.on_subscribe(subscription)
  }

  fn on_next(&mut self, value: Item) { self.subscriber.on_next(value) }

  fn on_error(self, err: Err) {
    (self.func)(&err);
    self.subscriber.on_error(err)
  }

  fn on_complete(self) { self.subscriber.on_complete() }
}

// ==================== DoFinally ====================

lifecycle_op!(
  /// Runs a callback once the subscription has ended, after the terminal
  /// signal reached downstream or after cancellation reached upstream.
  DoFinally,
  DoFinallySubscriber,
  FnOnce(SignalType)
);

type FinallyFn<F> = Rc<Cell<Option<F>>>;

fn run_finally<F: FnOnce(SignalType)>(func: &FinallyFn<F>, signal: SignalType) {
  if let Some(func) = func.take() {
    func(signal);
  }
}

pub struct DoFinallySubscriber<O, F> {
  subscriber: O,
  func: FinallyFn<F>,
}

impl<O, F> DoFinallySubscriber<O, F> {
  fn new(subscriber: O, func: F) -> Self {
    Self { subscriber, func: Rc::new(Cell::new(Some(func))) }
  }
}

struct FinallySubscription<F> {
  inner: BoxedSubscription,
  func: FinallyFn<F>,
}

impl<F: FnOnce(SignalType)> Subscription for FinallySubscription<F> {
  fn request(&self, n: usize) { self.inner.request(n) }

  fn cancel(&self) {
    self.inner.cancel();
    run_finally(&self.func, SignalType::Cancel);
  }

  fn is_cancelled(&self) -> bool { self.inner.is_cancelled() }
}

impl<Item, Err, O, F> Subscriber<Item, Err> for DoFinallySubscriber<O, F>
where
  O: Subscriber<Item, Err>,
  F: FnOnce(SignalType) + 'static,
{
  fn on_subscribe(&mut self, subscription: BoxedSubscription) {
    let subscription =
      BoxedSubscription::new(FinallySubscription { inner: subscription, func: self.func.clone() });
    self.subscriber.on_subscribe(subscription)
  }

  fn on_next(&mut self, value: Item) { self.subscriber.on_next(value) }

  fn on_error(self, err: Err) {
    self.subscriber.on_error(err);
    run_finally(&self.func, SignalType::OnError);
  }

  fn on_complete(self) {
    self.subscriber.on_complete();
    run_finally(&self.func, SignalType::OnComplete);
  }
}
