use std::rc::Rc;

use crate::{
  mono::{Just, Mono},
  ops::flat_map::ArbitedSubscriber,
  subscriber::Subscriber,
  subscription::{BoxedSubscription, SubscriptionArbiter},
};

// ==================== OnErrorResume ====================

/// Replaces an error with the fallback mono built from it.
///
/// Downstream keeps the subscription it was given first; demand already
/// requested is replayed onto the fallback. The fallback may change the
/// error type.
#[derive(Clone)]
pub struct OnErrorResume<S, F> {
  pub source: S,
  pub func: F,
}

impl<S, F> OnErrorResume<S, F> {
  pub fn new(source: S, func: F) -> Self { Self { source, func } }
}

pub struct OnErrorResumeSubscriber<O, F> {
  subscriber: O,
  func: F,
  arbiter: Rc<SubscriptionArbiter>,
}

impl<Item, Err, O, F, R> Subscriber<Item, Err> for OnErrorResumeSubscriber<O, F>
where
  O: Subscriber<Item, R::Err> + 'static,
  F: FnOnce(Err) -> R,
  R: Mono<Item = Item>,
{
  fn on_subscribe(&mut self, subscription: BoxedSubscription) {
    self.arbiter.set(subscription);
    self
      .subscriber
      .on_subscribe(BoxedSubscription::from_rc(self.arbiter.clone()));
  }

  fn on_next(&mut self, value: Item) { self.subscriber.on_next(value) }

  fn on_error(self, err: Err) {
    tracing::debug!("resuming with fallback mono after error");
    let OnErrorResumeSubscriber { subscriber, func, arbiter } = self;
    func(err).actual_subscribe(ArbitedSubscriber::new(subscriber, arbiter));
  }

  fn on_complete(self) { self.subscriber.on_complete() }
}

impl<S, F, R> Mono for OnErrorResume<S, F>
where
  S: Mono,
  F: FnOnce(S::Err) -> R + 'static,
  R: Mono<Item = S::Item>,
{
  type Item = S::Item;
  type Err = R::Err;

  fn actual_subscribe<O>(self, subscriber: O)
  where
    O: Subscriber<S::Item, R::Err> + 'static,
  {
    let OnErrorResume { source, func } = self;
    source.actual_subscribe(OnErrorResumeSubscriber {
      subscriber,
      func,
      arbiter: Rc::new(SubscriptionArbiter::default()),
    })
  }
}

// ==================== OnErrorReturn ====================

/// Replaces an error with a fixed value followed by completion.
#[derive(Clone)]
pub struct OnErrorReturn<S, Item> {
  pub source: S,
  pub value: Item,
}

impl<S, Item> OnErrorReturn<S, Item> {
  pub fn new(source: S, value: Item) -> Self { Self { source, value } }
}

impl<S, Item> Mono for OnErrorReturn<S, Item>
where
  S: Mono<Item = Item>,
  Item: 'static,
  S::Err: 'static,
{
  type Item = Item;
  type Err = S::Err;

  fn actual_subscribe<O>(self, subscriber: O)
  where
    O: Subscriber<Item, S::Err> + 'static,
  {
    let OnErrorReturn { source, value } = self;
    OnErrorResume::new(source, move |_: S::Err| Just::<Item, S::Err>::new(value))
      .actual_subscribe(subscriber)
  }
}

#[cfg(test)]
mod tests {
  use std::{cell::Cell, convert::Infallible, rc::Rc};

  use crate::{prelude::*, test_util::Recorder};

  #[rxmono_macro::test]
  fn error_returns_fallback_value() {
    let (recorder, log, _) = Recorder::<&str, &str>::unbounded();
    error::<&str, _>("boom")
      .on_error_return("EMPTY")
      .subscribe_with(recorder);
    assert_eq!(*log.borrow(), vec!["subscribe", "next(\"EMPTY\")", "complete"]);
  }

  #[rxmono_macro::test]
  fn value_skips_fallback() {
    let (recorder, log, _) = Recorder::<i32, String>::unbounded();
    just(1)
      .with_err::<String>()
      .on_error_return(0)
      .subscribe_with(recorder);
    assert_eq!(*log.borrow(), vec!["subscribe", "next(1)", "complete"]);
  }

  #[rxmono_macro::test]
  fn resume_sees_error_and_may_change_type() {
    let (recorder, log, _) = Recorder::<usize, Infallible>::unbounded();
    error::<usize, _>("four")
      .on_error_resume(|e: &str| just(e.len()))
      .subscribe_with(recorder);
    assert_eq!(*log.borrow(), vec!["subscribe", "next(4)", "complete"]);
  }

  #[rxmono_macro::test]
  fn fallback_error_reaches_downstream() {
    let (recorder, log, _) = Recorder::<i32, String>::unbounded();
    error::<i32, _>("first")
      .on_error_resume(|e| error::<i32, _>(format!("{e} then second")))
      .subscribe_with(recorder);
    assert_eq!(*log.borrow(), vec!["subscribe", "error(\"first then second\")"]);
  }

  #[rxmono_macro::test]
  fn subscribed_once_and_demand_replayed() {
    let (recorder, log, subscription) = Recorder::<i32, &str>::with_request(0);
    error::<i32, _>("boom")
      .on_error_return(7)
      .subscribe_with(recorder);
    assert_eq!(*log.borrow(), vec!["subscribe"]);

    subscription.borrow().clone().unwrap().request(1);
    assert_eq!(*log.borrow(), vec!["subscribe", "next(7)", "complete"]);
  }

  #[rxmono_macro::test]
  fn cancel_before_error_skips_fallback() {
    let built = Rc::new(Cell::new(false));
    let built_clone = built.clone();
    let (recorder, _, subscription) = Recorder::<i32, Infallible>::with_request(0);
    never::<i32>()
      .with_err::<&str>()
      .on_error_resume(move |_| {
        built_clone.set(true);
        just(0)
      })
      .subscribe_with(recorder);

    let subscription = subscription.borrow().clone().unwrap();
    subscription.cancel();
    assert!(subscription.is_cancelled());
    assert!(!built.get());
  }
}
