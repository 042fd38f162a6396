use std::rc::Rc;

use crate::{
  mono::Mono,
  ops::flat_map::ArbitedSubscriber,
  subscriber::Subscriber,
  subscription::{BoxedSubscription, SubscriptionArbiter},
};

/// Falls back to another mono when the source completes without a value.
#[derive(Clone)]
pub struct SwitchIfEmpty<S, A> {
  pub source: S,
  pub alternative: A,
}

impl<S, A> SwitchIfEmpty<S, A> {
  pub fn new(source: S, alternative: A) -> Self { Self { source, alternative } }
}

pub struct SwitchIfEmptySubscriber<O, A> {
  subscriber: O,
  alternative: A,
  arbiter: Rc<SubscriptionArbiter>,
  has_value: bool,
}

impl<Item, Err, O, A> Subscriber<Item, Err> for SwitchIfEmptySubscriber<O, A>
where
  O: Subscriber<Item, Err> + 'static,
  A: Mono<Item = Item, Err = Err>,
{
  fn on_subscribe(&mut self, subscription: BoxedSubscription) {
    self.arbiter.set(subscription);
    self
      .subscriber
      .on_subscribe(BoxedSubscription::from_rc(self.arbiter.clone()));
  }

  fn on_next(&mut self, value: Item) {
    self.has_value = true;
    self.subscriber.on_next(value);
  }

  fn on_error(self, err: Err) { self.subscriber.on_error(err) }

  fn on_complete(self) {
    if self.has_value {
      self.subscriber.on_complete();
    } else {
      self
        .alternative
        .actual_subscribe(ArbitedSubscriber::new(self.subscriber, self.arbiter));
    }
  }
}

impl<S, A> Mono for SwitchIfEmpty<S, A>
where
  S: Mono,
  A: Mono<Item = S::Item, Err = S::Err> + 'static,
{
  type Item = S::Item;
  type Err = S::Err;

  fn actual_subscribe<O>(self, subscriber: O)
  where
    O: Subscriber<S::Item, S::Err> + 'static,
  {
    let SwitchIfEmpty { source, alternative } = self;
    source.actual_subscribe(SwitchIfEmptySubscriber {
      subscriber,
      alternative,
      arbiter: Rc::new(SubscriptionArbiter::default()),
      has_value: false,
    })
  }
}

#[cfg(test)]
mod tests {
  use std::convert::Infallible;

  use crate::{prelude::*, test_util::Recorder};

  #[rxmono_macro::test]
  fn empty_switches_to_alternative() {
    let (recorder, log, _) = Recorder::<i32, Infallible>::unbounded();
    empty::<i32>().switch_if_empty(just(9)).subscribe_with(recorder);
    assert_eq!(*log.borrow(), vec!["subscribe", "next(9)", "complete"]);
  }

  #[rxmono_macro::test]
  fn value_keeps_alternative_unsubscribed() {
    let (recorder, log, _) = Recorder::<i32, Infallible>::unbounded();
    just(1)
      .switch_if_empty(defer(|| -> Just<i32, Infallible> { panic!("alternative subscribed") }))
      .subscribe_with(recorder);
    assert_eq!(*log.borrow(), vec!["subscribe", "next(1)", "complete"]);
  }

  #[rxmono_macro::test]
  fn default_if_empty_supplies_value() {
    let (recorder, log, _) = Recorder::<&str, Infallible>::unbounded();
    just_or_empty::<&str>(None).default_if_empty("fallback").subscribe_with(recorder);
    assert_eq!(*log.borrow(), vec!["subscribe", "next(\"fallback\")", "complete"]);
  }

  #[rxmono_macro::test]
  fn error_is_not_empty() {
    let (recorder, log, _) = Recorder::<i32, &str>::unbounded();
    error::<i32, _>("bad").default_if_empty(0).subscribe_with(recorder);
    assert_eq!(*log.borrow(), vec!["subscribe", "error(\"bad\")"]);
  }

  #[rxmono_macro::test]
  fn demand_waits_across_switch() {
    let (recorder, log, subscription) = Recorder::<i32, Infallible>::with_request(0);
    empty::<i32>().default_if_empty(5).subscribe_with(recorder);
    assert_eq!(*log.borrow(), vec!["subscribe"]);

    subscription.borrow().clone().unwrap().request(1);
    assert_eq!(*log.borrow(), vec!["subscribe", "next(5)", "complete"]);
  }
}
