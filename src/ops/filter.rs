use crate::{mono::Mono, subscriber::Subscriber, subscription::BoxedSubscription};

/// Keeps the value if the predicate accepts it. A rejected value turns the
/// mono into an empty one.
#[derive(Clone)]
pub struct Filter<S, F> {
  pub source: S,
  pub func: F,
}

impl<S, F> Filter<S, F> {
  pub fn new(source: S, func: F) -> Self { Self { source, func } }
}

pub struct FilterSubscriber<O, F> {
  subscriber: O,
  func: Option<F>,
}

impl<Item, Err, O, F> Subscriber<Item, Err> for FilterSubscriber<O, F>
where
  O: Subscriber<Item, Err>,
  F: FnOnce(&Item) -> bool,
{
  fn on_subscribe(&mut self, subscription: BoxedSubscription) {
    self.subscriber.on_subscribe(subscription)
  }

  fn on_next(&mut self, value: Item) {
    if let Some(func) = self.func.take() {
      if func(&value) {
        self.subscriber.on_next(value);
      }
    }
  }

  fn on_error(self, err: Err) { self.subscriber.on_error(err) }

  fn on_complete(self) { self.subscriber.on_complete() }
}

impl<S, F> Mono for Filter<S, F>
where
  S: Mono,
  F: FnOnce(&S::Item) -> bool + 'static,
{
  type Item = S::Item;
  type Err = S::Err;

  fn actual_subscribe<O>(self, subscriber: O)
  where
    O: Subscriber<S::Item, S::Err> + 'static,
  {
    let Filter { source, func } = self;
    source.actual_subscribe(FilterSubscriber { subscriber, func: Some(func) })
  }
}

#[cfg(test)]
mod tests {
  use std::convert::Infallible;

  use crate::{prelude::*, test_util::Recorder};

  #[rxmono_macro::test]
  fn accepted_value_passes() {
    let (recorder, log, _) = Recorder::<i32, Infallible>::unbounded();
    just(4).filter(|v| v % 2 == 0).subscribe_with(recorder);
    assert_eq!(*log.borrow(), vec!["subscribe", "next(4)", "complete"]);
  }

  #[rxmono_macro::test]
  fn rejected_value_completes_empty() {
    let (recorder, log, _) = Recorder::<i32, Infallible>::unbounded();
    just(3).filter(|v| v % 2 == 0).subscribe_with(recorder);
    assert_eq!(*log.borrow(), vec!["subscribe", "complete"]);
  }
}
