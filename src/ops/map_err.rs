use std::convert::Infallible;

use crate::{mono::Mono, subscriber::Subscriber, subscription::BoxedSubscription};

/// Transforms the error, leaving value and completion untouched.
#[derive(Clone)]
pub struct MapErr<S, F> {
  pub source: S,
  pub func: F,
}

impl<S, F> MapErr<S, F> {
  pub fn new(source: S, func: F) -> Self { Self { source, func } }
}

/// Turns an impossible error into any error type.
pub fn absurd<E>(never: Infallible) -> E { match never {} }

pub struct MapErrSubscriber<O, F> {
  subscriber: O,
  func: F,
}

impl<Item, Err, E, O, F> Subscriber<Item, Err> for MapErrSubscriber<O, F>
where
  O: Subscriber<Item, E>,
  F: FnOnce(Err) -> E,
{
  fn on_subscribe(&mut self, subscription: BoxedSubscription) {
    self.subscriber.on_subscribe(subscription)
  }

  fn on_next(&mut self, value: Item) { self.subscriber.on_next(value) }

  fn on_error(self, err: Err) { self.subscriber.on_error((self.func)(err)) }

  fn on_complete(self) { self.subscriber.on_complete() }
}

impl<S, F, E> Mono for MapErr<S, F>
where
  S: Mono,
  F: FnOnce(S::Err) -> E + 'static,
{
  type Item = S::Item;
  type Err = E;

  fn actual_subscribe<O>(self, subscriber: O)
  where
    O: Subscriber<S::Item, E> + 'static,
  {
    let MapErr { source, func } = self;
    source.actual_subscribe(MapErrSubscriber { subscriber, func })
  }
}

#[cfg(test)]
mod tests {
  use crate::{prelude::*, test_util::Recorder};

  #[derive(Debug, PartialEq)]
  enum AppError {
    Io(String),
  }

  #[rxmono_macro::test]
  fn map_err_wraps_error() {
    let (recorder, log, _) = Recorder::<i32, AppError>::unbounded();
    error::<i32, _>("disk".to_string())
      .map_err(AppError::Io)
      .subscribe_with(recorder);
    assert_eq!(*log.borrow(), vec!["subscribe", "error(Io(\"disk\"))"]);
  }

  #[rxmono_macro::test]
  fn with_err_keeps_value() {
    let (recorder, log, _) = Recorder::<i32, AppError>::unbounded();
    just(7).with_err::<AppError>().subscribe_with(recorder);
    assert_eq!(*log.borrow(), vec!["subscribe", "next(7)", "complete"]);
  }
}
