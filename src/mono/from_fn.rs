use crate::{mono::Mono, mono::MonoSink, subscriber::Subscriber};

/// Mono computed by a closure returning `Result<Option<Item>, Err>`.
///
/// This struct is created by [`from_fn`](crate::factory::from_fn). The
/// closure is skipped when the subscription is cancelled during
/// `on_subscribe`.
#[derive(Clone)]
pub struct FromFn<F>(F);

impl<F> FromFn<F> {
  pub fn new(f: F) -> Self { Self(f) }
}

impl<F, Item, Err> Mono for FromFn<F>
where
  F: FnOnce() -> Result<Option<Item>, Err>,
  Item: 'static,
  Err: 'static,
{
  type Item = Item;
  type Err = Err;

  fn actual_subscribe<O>(self, subscriber: O)
  where
    O: Subscriber<Item, Err> + 'static,
  {
    let sink = MonoSink::attach(subscriber);
    if sink.is_cancelled() {
      return;
    }
    match (self.0)() {
      Ok(Some(value)) => sink.success(value),
      Ok(None) => sink.empty(),
      Err(err) => sink.error(err),
    }
  }
}

#[cfg(test)]
mod tests {
  use std::{cell::Cell, rc::Rc};

  use crate::{prelude::*, test_util::Recorder};

  #[rxmono_macro::test]
  fn outcomes_map_to_signals() {
    let (recorder, log, _) = Recorder::<i32, String>::unbounded();
    from_fn(|| Ok(Some(1))).subscribe_with(recorder);
    assert_eq!(*log.borrow(), vec!["subscribe", "next(1)", "complete"]);

    let (recorder, log, _) = Recorder::<i32, String>::unbounded();
    from_fn(|| Ok(None)).subscribe_with(recorder);
    assert_eq!(*log.borrow(), vec!["subscribe", "complete"]);

    let (recorder, log, _) = Recorder::<i32, String>::unbounded();
    from_fn(|| Err("nope".to_string())).subscribe_with(recorder);
    assert_eq!(*log.borrow(), vec!["subscribe", "error(\"nope\")"]);
  }

  #[rxmono_macro::test]
  fn cancelled_subscription_skips_the_call() {
    let called = Rc::new(Cell::new(false));
    let called_clone = called.clone();
    let (recorder, _, _) = Recorder::<i32, String>::with_request(0);

    from_fn(move || {
      called_clone.set(true);
      Ok(Some(1))
    })
    .do_on_subscribe(|s| s.cancel())
    .subscribe_with(recorder);

    assert!(!called.get());
  }
}
