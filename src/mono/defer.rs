use crate::{mono::Mono, subscriber::Subscriber};

/// Builds the actual mono only when subscribed, once per subscription.
///
/// This struct is created by [`defer`](crate::factory::defer).
#[derive(Clone)]
pub struct Defer<F>(F);

impl<F> Defer<F> {
  pub fn new(f: F) -> Self { Self(f) }
}

impl<F, R> Mono for Defer<F>
where
  F: FnOnce() -> R,
  R: Mono,
{
  type Item = R::Item;
  type Err = R::Err;

  fn actual_subscribe<O>(self, subscriber: O)
  where
    O: Subscriber<R::Item, R::Err> + 'static,
  {
    (self.0)().actual_subscribe(subscriber)
  }
}
