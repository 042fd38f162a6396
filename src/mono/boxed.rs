use crate::{
  mono::Mono,
  subscriber::{BoxedSubscriber, Subscriber},
};

/// A mono with its concrete type erased.
///
/// Useful when branches produce different mono types, e.g. the fallback of
/// [`on_error_resume`](Mono::on_error_resume).
pub struct BoxedMono<Item, Err>(Box<dyn FnOnce(BoxedSubscriber<Item, Err>)>);

impl<Item: 'static, Err: 'static> BoxedMono<Item, Err> {
  pub fn new<M>(mono: M) -> Self
  where
    M: Mono<Item = Item, Err = Err> + 'static,
  {
    BoxedMono(Box::new(move |subscriber: BoxedSubscriber<Item, Err>| {
      mono.actual_subscribe(subscriber)
    }))
  }
}

impl<Item, Err> Mono for BoxedMono<Item, Err> {
  type Item = Item;
  type Err = Err;

  fn actual_subscribe<O>(self, subscriber: O)
  where
    O: Subscriber<Item, Err> + 'static,
  {
    (self.0)(Box::new(subscriber))
  }
}
