//! Recording subscriber shared by the unit tests.

use std::{cell::RefCell, fmt::Debug, marker::PhantomData, rc::Rc};

use crate::{
  subscriber::Subscriber,
  subscription::{BoxedSubscription, Subscription, UNBOUNDED},
};

pub(crate) type Log = Rc<RefCell<Vec<String>>>;
pub(crate) type SubscriptionSlot = Rc<RefCell<Option<BoxedSubscription>>>;

/// Writes every signal as a short string: `subscribe`, `next(..)`,
/// `error(..)`, `complete`.
pub(crate) struct Recorder<Item, Err> {
  log: Log,
  subscription: SubscriptionSlot,
  initial_request: usize,
  _p: PhantomData<fn(Item, Err)>,
}

impl<Item, Err> Recorder<Item, Err> {
  pub(crate) fn with_request(initial_request: usize) -> (Self, Log, SubscriptionSlot) {
    let log = Log::default();
    let subscription = SubscriptionSlot::default();
    let recorder = Recorder {
      log: log.clone(),
      subscription: subscription.clone(),
      initial_request,
      _p: PhantomData,
    };
    (recorder, log, subscription)
  }

  pub(crate) fn unbounded() -> (Self, Log, SubscriptionSlot) { Self::with_request(UNBOUNDED) }
}

impl<Item: Debug, Err: Debug> Subscriber<Item, Err> for Recorder<Item, Err> {
  fn on_subscribe(&mut self, subscription: BoxedSubscription) {
    self.log.borrow_mut().push("subscribe".to_string());
    *self.subscription.borrow_mut() = Some(subscription.clone());
    if self.initial_request > 0 {
      subscription.request(self.initial_request);
    }
  }

  fn on_next(&mut self, value: Item) { self.log.borrow_mut().push(format!("next({value:?})")) }

  fn on_error(self, err: Err) { self.log.borrow_mut().push(format!("error({err:?})")) }

  fn on_complete(self) { self.log.borrow_mut().push("complete".to_string()) }
}
