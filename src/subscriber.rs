//! Subscriber trait and implementations
//!
//! The Subscriber is the consumer side of a mono. It receives the
//! subscription first, then at most one value, then exactly one terminal
//! signal (completion or error) unless the subscription was cancelled.

use std::fmt::Debug;

use crate::{
  hooks,
  subscription::{BoxedSubscription, Subscription, UNBOUNDED},
};

// ============================================================================
// Subscriber Trait
// ============================================================================

/// Subscriber trait: The consumer of a mono.
///
/// The terminal methods consume the subscriber, so nothing can be delivered
/// to it after `on_error` or `on_complete`.
pub trait Subscriber<Item, Err> {
  /// Receive the subscription. Always the first signal, delivered once.
  fn on_subscribe(&mut self, subscription: BoxedSubscription);

  /// Receive the value. Only delivered after demand was requested.
  fn on_next(&mut self, value: Item);

  /// Handle an error from the mono.
  fn on_error(self, err: Err);

  /// Handle completion, with or without a preceding value.
  fn on_complete(self);
}

// ============================================================================
// DynSubscriber Trait - Object-safe Subscriber
// ============================================================================

/// Helper trait to enable object-safe Subscribers (`Box<dyn Subscriber>`).
///
/// `Subscriber` is not object-safe because its terminal methods take `self`
/// by value. `DynSubscriber` mirrors the interface with boxed receivers.
pub trait DynSubscriber<Item, Err> {
  fn box_on_subscribe(&mut self, subscription: BoxedSubscription);
  fn box_on_next(&mut self, value: Item);
  fn box_on_error(self: Box<Self>, err: Err);
  fn box_on_complete(self: Box<Self>);
}

impl<T, Item, Err> DynSubscriber<Item, Err> for T
where
  T: Subscriber<Item, Err>,
{
  fn box_on_subscribe(&mut self, subscription: BoxedSubscription) {
    self.on_subscribe(subscription)
  }
  fn box_on_next(&mut self, value: Item) { self.on_next(value) }
  fn box_on_error(self: Box<Self>, err: Err) { self.on_error(err) }
  fn box_on_complete(self: Box<Self>) { self.on_complete() }
}

/// Boxed subscriber, as taken by [`BoxedMono`](crate::mono::boxed::BoxedMono).
pub type BoxedSubscriber<Item, Err> = Box<dyn DynSubscriber<Item, Err>>;

impl<Item, Err> Subscriber<Item, Err> for BoxedSubscriber<Item, Err> {
  #[inline]
  fn on_subscribe(&mut self, subscription: BoxedSubscription) {
    (**self).box_on_subscribe(subscription)
  }

  #[inline]
  fn on_next(&mut self, value: Item) { (**self).box_on_next(value) }

  #[inline]
  fn on_error(self, err: Err) { self.box_on_error(err) }

  #[inline]
  fn on_complete(self) { self.box_on_complete() }
}

// ============================================================================
// LambdaSubscriber - closure slots
// ============================================================================

/// Subscriber assembled from up to four optional closures.
///
/// Missing slots default to no-ops with two exceptions:
/// - without an `on_subscribe` slot the subscriber requests [`UNBOUNDED`]
///   demand itself; with one, the closure owns the subscription and must
///   call `request` for the value to flow.
/// - without an `on_error` slot the error is reported through
///   [`hooks::error_dropped`] instead of being swallowed.
pub struct LambdaSubscriber<Item, Err> {
  on_next: Option<Box<dyn FnMut(Item)>>,
  on_error: Option<Box<dyn FnOnce(Err)>>,
  on_complete: Option<Box<dyn FnOnce()>>,
  on_subscribe: Option<Box<dyn FnOnce(BoxedSubscription)>>,
}

impl<Item, Err> Default for LambdaSubscriber<Item, Err> {
  fn default() -> Self {
    Self { on_next: None, on_error: None, on_complete: None, on_subscribe: None }
  }
}

impl<Item, Err> LambdaSubscriber<Item, Err> {
  pub fn new() -> Self { Self::default() }

  pub fn with_next(mut self, f: impl FnMut(Item) + 'static) -> Self {
    self.on_next = Some(Box::new(f));
    self
  }

  pub fn with_error(mut self, f: impl FnOnce(Err) + 'static) -> Self {
    self.on_error = Some(Box::new(f));
    self
  }

  pub fn with_complete(mut self, f: impl FnOnce() + 'static) -> Self {
    self.on_complete = Some(Box::new(f));
    self
  }

  pub fn with_subscription(mut self, f: impl FnOnce(BoxedSubscription) + 'static) -> Self {
    self.on_subscribe = Some(Box::new(f));
    self
  }
}

impl<Item, Err: Debug> Subscriber<Item, Err> for LambdaSubscriber<Item, Err> {
  fn on_subscribe(&mut self, subscription: BoxedSubscription) {
    match self.on_subscribe.take() {
      Some(f) => f(subscription),
      None => subscription.request(UNBOUNDED),
    }
  }

  fn on_next(&mut self, value: Item) {
    if let Some(f) = self.on_next.as_mut() {
      f(value);
    }
  }

  fn on_error(self, err: Err) {
    match self.on_error {
      Some(f) => f(err),
      None => hooks::error_dropped(&err),
    }
  }

  fn on_complete(self) {
    if let Some(f) = self.on_complete {
      f();
    }
  }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use super::*;
  use crate::subscription::CancelFlag;

  #[rxmono_macro::test]
  fn lambda_requests_unbounded_without_subscribe_slot() {
    struct Recorder(Rc<RefCell<Vec<usize>>>);
    impl Subscription for Recorder {
      fn request(&self, n: usize) { self.0.borrow_mut().push(n) }
      fn cancel(&self) {}
      fn is_cancelled(&self) -> bool { false }
    }

    let requests = Rc::new(RefCell::new(vec![]));
    let mut subscriber = LambdaSubscriber::<i32, ()>::new();
    subscriber.on_subscribe(BoxedSubscription::new(Recorder(requests.clone())));
    assert_eq!(*requests.borrow(), vec![UNBOUNDED]);
  }

  #[rxmono_macro::test]
  fn lambda_hands_subscription_to_slot() {
    let seen = Rc::new(RefCell::new(None));
    let seen_clone = seen.clone();
    let mut subscriber = LambdaSubscriber::<i32, ()>::new()
      .with_subscription(move |s| *seen_clone.borrow_mut() = Some(s));

    subscriber.on_subscribe(BoxedSubscription::new(CancelFlag::default()));
    assert!(seen.borrow().is_some());
  }

  #[rxmono_macro::test]
  fn lambda_slots_receive_signals() {
    let log = Rc::new(RefCell::new(vec![]));
    let (l1, l2) = (log.clone(), log.clone());
    let mut subscriber = LambdaSubscriber::<i32, ()>::new()
      .with_next(move |v| l1.borrow_mut().push(format!("next {v}")))
      .with_complete(move || l2.borrow_mut().push("complete".to_string()));

    subscriber.on_next(7);
    subscriber.on_complete();
    assert_eq!(*log.borrow(), vec!["next 7", "complete"]);
  }

  #[rxmono_macro::test]
  fn boxed_subscriber_forwards() {
    let log = Rc::new(RefCell::new(vec![]));
    let l1 = log.clone();
    let mut boxed: BoxedSubscriber<i32, &str> = Box::new(
      LambdaSubscriber::new().with_error(move |e: &str| l1.borrow_mut().push(e.to_string())),
    );
    boxed.on_next(1);
    boxed.on_error("boom");
    assert_eq!(*log.borrow(), vec!["boom"]);
  }
}
