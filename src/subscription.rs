//! Subscription: the per-activation contract between a mono and its
//! subscriber.
//!
//! A subscription is created for every `subscribe` call and handed to the
//! subscriber through `on_subscribe`. The subscriber uses it to signal demand
//! (`request`) or to stop the activation (`cancel`).

use std::{
  cell::{Cell, RefCell},
  fmt::{Debug, Formatter},
  rc::Rc,
};

/// Demand that unlocks every value a publisher can emit.
pub const UNBOUNDED: usize = usize::MAX;

/// The per-subscription control handle.
///
/// All methods take `&self`: the handle is shared between the subscriber and
/// the producer, and may be called re-entrantly from inside a signal.
pub trait Subscription {
  /// Signal demand for `n` values. A mono emits at most one value, so any
  /// `n >= 1` is a full request. `n == 0` is a protocol violation and is
  /// ignored.
  fn request(&self, n: usize);

  /// Stop the activation. No signal is delivered after this returns.
  fn cancel(&self);

  /// True once the activation was cancelled. Sources also report a
  /// terminated activation as cancelled.
  fn is_cancelled(&self) -> bool;
}

/// Type-erased, cheaply clonable subscription handle.
#[derive(Clone)]
pub struct BoxedSubscription(Rc<dyn Subscription>);

impl BoxedSubscription {
  pub fn new(subscription: impl Subscription + 'static) -> Self { Self(Rc::new(subscription)) }

  pub fn from_rc<S: Subscription + 'static>(subscription: Rc<S>) -> Self { Self(subscription) }
}

impl Subscription for BoxedSubscription {
  #[inline]
  fn request(&self, n: usize) { self.0.request(n) }

  #[inline]
  fn cancel(&self) { self.0.cancel() }

  #[inline]
  fn is_cancelled(&self) -> bool { self.0.is_cancelled() }
}

impl Debug for BoxedSubscription {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("BoxedSubscription")
      .field("is_cancelled", &self.is_cancelled())
      .finish()
  }
}

/// A subscription with nothing behind it besides a cancellation flag.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct CancelFlag(Cell<bool>);

#[cfg(test)]
impl Subscription for CancelFlag {
  fn request(&self, n: usize) {
    if n == 0 {
      tracing::warn!("request(0) is not a valid demand, ignored");
    }
  }

  fn cancel(&self) { self.0.set(true) }

  fn is_cancelled(&self) -> bool { self.0.get() }
}

/// Subscription that stands in front of a sequence of upstream
/// subscriptions.
///
/// Operators that switch to another mono (error recovery, empty fallback,
/// flat mapping) hand the arbiter downstream once. Demand and cancellation
/// recorded on it carry over to whichever upstream is current.
#[derive(Default)]
pub(crate) struct SubscriptionArbiter {
  current: RefCell<Option<BoxedSubscription>>,
  requested: Cell<bool>,
  cancelled: Cell<bool>,
}

impl SubscriptionArbiter {
  /// Make `upstream` the current subscription, replaying recorded demand or
  /// cancellation onto it.
  pub(crate) fn set(&self, upstream: BoxedSubscription) {
    if self.cancelled.get() {
      upstream.cancel();
      return;
    }
    self.current.replace(Some(upstream.clone()));
    if self.requested.get() {
      upstream.request(1);
    }
  }
}

impl Subscription for SubscriptionArbiter {
  fn request(&self, n: usize) {
    if n == 0 {
      tracing::warn!("request(0) is not a valid demand, ignored");
      return;
    }
    self.requested.set(true);
    let current = self.current.borrow().clone();
    if let Some(current) = current {
      current.request(n);
    }
  }

  fn cancel(&self) {
    if self.cancelled.replace(true) {
      return;
    }
    let current = self.current.borrow_mut().take();
    if let Some(current) = current {
      current.cancel();
    }
  }

  fn is_cancelled(&self) -> bool { self.cancelled.get() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Default)]
  struct Probe {
    requested: Cell<usize>,
    cancelled: Cell<bool>,
  }

  impl Subscription for Probe {
    fn request(&self, n: usize) { self.requested.set(self.requested.get() + n) }
    fn cancel(&self) { self.cancelled.set(true) }
    fn is_cancelled(&self) -> bool { self.cancelled.get() }
  }

  #[rxmono_macro::test]
  fn arbiter_replays_demand_on_new_upstream() {
    let arbiter = SubscriptionArbiter::default();
    let first = Rc::new(Probe::default());
    arbiter.set(BoxedSubscription::from_rc(first.clone()));
    arbiter.request(1);
    assert_eq!(first.requested.get(), 1);

    let second = Rc::new(Probe::default());
    arbiter.set(BoxedSubscription::from_rc(second.clone()));
    assert_eq!(second.requested.get(), 1);
    assert!(!second.is_cancelled());
  }

  #[rxmono_macro::test]
  fn arbiter_cancels_late_upstream() {
    let arbiter = SubscriptionArbiter::default();
    arbiter.cancel();
    assert!(arbiter.is_cancelled());

    let late = Rc::new(Probe::default());
    arbiter.set(BoxedSubscription::from_rc(late.clone()));
    assert!(late.is_cancelled());
    assert_eq!(late.requested.get(), 0);
  }

  #[rxmono_macro::test]
  fn arbiter_ignores_zero_request() {
    let arbiter = SubscriptionArbiter::default();
    let upstream = Rc::new(Probe::default());
    arbiter.set(BoxedSubscription::from_rc(upstream.clone()));
    arbiter.request(0);
    assert_eq!(upstream.requested.get(), 0);
  }

  #[rxmono_macro::test]
  fn boxed_subscription_shares_state() {
    let flag = BoxedSubscription::new(CancelFlag::default());
    let other = flag.clone();
    assert!(!other.is_cancelled());
    flag.cancel();
    assert!(other.is_cancelled());
  }
}
