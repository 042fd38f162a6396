//! IntoFuture: await the outcome of a mono.
//!
//! The mono is subscribed when [`MonoFuture`] is created, with unbounded
//! demand. The future resolves with:
//!
//! - `Ok(Ok(Some(value)))` when a value was emitted,
//! - `Ok(Ok(None))` on empty completion,
//! - `Ok(Err(err))` when the mono failed,
//! - `Err(IntoFutureError::Abandoned)` when the subscription ended without
//!   any terminal signal, for example because it was cancelled elsewhere.
//!
//! Dropping the future before it resolves cancels the subscription.
//!
//! ```rust
//! use rxmono::prelude::*;
//!
//! let outcome = futures::executor::block_on(just(4).map(|v| v * 2).into_future());
//! assert_eq!(outcome, Ok(Ok(Some(8))));
//! ```

use std::{
  cell::RefCell,
  future::Future,
  pin::Pin,
  rc::{Rc, Weak},
  task::{Context, Poll},
};

use futures::channel::oneshot;
use pin_project_lite::pin_project;

use crate::{
  mono::Mono,
  subscriber::Subscriber,
  subscription::{BoxedSubscription, Subscription, UNBOUNDED},
};

// ============================================================================
// Error Types
// ============================================================================

/// Reasons a [`MonoFuture`] cannot report an outcome of the mono.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntoFutureError {
  /// The subscription ended without a terminal signal.
  #[error("the mono subscription ended without a terminal signal")]
  Abandoned,
}

/// The output of [`MonoFuture`] and of [`Mono::block`].
pub type IntoFutureResult<T, E> = Result<Result<Option<T>, E>, IntoFutureError>;

type Outcome<Item, Err> = Result<Option<Item>, Err>;
type SubscriptionSlot = Rc<RefCell<Option<BoxedSubscription>>>;

// ============================================================================
// MonoFuture
// ============================================================================

pin_project! {
  /// A future that resolves with the outcome of a mono.
  ///
  /// Created by [`Mono::into_future`].
  pub struct MonoFuture<Item, Err> {
    #[pin]
    receiver: oneshot::Receiver<Outcome<Item, Err>>,
    subscription: SubscriptionSlot,
  }

  impl<Item, Err> PinnedDrop for MonoFuture<Item, Err> {
    fn drop(this: Pin<&mut Self>) {
      let subscription = this.project().subscription.borrow_mut().take();
      if let Some(subscription) = subscription {
        subscription.cancel();
      }
    }
  }
}

impl<Item: 'static, Err: 'static> MonoFuture<Item, Err> {
  pub(crate) fn new<M>(mono: M) -> Self
  where
    M: Mono<Item = Item, Err = Err>,
  {
    let (sender, receiver) = oneshot::channel();
    let subscription = SubscriptionSlot::default();
    mono.actual_subscribe(FutureSubscriber {
      sender,
      slot: Rc::downgrade(&subscription),
      value: None,
    });
    MonoFuture { receiver, subscription }
  }
}

impl<Item, Err> Future for MonoFuture<Item, Err> {
  type Output = IntoFutureResult<Item, Err>;

  fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
    let this = self.project();
    match this.receiver.poll(cx) {
      Poll::Ready(received) => {
        // Terminated: nothing left to cancel on drop.
        this.subscription.borrow_mut().take();
        Poll::Ready(received.map_err(|_| IntoFutureError::Abandoned))
      }
      Poll::Pending => Poll::Pending,
    }
  }
}

// ============================================================================
// FutureSubscriber
// ============================================================================

/// Hands the outcome to the future through a oneshot channel. Dropping it
/// without a terminal signal resolves the future as abandoned.
struct FutureSubscriber<Item, Err> {
  sender: oneshot::Sender<Outcome<Item, Err>>,
  /// Weak, so the subscriber holds no strong handle on its own subscription.
  slot: Weak<RefCell<Option<BoxedSubscription>>>,
  value: Option<Item>,
}

impl<Item, Err> FutureSubscriber<Item, Err> {
  /// The subscription is over; dropping the future must not cancel it.
  fn release(&self) {
    if let Some(slot) = self.slot.upgrade() {
      slot.borrow_mut().take();
    }
  }
}

impl<Item, Err> Subscriber<Item, Err> for FutureSubscriber<Item, Err> {
  fn on_subscribe(&mut self, subscription: BoxedSubscription) {
    if let Some(slot) = self.slot.upgrade() {
      *slot.borrow_mut() = Some(subscription.clone());
    }
    subscription.request(UNBOUNDED);
  }

  fn on_next(&mut self, value: Item) { self.value = Some(value); }

  fn on_error(self, err: Err) {
    self.release();
    if self.sender.send(Err(err)).is_err() {
      tracing::debug!("mono future dropped before the error arrived");
    }
  }

  fn on_complete(self) {
    self.release();
    if self.sender.send(Ok(self.value)).is_err() {
      tracing::debug!("mono future dropped before completion");
    }
  }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
  use std::{cell::Cell, rc::Rc};

  use futures::task::noop_waker;

  use super::*;
  use crate::prelude::*;

  #[rxmono_macro::test]
  async fn resolves_with_value() {
    let value = just(42).into_future().await;
    assert_eq!(value, Ok(Ok(Some(42))));
  }

  #[rxmono_macro::test]
  async fn resolves_empty_as_none() {
    let value = empty::<i32>().into_future().await;
    assert_eq!(value, Ok(Ok(None)));
  }

  #[rxmono_macro::test]
  async fn resolves_with_error() {
    let value = error::<i32, _>("test error".to_string()).into_future().await;
    assert_eq!(value, Ok(Err("test error".to_string())));
  }

  #[rxmono_macro::test]
  async fn resolves_through_operators() {
    let value = just(4)
      .map(|x| format!("Number {x}"))
      .into_future()
      .await;
    assert_eq!(value, Ok(Ok(Some("Number 4".to_string()))));
  }

  #[rxmono_macro::test]
  fn pending_until_sink_resolves() {
    let stored = Rc::new(RefCell::new(None));
    let stored_clone = stored.clone();
    let mut fut = create(move |sink: MonoSink<i32, String>| {
      *stored_clone.borrow_mut() = Some(sink)
    })
    .into_future();

    let waker = noop_waker();
    let mut cx = Context::from_waker(&waker);
    assert!(Pin::new(&mut fut).poll(&mut cx).is_pending());

    if let Some(sink) = stored.borrow().as_ref() {
      sink.success(42);
    }
    assert_eq!(Pin::new(&mut fut).poll(&mut cx), Poll::Ready(Ok(Ok(Some(42)))));
  }

  #[rxmono_macro::test]
  fn dropping_future_cancels() {
    let cancelled = Rc::new(Cell::new(false));
    let cancelled_clone = cancelled.clone();
    let fut = never::<i32>()
      .do_on_cancel(move || cancelled_clone.set(true))
      .into_future();
    assert!(!cancelled.get());
    drop(fut);
    assert!(cancelled.get());
  }

  #[rxmono_macro::test]
  fn dropping_resolved_future_does_not_cancel() {
    let completes = Rc::new(Cell::new(0));
    let cancels = Rc::new(Cell::new(0));
    let (completes_clone, cancels_clone) = (completes.clone(), cancels.clone());
    let fut = just(1)
      .do_on_success(move |_| completes_clone.set(completes_clone.get() + 1))
      .do_on_cancel(move || cancels_clone.set(cancels_clone.get() + 1))
      .into_future();
    drop(fut);
    assert_eq!(completes.get(), 1);
    assert_eq!(cancels.get(), 0);

    let cancels = Rc::new(Cell::new(0));
    let cancels_clone = cancels.clone();
    let fut = error::<i32, _>("boom")
      .do_on_cancel(move || cancels_clone.set(cancels_clone.get() + 1))
      .into_future();
    drop(fut);
    assert_eq!(cancels.get(), 0);
  }

  #[rxmono_macro::test]
  fn cancelled_elsewhere_is_abandoned() {
    let fut = just(1).do_on_subscribe(|s| s.cancel()).into_future();
    assert_eq!(futures::executor::block_on(fut), Err(IntoFutureError::Abandoned));
  }

  #[rxmono_macro::test]
  fn block_waits_for_outcome() {
    assert_eq!(just("done").block(), Ok(Ok(Some("done"))));
    assert_eq!(empty::<i32>().block(), Ok(Ok(None)));
  }
}
