//! `MonoSink`: the per-subscription state machine behind every source.
//!
//! A source attaches its subscriber to a sink, which delivers
//! `on_subscribe`, and then reports exactly one outcome through the sink. The
//! sink turns that outcome into signals while enforcing the protocol:
//!
//! - a value waits for demand; empty completion and errors do not,
//! - after cancellation nothing is delivered,
//! - a cancel issued from inside `on_next` suppresses the `on_complete`,
//! - only the first outcome counts, later ones are dropped.
//!
//! No internal borrow is held while calling out, so subscribers may call
//! `request` and `cancel` re-entrantly.

use std::{cell::RefCell, rc::Rc};

use crate::{
  subscriber::Subscriber,
  subscription::{BoxedSubscription, Subscription},
};

pub(crate) enum Outcome<Item, Err> {
  Value(Item),
  Empty,
  Error(Err),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
  /// `on_subscribe` is running, the subscriber is not stored yet.
  Subscribing,
  Active,
  /// `on_next` is running; `on_complete` follows unless cancelled.
  Emitting,
  Terminated,
  Cancelled,
}

struct SinkState<Item, Err, O> {
  subscriber: Option<O>,
  phase: Phase,
  requested: bool,
  /// The producer reported its outcome.
  done: bool,
  pending: Option<Outcome<Item, Err>>,
  on_cancel: Option<Box<dyn FnOnce()>>,
}

struct SinkCore<Item, Err, O>(RefCell<SinkState<Item, Err, O>>);

pub(crate) trait SinkTarget<Item, Err>: Subscription {
  fn resolve(&self, outcome: Outcome<Item, Err>);
  fn set_on_cancel(&self, hook: Box<dyn FnOnce()>);
}

impl<Item, Err, O> SinkCore<Item, Err, O>
where
  O: Subscriber<Item, Err>,
{
  fn drain(&self) {
    let (outcome, mut subscriber, teardown) = {
      let mut state = self.0.borrow_mut();
      if state.phase != Phase::Active {
        return;
      }
      let ready = match &state.pending {
        Some(Outcome::Value(_)) => state.requested,
        Some(_) => true,
        None => false,
      };
      if !ready {
        return;
      }
      match (state.pending.take(), state.subscriber.take()) {
        (Some(outcome @ Outcome::Value(_)), Some(subscriber)) => {
          state.phase = Phase::Emitting;
          (outcome, subscriber, None)
        }
        (Some(outcome), Some(subscriber)) => (outcome, subscriber, state.terminate()),
        (pending, subscriber) => {
          state.pending = pending;
          state.subscriber = subscriber;
          return;
        }
      }
    };
    drop(teardown);

    match outcome {
      Outcome::Value(value) => {
        subscriber.on_next(value);
        let teardown = {
          let mut state = self.0.borrow_mut();
          if state.phase == Phase::Cancelled {
            return;
          }
          state.terminate()
        };
        drop(teardown);
        subscriber.on_complete();
      }
      Outcome::Empty => subscriber.on_complete(),
      Outcome::Error(err) => subscriber.on_error(err),
    }
  }
}

impl<Item, Err, O> SinkState<Item, Err, O> {
  /// Enter `Terminated`. The teardown hook can no longer run, so it is
  /// handed back to be dropped outside the borrow.
  fn terminate(&mut self) -> Option<Box<dyn FnOnce()>> {
    self.phase = Phase::Terminated;
    self.on_cancel.take()
  }
}

impl<Item, Err, O> Subscription for SinkCore<Item, Err, O>
where
  O: Subscriber<Item, Err>,
{
  fn request(&self, n: usize) {
    if n == 0 {
      tracing::warn!("request(0) is not a valid demand, ignored");
      return;
    }
    self.0.borrow_mut().requested = true;
    self.drain();
  }

  fn cancel(&self) {
    let (hook, subscriber, pending) = {
      let mut state = self.0.borrow_mut();
      if matches!(state.phase, Phase::Terminated | Phase::Cancelled) {
        return;
      }
      state.phase = Phase::Cancelled;
      (state.on_cancel.take(), state.subscriber.take(), state.pending.take())
    };
    drop(subscriber);
    drop(pending);
    if let Some(hook) = hook {
      hook();
    }
  }

  /// A terminated subscription counts as cancelled.
  fn is_cancelled(&self) -> bool {
    matches!(self.0.borrow().phase, Phase::Terminated | Phase::Cancelled)
  }
}

impl<Item, Err, O> SinkTarget<Item, Err> for SinkCore<Item, Err, O>
where
  O: Subscriber<Item, Err>,
{
  fn resolve(&self, outcome: Outcome<Item, Err>) {
    {
      let mut state = self.0.borrow_mut();
      if state.done {
        tracing::debug!("mono sink already resolved, outcome dropped");
        return;
      }
      state.done = true;
      if state.phase == Phase::Cancelled {
        return;
      }
      state.pending = Some(outcome);
    }
    self.drain();
  }

  fn set_on_cancel(&self, hook: Box<dyn FnOnce()>) {
    let (run_now, unused) = {
      let mut state = self.0.borrow_mut();
      match state.phase {
        Phase::Cancelled => (Some(hook), None),
        Phase::Terminated => (None, Some(hook)),
        _ => (None, state.on_cancel.replace(hook)),
      }
    };
    drop(unused);
    if let Some(hook) = run_now {
      hook();
    }
  }
}

/// Producer-side handle of one subscription.
///
/// Report the outcome with [`success`](MonoSink::success),
/// [`empty`](MonoSink::empty) or [`error`](MonoSink::error). Only the first
/// call counts. The sink is cheap to clone and may be kept to resolve the
/// mono later.
pub struct MonoSink<Item, Err>(Rc<dyn SinkTarget<Item, Err>>);

impl<Item, Err> Clone for MonoSink<Item, Err> {
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<Item: 'static, Err: 'static> MonoSink<Item, Err> {
  /// Deliver `on_subscribe` to `subscriber` and return the sink that
  /// drives the rest of its signals.
  pub(crate) fn attach<O>(mut subscriber: O) -> Self
  where
    O: Subscriber<Item, Err> + 'static,
  {
    let core = Rc::new(SinkCore(RefCell::new(SinkState {
      subscriber: None,
      phase: Phase::Subscribing,
      requested: false,
      done: false,
      pending: None,
      on_cancel: None,
    })));
    subscriber.on_subscribe(BoxedSubscription::from_rc(core.clone()));
    {
      let mut state = core.0.borrow_mut();
      if state.phase == Phase::Subscribing {
        state.phase = Phase::Active;
        state.subscriber = Some(subscriber);
      }
    }
    MonoSink(core)
  }
}

impl<Item, Err> MonoSink<Item, Err> {
  /// Emit `value` once demanded, then complete.
  pub fn success(&self, value: Item) { self.0.resolve(Outcome::Value(value)) }

  /// Complete without a value.
  pub fn empty(&self) { self.0.resolve(Outcome::Empty) }

  pub fn error(&self, err: Err) { self.0.resolve(Outcome::Error(err)) }

  /// Register producer teardown, run once if the subscription is cancelled.
  /// Runs immediately when it already is. Replaces a previous hook. The hook
  /// is released once the subscription terminates.
  pub fn on_cancel(&self, hook: impl FnOnce() + 'static) { self.0.set_on_cancel(Box::new(hook)) }

  /// Whether the subscription was cancelled or has already terminated.
  pub fn is_cancelled(&self) -> bool { self.0.is_cancelled() }
}
