//! `StepVerifier`: scripted assertions over the signals of one subscription.
//!
//! A verifier subscribes to the mono when a `verify*` method is called,
//! records every signal, and then replays the script against the recording.
//! Script steps that act on the subscription (`then_request`, `then_cancel`)
//! or run arbitrary code (`then`) execute in order, so signals they cause
//! are checked by the expectations that follow.
//!
//! Verification is synchronous: every signal must have arrived by the time
//! its expectation runs.
//!
//! ```rust
//! use rxmono::prelude::*;
//!
//! StepVerifier::create(just("Hello World").map(|s| s.to_uppercase()))
//!   .expect_subscription()
//!   .expect_next("HELLO WORLD".to_string())
//!   .verify_complete();
//!
//! StepVerifier::create_with_initial_request(just(1), 0)
//!   .expect_subscription()
//!   .then_request(1)
//!   .expect_next(1)
//!   .verify_complete();
//! ```

use std::{
  cell::{Cell, RefCell},
  fmt::Debug,
  rc::Rc,
};

use smallvec::SmallVec;

use crate::{
  mono::Mono,
  signal::Signal,
  subscriber::Subscriber,
  subscription::{BoxedSubscription, Subscription, UNBOUNDED},
};

/// Why a verification failed. Steps are numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerificationError {
  #[error("step {step}: expected {expected}, got {actual}")]
  Mismatch { step: usize, expected: String, actual: String },
  #[error("step {step}: expected {expected}, but no further signal arrived")]
  Missing { step: usize, expected: String },
  #[error("expected no further signal, got {actual}")]
  Unexpected { actual: String },
  #[error("step {step}: cannot {action} before on_subscribe")]
  NoSubscription { step: usize, action: &'static str },
}

type Predicate<T> = Box<dyn FnOnce(&T) -> bool>;

struct Expectation<T> {
  description: String,
  check: Predicate<T>,
}

enum Step<Item> {
  Subscription,
  Next(Expectation<Item>),
  Request(usize),
  Cancel,
  Then(Box<dyn FnOnce()>),
}

enum Terminal<Err> {
  Complete,
  Error(Expectation<Err>),
  /// Only check that nothing is left over.
  Nothing,
}

/// Builder for a scripted verification of a mono.
pub struct StepVerifier<M: Mono> {
  mono: M,
  initial_request: usize,
  steps: Vec<Step<M::Item>>,
}

impl<M> StepVerifier<M>
where
  M: Mono,
  M::Item: Debug + 'static,
  M::Err: Debug + 'static,
{
  /// Verify `mono`, requesting unbounded demand on subscribe.
  pub fn create(mono: M) -> Self { Self::create_with_initial_request(mono, UNBOUNDED) }

  /// Verify `mono`, requesting `n` on subscribe. `0` requests nothing, so
  /// the script has to call [`then_request`](Self::then_request).
  pub fn create_with_initial_request(mono: M, n: usize) -> Self {
    Self { mono, initial_request: n, steps: vec![] }
  }

  /// Expect `on_subscribe`. Without this step a leading `on_subscribe` is
  /// consumed implicitly.
  pub fn expect_subscription(mut self) -> Self {
    self.steps.push(Step::Subscription);
    self
  }

  /// Expect `on_next` with a value equal to `value`.
  pub fn expect_next(mut self, value: M::Item) -> Self
  where
    M::Item: PartialEq,
  {
    let description = format!("onNext({value:?})");
    self.steps.push(Step::Next(Expectation {
      description,
      check: Box::new(move |actual| *actual == value),
    }));
    self
  }

  /// Expect `on_next` with a value accepted by `predicate`.
  pub fn expect_next_matches(mut self, predicate: impl FnOnce(&M::Item) -> bool + 'static) -> Self {
    self.steps.push(Step::Next(Expectation {
      description: "onNext matching the predicate".to_string(),
      check: Box::new(predicate),
    }));
    self
  }

  /// Request `n` through the recorded subscription.
  pub fn then_request(mut self, n: usize) -> Self {
    self.steps.push(Step::Request(n));
    self
  }

  /// Run `f`, for example to resolve a stored sink.
  pub fn then(mut self, f: impl FnOnce() + 'static) -> Self {
    self.steps.push(Step::Then(Box::new(f)));
    self
  }

  /// Cancel the recorded subscription.
  pub fn then_cancel(mut self) -> Self {
    self.steps.push(Step::Cancel);
    self
  }

  pub fn try_verify_complete(self) -> Result<(), VerificationError> { self.run(Terminal::Complete) }

  /// Expect `on_error` with any error.
  pub fn try_verify_error(self) -> Result<(), VerificationError> {
    self.try_verify_error_matches(|_| true)
  }

  pub fn try_verify_error_matches(
    self,
    predicate: impl FnOnce(&M::Err) -> bool + 'static,
  ) -> Result<(), VerificationError> {
    self.run(Terminal::Error(Expectation {
      description: "onError matching the predicate".to_string(),
      check: Box::new(predicate),
    }))
  }

  /// Run the script and check that no signal is left over.
  pub fn try_verify(self) -> Result<(), VerificationError> { self.run(Terminal::Nothing) }

  /// Expect `on_complete` after the scripted steps.
  ///
  /// # Panics
  ///
  /// When the verification fails.
  #[track_caller]
  pub fn verify_complete(self) { report(self.try_verify_complete()) }

  /// Expect `on_error` with any error after the scripted steps.
  ///
  /// # Panics
  ///
  /// When the verification fails.
  #[track_caller]
  pub fn verify_error(self) { report(self.try_verify_error()) }

  /// Expect `on_error` with an error accepted by `predicate`.
  ///
  /// # Panics
  ///
  /// When the verification fails.
  #[track_caller]
  pub fn verify_error_matches(self, predicate: impl FnOnce(&M::Err) -> bool + 'static) {
    report(self.try_verify_error_matches(predicate))
  }

  /// Run the script and check that no signal is left over, typically after
  /// [`then_cancel`](Self::then_cancel).
  ///
  /// # Panics
  ///
  /// When the verification fails.
  #[track_caller]
  pub fn verify(self) { report(self.try_verify()) }

  fn run(self, terminal: Terminal<M::Err>) -> Result<(), VerificationError> {
    let StepVerifier { mono, initial_request, steps } = self;
    let record = Rc::new(Record::default());
    mono.actual_subscribe(RecordingSubscriber { record: record.clone(), initial_request });

    if !matches!(steps.first(), Some(Step::Subscription))
      && matches!(record.peek_is_subscribe(), Some(true))
    {
      record.pop();
    }

    let total = steps.len();
    for (index, step) in steps.into_iter().enumerate() {
      let step_no = index + 1;
      match step {
        Step::Subscription => match record.pop() {
          Some(Signal::Subscribe) => {}
          Some(other) => return Err(mismatch(step_no, "onSubscribe", &other)),
          None => return Err(missing(step_no, "onSubscribe")),
        },
        Step::Next(Expectation { description, check }) => match record.pop() {
          Some(Signal::Next(value)) => {
            if !check(&value) {
              return Err(VerificationError::Mismatch {
                step: step_no,
                expected: description,
                actual: format!("onNext({value:?})"),
              });
            }
          }
          Some(other) => return Err(mismatch(step_no, &description, &other)),
          None => return Err(missing(step_no, &description)),
        },
        Step::Request(n) => record.subscription(step_no, "request")?.request(n),
        Step::Cancel => record.subscription(step_no, "cancel")?.cancel(),
        Step::Then(f) => f(),
      }
    }

    let step_no = total + 1;
    match terminal {
      Terminal::Complete => match record.pop() {
        Some(Signal::Complete) => {}
        Some(other) => return Err(mismatch(step_no, "onComplete", &other)),
        None => return Err(missing(step_no, "onComplete")),
      },
      Terminal::Error(Expectation { description, check }) => match record.pop() {
        Some(Signal::Error(err)) => {
          if !check(&err) {
            return Err(VerificationError::Mismatch {
              step: step_no,
              expected: description,
              actual: format!("onError({err:?})"),
            });
          }
        }
        Some(other) => return Err(mismatch(step_no, &description, &other)),
        None => return Err(missing(step_no, &description)),
      },
      Terminal::Nothing => {}
    }

    match record.pop() {
      Some(extra) => Err(VerificationError::Unexpected { actual: describe(&extra) }),
      None => Ok(()),
    }
  }
}

#[track_caller]
fn report(result: Result<(), VerificationError>) {
  if let Err(err) = result {
    panic!("verification failed: {err}");
  }
}

fn describe<Item: Debug, Err: Debug>(signal: &Signal<Item, Err>) -> String {
  match signal {
    Signal::Subscribe => "onSubscribe".to_string(),
    Signal::Next(value) => format!("onNext({value:?})"),
    Signal::Error(err) => format!("onError({err:?})"),
    Signal::Complete => "onComplete".to_string(),
  }
}

fn mismatch<Item: Debug, Err: Debug>(
  step: usize,
  expected: &str,
  actual: &Signal<Item, Err>,
) -> VerificationError {
  VerificationError::Mismatch { step, expected: expected.to_string(), actual: describe(actual) }
}

fn missing(step: usize, expected: &str) -> VerificationError {
  VerificationError::Missing { step, expected: expected.to_string() }
}

// ============================================================================
// Recording
// ============================================================================

struct Record<Item, Err> {
  signals: RefCell<SmallVec<[Signal<Item, Err>; 4]>>,
  subscription: RefCell<Option<BoxedSubscription>>,
  terminated: Cell<bool>,
}

impl<Item, Err> Default for Record<Item, Err> {
  fn default() -> Self {
    Self {
      signals: RefCell::new(SmallVec::new()),
      subscription: RefCell::new(None),
      terminated: Cell::new(false),
    }
  }
}

impl<Item, Err> Record<Item, Err> {
  fn push(&self, signal: Signal<Item, Err>) {
    if self.terminated.get() {
      tracing::warn!("signal {} recorded after a terminal signal", signal.signal_type());
    }
    if signal.is_terminal() {
      self.terminated.set(true);
    }
    self.signals.borrow_mut().push(signal);
  }

  /// Take the oldest unchecked signal. The borrow ends before the caller
  /// runs user code.
  fn pop(&self) -> Option<Signal<Item, Err>> {
    let mut signals = self.signals.borrow_mut();
    if signals.is_empty() { None } else { Some(signals.remove(0)) }
  }

  fn peek_is_subscribe(&self) -> Option<bool> {
    self
      .signals
      .borrow()
      .first()
      .map(|signal| matches!(signal, Signal::Subscribe))
  }

  fn subscription(
    &self,
    step: usize,
    action: &'static str,
  ) -> Result<BoxedSubscription, VerificationError> {
    self
      .subscription
      .borrow()
      .clone()
      .ok_or(VerificationError::NoSubscription { step, action })
  }
}

struct RecordingSubscriber<Item, Err> {
  record: Rc<Record<Item, Err>>,
  initial_request: usize,
}

impl<Item, Err> Subscriber<Item, Err> for RecordingSubscriber<Item, Err> {
  fn on_subscribe(&mut self, subscription: BoxedSubscription) {
    self.record.push(Signal::Subscribe);
    *self.record.subscription.borrow_mut() = Some(subscription.clone());
    if self.initial_request > 0 {
      subscription.request(self.initial_request);
    }
  }

  fn on_next(&mut self, value: Item) { self.record.push(Signal::Next(value)) }

  fn on_error(self, err: Err) { self.record.push(Signal::Error(err)) }

  fn on_complete(self) { self.record.push(Signal::Complete) }
}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use super::*;
  use crate::prelude::*;

  #[rxmono_macro::test]
  fn passes_on_expected_sequence() {
    StepVerifier::create(just(3))
      .expect_subscription()
      .expect_next(3)
      .verify_complete();

    StepVerifier::create(error::<i32, _>("bad"))
      .verify_error_matches(|e| *e == "bad");
  }

  #[rxmono_macro::test]
  fn reports_wrong_value() {
    let result = StepVerifier::create(just(3)).expect_next(4).try_verify_complete();
    assert_eq!(
      result,
      Err(VerificationError::Mismatch {
        step: 1,
        expected: "onNext(4)".to_string(),
        actual: "onNext(3)".to_string(),
      })
    );
  }

  #[rxmono_macro::test]
  fn reports_error_where_completion_expected() {
    let result = StepVerifier::create(error::<i32, _>("bad")).try_verify_complete();
    assert_eq!(
      result,
      Err(VerificationError::Mismatch {
        step: 1,
        expected: "onComplete".to_string(),
        actual: "onError(\"bad\")".to_string(),
      })
    );
  }

  #[rxmono_macro::test]
  fn reports_missing_signal_without_demand() {
    let result = StepVerifier::create_with_initial_request(just(1), 0)
      .expect_next(1)
      .try_verify_complete();
    assert_eq!(
      result,
      Err(VerificationError::Missing { step: 1, expected: "onNext(1)".to_string() })
    );
  }

  #[rxmono_macro::test]
  fn reports_leftover_signal() {
    let result = StepVerifier::create(just(1)).expect_next(1).try_verify();
    assert_eq!(result, Err(VerificationError::Unexpected { actual: "onComplete".to_string() }));
  }

  #[rxmono_macro::test]
  fn then_resolves_stored_sink() {
    let stored = Rc::new(RefCell::new(None::<MonoSink<i32, String>>));
    let (store, resolve) = (stored.clone(), stored.clone());
    StepVerifier::create(create(move |sink| *store.borrow_mut() = Some(sink)))
      .expect_subscription()
      .then(move || {
        if let Some(sink) = resolve.borrow().as_ref() {
          sink.success(5);
        }
      })
      .expect_next(5)
      .verify_complete();
  }

  #[rxmono_macro::test]
  fn cancel_leaves_nothing_behind() {
    StepVerifier::create_with_initial_request(just(1), 0)
      .expect_subscription()
      .then_cancel()
      .then_request(1)
      .verify();
  }

  #[rxmono_macro::test]
  #[should_panic(expected = "verification failed")]
  fn panicking_variant_reports() { StepVerifier::create(empty::<i32>()).verify_error(); }
}
