//! The `Mono` trait: a lazily started computation that emits at most one
//! value, then completes, or fails.
//!
//! A mono is a blueprint. Nothing runs until it is subscribed, and every
//! subscription is an independent execution with its own
//! [`Subscription`](crate::subscription::Subscription). Subscribing consumes
//! the mono, so subscribe a clone to run it again.
//!
//! Every subscription sees, in order:
//!
//! 1. `on_subscribe`, exactly once;
//! 2. `on_next(v)` then `on_complete`, or `on_complete` alone, or `on_error`;
//! 3. nothing else.
//!
//! ```rust
//! use rxmono::prelude::*;
//!
//! just("Hello World")
//!   .map(|s| s.to_uppercase())
//!   .subscribe(|v| assert_eq!(v, "HELLO WORLD"));
//! ```

use std::{borrow::Cow, convert::Infallible, fmt::Debug};

use crate::{
  ops::{
    filter::Filter,
    flat_map::FlatMap,
    into_future::{IntoFutureResult, MonoFuture},
    lifecycle::{
      DoFinally, DoOnCancel, DoOnError, DoOnNext, DoOnRequest, DoOnSubscribe, DoOnSuccess,
    },
    log::Log,
    map::{Map, TryMap},
    map_err::{absurd, MapErr},
    on_error_resume::{OnErrorResume, OnErrorReturn},
    switch_if_empty::SwitchIfEmpty,
  },
  signal::SignalType,
  subscriber::{LambdaSubscriber, Subscriber},
  subscription::BoxedSubscription,
};

pub mod boxed;
pub mod create;
pub mod defer;
pub mod from_fn;
pub mod just;
pub mod sink;
pub mod trivial;

pub use boxed::BoxedMono;
pub use create::Create;
pub use defer::Defer;
pub use from_fn::FromFn;
pub use just::{Just, JustOrEmpty};
pub use sink::MonoSink;
pub use trivial::{Empty, Error, Never};

/// A publisher of at most one value.
pub trait Mono: Sized {
  type Item;
  type Err;

  /// Start one execution, delivering its signals to `subscriber`.
  ///
  /// Operators implement this by wrapping `subscriber` and subscribing the
  /// wrapper upstream.
  fn actual_subscribe<O>(self, subscriber: O)
  where
    O: Subscriber<Self::Item, Self::Err> + 'static;

  // ==================== Transformation ====================

  /// Transform the value.
  fn map<U, F>(self, f: F) -> Map<Self, F>
  where
    F: FnOnce(Self::Item) -> U,
  {
    Map::new(self, f)
  }

  /// Transform the value with a fallible function. An `Err` cancels
  /// upstream and is delivered downstream as `on_error`.
  fn try_map<U, F>(self, f: F) -> TryMap<Self, F>
  where
    F: FnOnce(Self::Item) -> Result<U, Self::Err>,
  {
    TryMap::new(self, f)
  }

  /// Transform the error.
  fn map_err<E, F>(self, f: F) -> MapErr<Self, F>
  where
    F: FnOnce(Self::Err) -> E,
  {
    MapErr::new(self, f)
  }

  /// Give an infallible mono the error type `E`, so it composes with
  /// fallible operators and monos.
  fn with_err<E>(self) -> MapErr<Self, fn(Infallible) -> E>
  where
    Self: Mono<Err = Infallible>,
  {
    MapErr::new(self, absurd::<E> as fn(Infallible) -> E)
  }

  /// Keep the value only if `predicate` accepts it, complete empty otherwise.
  fn filter<F>(self, predicate: F) -> Filter<Self, F>
  where
    F: FnOnce(&Self::Item) -> bool,
  {
    Filter::new(self, predicate)
  }

  /// Continue with the mono built from the value.
  fn flat_map<R, F>(self, f: F) -> FlatMap<Self, F>
  where
    F: FnOnce(Self::Item) -> R,
    R: Mono<Err = Self::Err>,
  {
    FlatMap::new(self, f)
  }

  /// Subscribe to `alternative` when this mono completes without a value.
  fn switch_if_empty<A>(self, alternative: A) -> SwitchIfEmpty<Self, A>
  where
    A: Mono<Item = Self::Item, Err = Self::Err>,
  {
    SwitchIfEmpty::new(self, alternative)
  }

  /// Emit `value` when this mono completes without one.
  fn default_if_empty(self, value: Self::Item) -> SwitchIfEmpty<Self, Just<Self::Item, Self::Err>> {
    SwitchIfEmpty::new(self, Just::new(value))
  }

  // ==================== Side effects ====================

  fn do_on_subscribe<F>(self, f: F) -> DoOnSubscribe<Self, F>
  where
    F: FnOnce(&BoxedSubscription),
  {
    DoOnSubscribe::new(self, f)
  }

  /// Observe every `request(n)` issued by downstream.
  fn do_on_request<F>(self, f: F) -> DoOnRequest<Self, F>
  where
    F: Fn(usize),
  {
    DoOnRequest::new(self, f)
  }

  fn do_on_cancel<F>(self, f: F) -> DoOnCancel<Self, F>
  where
    F: FnOnce(),
  {
    DoOnCancel::new(self, f)
  }

  fn do_on_next<F>(self, f: F) -> DoOnNext<Self, F>
  where
    F: FnOnce(&Self::Item),
  {
    DoOnNext::new(self, f)
  }

  /// Runs on successful termination: `Some(&value)` when a value is
  /// emitted, `None` on empty completion.
  fn do_on_success<F>(self, f: F) -> DoOnSuccess<Self, F>
  where
    F: FnOnce(Option<&Self::Item>),
  {
    DoOnSuccess::new(self, f)
  }

  fn do_on_error<F>(self, f: F) -> DoOnError<Self, F>
  where
    F: FnOnce(&Self::Err),
  {
    DoOnError::new(self, f)
  }

  /// Runs once after the subscription ends, by completion, error or
  /// cancellation.
  fn do_finally<F>(self, f: F) -> DoFinally<Self, F>
  where
    F: FnOnce(SignalType),
  {
    DoFinally::new(self, f)
  }

  // ==================== Error recovery ====================

  /// Replace an error with the mono built from it.
  fn on_error_resume<R, F>(self, f: F) -> OnErrorResume<Self, F>
  where
    F: FnOnce(Self::Err) -> R,
    R: Mono<Item = Self::Item>,
  {
    OnErrorResume::new(self, f)
  }

  /// Replace an error with `value` followed by completion.
  fn on_error_return(self, value: Self::Item) -> OnErrorReturn<Self, Self::Item> {
    OnErrorReturn::new(self, value)
  }

  // ==================== Diagnostics ====================

  /// Trace every signal at `info` level under the default category.
  fn log(self) -> Log<Self> { Log::new(self, "rxmono.Mono") }

  /// Trace every signal at `info` level under `category`.
  fn log_with(self, category: impl Into<Cow<'static, str>>) -> Log<Self> {
    Log::new(self, category)
  }

  /// Erase the concrete type of this mono.
  fn box_it(self) -> BoxedMono<Self::Item, Self::Err>
  where
    Self: 'static,
    Self::Item: 'static,
    Self::Err: 'static,
  {
    BoxedMono::new(self)
  }

  // ==================== Subscription ====================

  fn subscribe_with<O>(self, subscriber: O)
  where
    O: Subscriber<Self::Item, Self::Err> + 'static,
  {
    self.actual_subscribe(subscriber)
  }

  /// Subscribe with no handlers, only to run the mono.
  fn trigger(self)
  where
    Self::Item: 'static,
    Self::Err: Debug + 'static,
  {
    self.actual_subscribe(LambdaSubscriber::new())
  }

  fn subscribe<N>(self, next: N)
  where
    N: FnMut(Self::Item) + 'static,
    Self::Item: 'static,
    Self::Err: Debug + 'static,
  {
    self.actual_subscribe(LambdaSubscriber::new().with_next(next))
  }

  fn subscribe_err<N, E>(self, next: N, error: E)
  where
    N: FnMut(Self::Item) + 'static,
    E: FnOnce(Self::Err) + 'static,
    Self::Item: 'static,
    Self::Err: Debug + 'static,
  {
    self.actual_subscribe(LambdaSubscriber::new().with_next(next).with_error(error))
  }

  fn subscribe_all<N, E, C>(self, next: N, error: E, complete: C)
  where
    N: FnMut(Self::Item) + 'static,
    E: FnOnce(Self::Err) + 'static,
    C: FnOnce() + 'static,
    Self::Item: 'static,
    Self::Err: Debug + 'static,
  {
    self.actual_subscribe(
      LambdaSubscriber::new()
        .with_next(next)
        .with_error(error)
        .with_complete(complete),
    )
  }

  /// Subscribe with every handler. `on_subscribe` receives the
  /// subscription and is responsible for requesting the value.
  fn subscribe_full<N, E, C, S>(self, next: N, error: E, complete: C, on_subscribe: S)
  where
    N: FnMut(Self::Item) + 'static,
    E: FnOnce(Self::Err) + 'static,
    C: FnOnce() + 'static,
    S: FnOnce(BoxedSubscription) + 'static,
    Self::Item: 'static,
    Self::Err: Debug + 'static,
  {
    self.actual_subscribe(
      LambdaSubscriber::new()
        .with_next(next)
        .with_error(error)
        .with_complete(complete)
        .with_subscription(on_subscribe),
    )
  }

  /// Subscribe now and resolve with the outcome. Dropping the future
  /// cancels the subscription.
  fn into_future(self) -> MonoFuture<Self::Item, Self::Err>
  where
    Self::Item: 'static,
    Self::Err: 'static,
  {
    MonoFuture::new(self)
  }

  /// Subscribe and block the current thread until the mono terminates.
  ///
  /// Never returns for a mono that never terminates.
  fn block(self) -> IntoFutureResult<Self::Item, Self::Err>
  where
    Self::Item: 'static,
    Self::Err: 'static,
  {
    futures::executor::block_on(self.into_future())
  }
}
