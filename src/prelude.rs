//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for easy access.

// Creation
pub use crate::factory::*;
// Core traits and types
pub use crate::{
  hooks,
  mono::{BoxedMono, Create, Defer, Empty, Error, FromFn, Just, JustOrEmpty, Mono, MonoSink, Never},
  signal::{Signal, SignalType},
  subscriber::{BoxedSubscriber, LambdaSubscriber, Subscriber},
  subscription::{BoxedSubscription, Subscription, UNBOUNDED},
};
// Operators
pub use crate::ops::{
  filter::Filter,
  flat_map::FlatMap,
  into_future::{IntoFutureError, IntoFutureResult, MonoFuture},
  lifecycle::{DoFinally, DoOnCancel, DoOnError, DoOnNext, DoOnRequest, DoOnSubscribe, DoOnSuccess},
  log::Log,
  map::{Map, TryMap},
  map_err::MapErr,
  on_error_resume::{OnErrorResume, OnErrorReturn},
  switch_if_empty::SwitchIfEmpty,
};
// Testing
#[cfg(feature = "verifier")]
pub use crate::verifier::{StepVerifier, VerificationError};
