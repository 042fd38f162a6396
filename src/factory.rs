//! Mono factory functions
//!
//! Entry points that build source monos. Nothing runs until the returned
//! mono is subscribed.
//!
//! | Function | Signals on subscribe | Error type |
//! |----------|----------------------|------------|
//! | `just(v)` | `on_next(v)`, `on_complete` | `Infallible` |
//! | `just_or_empty(opt)` | as `just`, or `on_complete` alone | `Infallible` |
//! | `empty()` | `on_complete` | `Infallible` |
//! | `error(e)` | `on_error(e)` | `E` |
//! | `never()` | nothing | `Infallible` |
//! | `create(f)` | whatever `f` reports through its sink | any |
//! | `defer(f)` | those of the mono `f` builds | any |
//! | `from_fn(f)` | from the `Result<Option<T>, E>` of `f` | `E` |
//!
//! Use [`with_err`](crate::mono::Mono::with_err) to give an infallible
//! source the error type of the chain it joins.
//!
//! ```rust
//! use rxmono::prelude::*;
//!
//! error::<&str, _>("boom")
//!   .on_error_return("EMPTY")
//!   .subscribe(|v| assert_eq!(v, "EMPTY"));
//! ```

use std::convert::Infallible;

use crate::mono::{Create, Defer, Empty, Error, FromFn, Just, JustOrEmpty, Mono, MonoSink, Never};

/// Emits `value`, then completes.
pub fn just<Item>(value: Item) -> Just<Item, Infallible> { Just::new(value) }

/// Emits the value if present, completes empty otherwise.
pub fn just_or_empty<Item>(value: Option<Item>) -> JustOrEmpty<Item, Infallible> {
  JustOrEmpty::new(value)
}

/// Completes without a value.
pub fn empty<Item>() -> Empty<Item> { Empty::default() }

/// Fails with `err`.
pub fn error<Item, Err>(err: Err) -> Error<Item, Err> { Error::new(err) }

/// Never signals anything after `on_subscribe`.
pub fn never<Item>() -> Never<Item> { Never::default() }

/// Mono driven by `f` through a [`MonoSink`], once per subscription.
///
/// ```rust
/// use rxmono::prelude::*;
///
/// create(|sink: MonoSink<i32, String>| sink.success(42))
///   .subscribe(|v| assert_eq!(v, 42));
/// ```
pub fn create<F, Item, Err>(f: F) -> Create<F, Item, Err>
where
  F: FnOnce(MonoSink<Item, Err>),
{
  Create::new(f)
}

/// Builds the mono lazily, once per subscription.
pub fn defer<F, R>(f: F) -> Defer<F>
where
  F: FnOnce() -> R,
  R: Mono,
{
  Defer::new(f)
}

/// Computes the outcome with `f` on subscription.
pub fn from_fn<F, Item, Err>(f: F) -> FromFn<F>
where
  F: FnOnce() -> Result<Option<Item>, Err>,
{
  FromFn::new(f)
}
