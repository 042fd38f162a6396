//! # rxmono: a single-value reactive publisher
//!
//! A [`Mono`] is a lazily started computation that emits at most one value,
//! then completes, or fails. It follows the Reactive Streams protocol:
//! nothing happens until a subscriber subscribes and requests demand, and
//! the subscriber can cancel at any time.
//!
//! ## Quick Start
//!
//! ```rust
//! use rxmono::prelude::*;
//!
//! just("Hello World")
//!   .map(|s| s.to_uppercase())
//!   .subscribe(|v| println!("{v}"));
//!
//! let parsed = just("17")
//!   .with_err::<String>()
//!   .try_map(|s| s.parse::<i32>().map_err(|e| e.to_string()))
//!   .on_error_return(0)
//!   .block();
//! assert_eq!(parsed, Ok(Ok(Some(17))));
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Mono`] | The publisher trait and its operators |
//! | [`Subscriber`] | Receives `on_subscribe`, `on_next`, `on_error`, `on_complete` |
//! | [`Subscription`] | Per-subscription handle for `request` and `cancel` |
//! | [`MonoSink`] | Producer side of [`create`] |
//!
//! ## Feature Flags
//!
//! - **`verifier`** (default): the [`StepVerifier`] test harness
//!
//! Everything is single-threaded: monos, subscribers and subscriptions are
//! `!Send` and signals are delivered on the thread that produced them.
//!
//! [`Mono`]: mono::Mono
//! [`Subscriber`]: subscriber::Subscriber
//! [`Subscription`]: subscription::Subscription
//! [`MonoSink`]: mono::MonoSink
//! [`create`]: factory::create
//! [`StepVerifier`]: verifier::StepVerifier

pub mod factory;
pub mod hooks;
pub mod mono;
pub mod ops;
pub mod prelude;
pub mod signal;
pub mod subscriber;
pub mod subscription;
#[cfg(feature = "verifier")]
pub mod verifier;

#[cfg(test)]
mod test_util;

pub use prelude::*;

#[cfg(all(doctest, feature = "verifier", not(target_arch = "wasm32")))]
mod __markdown_doctests {
  mod readme {
    #![doc = include_str!("../README.md")]
  }
}
