//! Operator implementations.
//!
//! Every operator is a struct holding its source mono and configuration,
//! built by the matching method of [`Mono`](crate::mono::Mono). Subscribing
//! wraps the downstream subscriber and subscribes the wrapper to the source.

pub mod filter;
pub mod flat_map;
pub mod into_future;
pub mod lifecycle;
pub mod log;
pub mod map;
pub mod map_err;
pub mod on_error_resume;
pub mod switch_if_empty;
