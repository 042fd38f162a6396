//! The `log` operator: traces every signal that crosses it.
//!
//! Events are emitted at `info` level with the target `rxmono::log` and a
//! `category` field, so they can be filtered like any other `tracing` event:
//!
//! ```text
//! RUST_LOG=rxmono::log=info
//! ```

use std::{borrow::Cow, fmt::Debug};

use crate::{
  mono::Mono,
  signal::SignalType,
  subscriber::Subscriber,
  subscription::{BoxedSubscription, Subscription},
};

#[derive(Clone)]
pub struct Log<S> {
  pub source: S,
  pub category: Cow<'static, str>,
}

impl<S> Log<S> {
  pub fn new(source: S, category: impl Into<Cow<'static, str>>) -> Self {
    Self { source, category: category.into() }
  }
}

fn trace_signal(category: &str, signal: SignalType) {
  tracing::info!(target: "rxmono::log", category = %category, "| {signal}()");
}

pub struct LogSubscriber<O> {
  subscriber: O,
  category: Cow<'static, str>,
}

struct LoggedSubscription {
  inner: BoxedSubscription,
  category: Cow<'static, str>,
}

impl Subscription for LoggedSubscription {
  fn request(&self, n: usize) {
    let signal = SignalType::Request(n);
    tracing::info!(target: "rxmono::log", category = %self.category, "| {signal}");
    self.inner.request(n)
  }

  fn cancel(&self) {
    trace_signal(&self.category, SignalType::Cancel);
    self.inner.cancel()
  }

  fn is_cancelled(&self) -> bool { self.inner.is_cancelled() }
}

impl<Item, Err, O> Subscriber<Item, Err> for LogSubscriber<O>
where
  O: Subscriber<Item, Err>,
  Item: Debug,
  Err: Debug,
{
  fn on_subscribe(&mut self, subscription: BoxedSubscription) {
    trace_signal(&self.category, SignalType::OnSubscribe);
    let logged = LoggedSubscription { inner: subscription, category: self.category.clone() };
    self.subscriber.on_subscribe(BoxedSubscription::new(logged))
  }

  fn on_next(&mut self, value: Item) {
    tracing::info!(target: "rxmono::log", category = %self.category, "| onNext({value:?})");
    self.subscriber.on_next(value)
  }

  fn on_error(self, err: Err) {
    tracing::info!(target: "rxmono::log", category = %self.category, "| onError({err:?})");
    self.subscriber.on_error(err)
  }

  fn on_complete(self) {
    trace_signal(&self.category, SignalType::OnComplete);
    self.subscriber.on_complete()
  }
}

impl<S> Mono for Log<S>
where
  S: Mono,
  S::Item: Debug,
  S::Err: Debug,
{
  type Item = S::Item;
  type Err = S::Err;

  fn actual_subscribe<O>(self, subscriber: O)
  where
    O: Subscriber<S::Item, S::Err> + 'static,
  {
    let Log { source, category } = self;
    source.actual_subscribe(LogSubscriber { subscriber, category })
  }
}
