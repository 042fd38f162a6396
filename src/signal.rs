//! Signal kinds, used by the `log` and `do_finally` operators and by the
//! step verifier.

use std::fmt::{Display, Formatter};

/// The kind of a signal, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalType {
  OnSubscribe,
  Request(usize),
  OnNext,
  OnError,
  OnComplete,
  Cancel,
}

impl Display for SignalType {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      SignalType::OnSubscribe => write!(f, "onSubscribe"),
      SignalType::Request(n) if *n == crate::subscription::UNBOUNDED => {
        write!(f, "request(unbounded)")
      }
      SignalType::Request(n) => write!(f, "request({n})"),
      SignalType::OnNext => write!(f, "onNext"),
      SignalType::OnError => write!(f, "onError"),
      SignalType::OnComplete => write!(f, "onComplete"),
      SignalType::Cancel => write!(f, "cancel"),
    }
  }
}

/// A signal received by a subscriber, with its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal<Item, Err> {
  Subscribe,
  Next(Item),
  Error(Err),
  Complete,
}

impl<Item, Err> Signal<Item, Err> {
  pub fn signal_type(&self) -> SignalType {
    match self {
      Signal::Subscribe => SignalType::OnSubscribe,
      Signal::Next(_) => SignalType::OnNext,
      Signal::Error(_) => SignalType::OnError,
      Signal::Complete => SignalType::OnComplete,
    }
  }

  pub fn is_terminal(&self) -> bool { matches!(self, Signal::Error(_) | Signal::Complete) }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::subscription::UNBOUNDED;

  #[rxmono_macro::test]
  fn display_matches_reactive_streams_names() {
    assert_eq!(SignalType::Request(UNBOUNDED).to_string(), "request(unbounded)");
    assert_eq!(SignalType::Request(1).to_string(), "request(1)");
    assert_eq!(SignalType::OnComplete.to_string(), "onComplete");
  }

  #[rxmono_macro::test]
  fn terminal_signals() {
    assert!(Signal::<i32, ()>::Complete.is_terminal());
    assert!(Signal::<i32, ()>::Error(()).is_terminal());
    assert!(!Signal::<i32, ()>::Next(1).is_terminal());
    assert_eq!(Signal::<i32, ()>::Subscribe.signal_type(), SignalType::OnSubscribe);
  }
}
