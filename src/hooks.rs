//! Diagnostic hooks.
//!
//! An error that reaches a subscriber without an error handler is not
//! swallowed: it is logged at `error` level and handed to the dropped-error
//! hook of the current thread, where a test or an application can observe
//! it.
//!
//! ```rust
//! use std::{cell::RefCell, rc::Rc};
//!
//! use rxmono::{hooks, prelude::*};
//!
//! let dropped = Rc::new(RefCell::new(Vec::new()));
//! let dropped_clone = dropped.clone();
//! hooks::on_error_dropped(move |e| dropped_clone.borrow_mut().push(e.message.clone()));
//!
//! error::<i32, _>("disk full").subscribe(|_| {});
//!
//! assert_eq!(*dropped.borrow(), vec!["\"disk full\"".to_string()]);
//! hooks::reset_on_error_dropped();
//! ```

use std::{cell::RefCell, fmt::Debug, rc::Rc};

/// An error nobody handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedError {
  /// `Debug` rendering of the error value.
  pub message: String,
  /// Type name of the error value.
  pub type_name: &'static str,
}

type DroppedHook = Rc<dyn Fn(&DroppedError)>;

thread_local! {
  static ERROR_DROPPED: RefCell<Option<DroppedHook>> = const { RefCell::new(None) };
}

/// Install the dropped-error hook for the current thread, replacing any
/// previous one.
pub fn on_error_dropped(hook: impl Fn(&DroppedError) + 'static) {
  ERROR_DROPPED.with(|slot| *slot.borrow_mut() = Some(Rc::new(hook)));
}

/// Remove the dropped-error hook of the current thread.
pub fn reset_on_error_dropped() { ERROR_DROPPED.with(|slot| slot.borrow_mut().take()); }

/// Report an error that no subscriber handled.
pub fn error_dropped<E: Debug>(err: &E) {
  let dropped =
    DroppedError { message: format!("{err:?}"), type_name: std::any::type_name::<E>() };
  tracing::error!(
    error = %dropped.message,
    error_type = dropped.type_name,
    "error signal dropped: the subscriber has no error handler"
  );

  // The hook may install another hook, so it runs outside the borrow.
  let hook = ERROR_DROPPED.with(|slot| slot.borrow().clone());
  if let Some(hook) = hook {
    hook(&dropped);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[rxmono_macro::test]
  fn hook_receives_dropped_error() {
    let seen = Rc::new(RefCell::new(None));
    let seen_clone = seen.clone();
    on_error_dropped(move |e| *seen_clone.borrow_mut() = Some(e.clone()));

    error_dropped(&42u8);

    let seen = seen.borrow().clone().unwrap();
    assert_eq!(seen.message, "42");
    assert_eq!(seen.type_name, "u8");
    reset_on_error_dropped();
  }

  #[rxmono_macro::test]
  fn reset_removes_hook() {
    let count = Rc::new(RefCell::new(0));
    let count_clone = count.clone();
    on_error_dropped(move |_| *count_clone.borrow_mut() += 1);
    reset_on_error_dropped();

    error_dropped(&"ignored");
    assert_eq!(*count.borrow(), 0);
  }
}
