//! Side effects and conversions of presence or absence into errors.
//!
//! Every operation here returns the original value unchanged when it does not raise, so calls chain.

use super::Opt;

impl<T> Opt<T> {
  /// Runs `action` with the held value if present.
  #[inline]
  pub fn on_present(self, action: impl FnOnce(&T)) -> Self {
    if let Self::Present(v) = &self {
      action(v);
    }
    self
  }

  /// Runs `action` if absent.
  #[inline]
  pub fn on_absent(self, action: impl FnOnce()) -> Self {
    if self.is_absent() {
      action();
    }
    self
  }


  /// Raises the error `error` creates from the held value if present. Absent passes through.
  ///
  /// # Errors
  ///
  /// Returns `Err(error(v))` when present.
  #[inline]
  pub fn throw_if_present<E>(self, error: impl FnOnce(T) -> E) -> Result<Self, E> {
    match self {
      Self::Present(v) => Err(error(v)),
      Self::Absent => Ok(Self::Absent),
    }
  }

  /// Raises the error `error` creates if absent. Present passes through and `error` is not called.
  ///
  /// # Errors
  ///
  /// Returns `Err(error())` when absent.
  #[inline]
  pub fn throw_if_absent<E>(self, error: impl FnOnce() -> E) -> Result<Self, E> {
    match self {
      Self::Present(v) => Ok(Self::Present(v)),
      Self::Absent => Err(error()),
    }
  }

  /// Unwraps the held value, raising the error `error` creates if absent.
  ///
  /// # Errors
  ///
  /// Returns `Err(error())` when absent.
  #[inline]
  pub fn require<E>(self, error: impl FnOnce() -> E) -> Result<T, E> {
    match self {
      Self::Present(v) => Ok(v),
      Self::Absent => Err(error()),
    }
  }
}
