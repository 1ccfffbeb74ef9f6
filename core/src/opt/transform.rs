//! Transformations of the held value.

use crate::error::Error;

use super::Opt;

impl<T> Opt<T> {
  /// Transforms the held value with `f`. Absent stays absent.
  ///
  /// `f` is total, so `map` can never produce absence. Use [flat_map](Self::flat_map) to produce absence, or
  /// [try_map](Self::try_map) when `f` may yield an absent result that must be treated as a programming error.
  #[inline]
  pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Opt<U> {
    match self {
      Self::Present(v) => Opt::Present(f(v)),
      Self::Absent => Opt::Absent,
    }
  }

  /// Transforms the held value with `f`, or produces `default` when absent. The result is always present.
  #[inline]
  pub fn map_or<U>(self, f: impl FnOnce(T) -> U, default: U) -> Opt<U> {
    match self {
      Self::Present(v) => Opt::Present(f(v)),
      Self::Absent => Opt::Present(default),
    }
  }

  /// Transforms the held value with `f`, or produces the result of `on_absent` when absent. The result is always
  /// present. `on_absent` runs at most once, and only when absent.
  #[inline]
  pub fn map_or_else<U>(self, f: impl FnOnce(T) -> U, on_absent: impl FnOnce() -> U) -> Opt<U> {
    match self {
      Self::Present(v) => Opt::Present(f(v)),
      Self::Absent => Opt::Present(on_absent()),
    }
  }

  /// Transforms the held value with `f`, which must not return `None`.
  ///
  /// # Errors
  ///
  /// Returns [`Error::InvalidArgument`] if `f` returns `None`. `f` is not called when absent.
  #[inline]
  pub fn try_map<U>(self, f: impl FnOnce(T) -> Option<U>) -> Result<Opt<U>, Error> {
    match self {
      Self::Present(v) => Opt::present(f(v)).map_err(|_| map_produced_absent()),
      Self::Absent => Ok(Opt::Absent),
    }
  }

  /// Like [try_map](Self::try_map), but produces the result of `on_absent` when absent, which must not return `None`
  /// either.
  ///
  /// # Errors
  ///
  /// Returns [`Error::InvalidArgument`] if the function that ran returns `None`.
  #[inline]
  pub fn try_map_or_else<U>(
    self,
    f: impl FnOnce(T) -> Option<U>,
    on_absent: impl FnOnce() -> Option<U>,
  ) -> Result<Opt<U>, Error> {
    let result = match self {
      Self::Present(v) => f(v),
      Self::Absent => on_absent(),
    };
    Opt::present(result).map_err(|_| map_produced_absent())
  }


  /// Replaces this value with the optional value `f` returns for the held value. Absent stays absent.
  ///
  /// This is how absence is produced downstream of a transformation.
  #[inline]
  pub fn flat_map<U>(self, f: impl FnOnce(T) -> Opt<U>) -> Opt<U> {
    match self {
      Self::Present(v) => f(v),
      Self::Absent => Opt::Absent,
    }
  }

  /// Like [flat_map](Self::flat_map), but returns the result of `on_absent` when absent.
  #[inline]
  pub fn flat_map_or_else<U>(self, f: impl FnOnce(T) -> Opt<U>, on_absent: impl FnOnce() -> Opt<U>) -> Opt<U> {
    match self {
      Self::Present(v) => f(v),
      Self::Absent => on_absent(),
    }
  }


  /// Keeps the held value only if `predicate` holds for it. `predicate` is not called when absent.
  #[inline]
  pub fn filter(self, predicate: impl FnOnce(&T) -> bool) -> Self {
    match self {
      Self::Present(v) => if predicate(&v) { Self::Present(v) } else { Self::Absent },
      Self::Absent => Self::Absent,
    }
  }

  /// Narrows or widens the held value into `U`.
  ///
  /// Present values that convert into `U` stay present; present values that do not convert become absent. Absent
  /// becomes absent unconditionally. Widening through [`From`] always succeeds, since it implies an infallible
  /// [`TryFrom`]. Narrowing a sum type into one of its variants is expressed with a [`TryFrom`] impl on the variant
  /// type.
  #[inline]
  pub fn cast<U>(self) -> Opt<U> where
    T: TryInto<U>
  {
    self.flat_map(|v| match v.try_into() {
      Ok(u) => Opt::Present(u),
      Err(_) => Opt::Absent,
    })
  }

  /// Narrows the held value with an explicit converter. Absent when the converter returns `None`.
  #[inline]
  pub fn narrow<U>(self, converter: impl FnOnce(T) -> Option<U>) -> Opt<U> {
    self.flat_map(|v| Opt::from(converter(v)))
  }
}

#[inline]
fn map_produced_absent() -> Error {
  Error::InvalidArgument("map function produced an absent value")
}
