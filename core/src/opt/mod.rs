//! An optional value that is either [present](Opt::Present) with a payload, or [absent](Opt::Absent).
//!
//! Construction decides presence at the boundary: anything convertible into an [`Option`] can be wrapped, where
//! `None` plays the role of the absence sentinel. Once constructed, a value is immutable and is transformed through
//! the combinators in this module:
//!
//! - [transformations](transform): `map`, `flat_map`, `filter`, `cast`, and their fallback variants.
//! - [side effects and raising](effect): `on_present`, `on_absent`, `throw_if_present`, `throw_if_absent`.
//! - [fallbacks and pairing](combine): `or_else`, `invert`, `concat`, `both`.
//! - [interop](interop) with [`Option`], iterators, and serde.

use crate::error::Error;

pub mod transform;
pub mod effect;
pub mod combine;
pub mod interop;

/// A value that may be absent.
///
/// `Absent` orders before `Present`, like [`Option`]. Two present values are equal iff their payloads are equal.
#[derive(Default, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
#[must_use]
pub enum Opt<T> {
  #[default]
  Absent,
  Present(T),
}

impl<T> Opt<T> {
  /// Wraps `value` if it is present, otherwise returns [`Opt::Absent`]. Never fails.
  #[inline]
  pub fn of(value: impl Into<Option<T>>) -> Self {
    match value.into() {
      Some(v) => Self::Present(v),
      None => Self::Absent,
    }
  }

  /// Wraps `value`, failing with [`Error::InvalidArgument`] if it is absent.
  ///
  /// This is the only constructor that can fail.
  #[inline]
  pub fn present(value: impl Into<Option<T>>) -> Result<Self, Error> {
    match value.into() {
      Some(v) => Ok(Self::Present(v)),
      None => Err(Error::InvalidArgument("cannot create a present value from an absent one")),
    }
  }

  #[inline]
  pub const fn absent() -> Self { Self::Absent }

  /// Wraps `value` if it is present and satisfies `predicate`, otherwise returns [`Opt::Absent`].
  #[inline]
  pub fn present_if(value: impl Into<Option<T>>, predicate: impl FnOnce(&T) -> bool) -> Self {
    Self::of(value).filter(predicate)
  }


  #[inline]
  pub const fn is_present(&self) -> bool { matches!(self, Self::Present(_)) }
  #[inline]
  pub const fn is_absent(&self) -> bool { matches!(self, Self::Absent) }

  /// Returns a reference to the payload, if present.
  #[inline]
  pub const fn value(&self) -> Option<&T> {
    match self {
      Self::Present(v) => Some(v),
      Self::Absent => None,
    }
  }

  #[inline]
  pub const fn as_ref(&self) -> Opt<&T> {
    match self {
      Self::Present(v) => Opt::Present(v),
      Self::Absent => Opt::Absent,
    }
  }

  #[inline]
  pub fn as_mut(&mut self) -> Opt<&mut T> {
    match self {
      Self::Present(v) => Opt::Present(v),
      Self::Absent => Opt::Absent,
    }
  }

  /// Unconditionally converts into [`Opt::Absent`], dropping the payload if any.
  #[inline]
  pub fn delete(self) -> Self { Self::Absent }
}

impl<T: Clone> Opt<&T> {
  #[inline]
  pub fn cloned(self) -> Opt<T> {
    match self {
      Opt::Present(v) => Opt::Present(v.clone()),
      Opt::Absent => Opt::Absent,
    }
  }
}
