//! Fallbacks, inversion, and pairing.

use super::Opt;

impl<T> Opt<T> {
  /// Returns the held value, or `default` when absent.
  #[inline]
  pub fn or(self, default: T) -> T {
    match self {
      Self::Present(v) => v,
      Self::Absent => default,
    }
  }

  /// Returns the held value, or the value `supplier` produces when absent. `supplier` runs at most once, and only
  /// when absent.
  #[inline]
  pub fn or_else(self, supplier: impl FnOnce() -> T) -> T {
    match self {
      Self::Present(v) => v,
      Self::Absent => supplier(),
    }
  }

  /// Returns the held value, or the [default](Default) value of `T` when absent.
  #[inline]
  pub fn or_default(self) -> T where
    T: Default
  {
    self.or_else(T::default)
  }


  /// Flips presence: present becomes absent, and absent becomes present holding `other`.
  #[inline]
  pub fn invert<U>(self, other: U) -> Opt<U> {
    self.invert_with(|| other)
  }

  /// Flips presence: present becomes absent, and absent becomes present holding the value `supplier` produces.
  #[inline]
  pub fn invert_with<U>(self, supplier: impl FnOnce() -> U) -> Opt<U> {
    self.flat_map_or_else(|_| Opt::Absent, || Opt::Present(supplier()))
  }


  /// Pairs the held value with `other`. Absent stays absent.
  #[inline]
  pub fn concat<U>(self, other: U) -> Opt<(T, U)> {
    self.map(|v| (v, other))
  }

  /// Pairs the held value with the value `converter` computes from it. Absent stays absent and `converter` is not
  /// called.
  #[inline]
  pub fn concat_with<U>(self, converter: impl FnOnce(&T) -> U) -> Opt<(T, U)> {
    self.map(|v| {
      let other = converter(&v);
      (v, other)
    })
  }

  /// Pairs the held value with the value held by `other`, present only if both are present.
  #[inline]
  pub fn both<U>(self, other: Opt<U>) -> Opt<(T, U)> {
    match (self, other) {
      (Self::Present(v), Opt::Present(u)) => Opt::Present((v, u)),
      _ => Opt::Absent,
    }
  }

  /// Pairs the held value with the value held by the optional value `converter` computes from it, present only if
  /// both are present. Absent stays absent and `converter` is not called.
  #[inline]
  pub fn both_with<U>(self, converter: impl FnOnce(&T) -> Opt<U>) -> Opt<(T, U)> {
    self.flat_map(|v| converter(&v).map(|u| (v, u)))
  }
}
