//! Conversions between [`Opt`] and [`Option`], iteration, and serde support.

use super::Opt;

impl<T> From<Option<T>> for Opt<T> {
  #[inline]
  fn from(option: Option<T>) -> Self {
    match option {
      Some(v) => Self::Present(v),
      None => Self::Absent,
    }
  }
}

impl<T> From<Opt<T>> for Option<T> {
  #[inline]
  fn from(opt: Opt<T>) -> Self {
    opt.into_option()
  }
}

impl<T> Opt<T> {
  #[inline]
  pub fn into_option(self) -> Option<T> {
    match self {
      Self::Present(v) => Some(v),
      Self::Absent => None,
    }
  }

  /// Iterates over the held value: one item if present, none if absent.
  #[inline]
  pub fn iter(&self) -> std::option::IntoIter<&T> {
    self.value().into_iter()
  }
}

impl<T> IntoIterator for Opt<T> {
  type Item = T;
  type IntoIter = std::option::IntoIter<T>;
  #[inline]
  fn into_iter(self) -> Self::IntoIter { self.into_option().into_iter() }
}

impl<'a, T> IntoIterator for &'a Opt<T> {
  type Item = &'a T;
  type IntoIter = std::option::IntoIter<&'a T>;
  #[inline]
  fn into_iter(self) -> Self::IntoIter { self.iter() }
}


/// Serializes exactly like [`Option`]: absent as `none`, present as `some(value)`.
#[cfg(feature = "serde")]
mod serde_impls {
  use serde::{Deserialize, Deserializer, Serialize, Serializer};

  use super::Opt;

  impl<T: Serialize> Serialize for Opt<T> {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
      self.value().serialize(serializer)
    }
  }

  impl<'de, T: Deserialize<'de>> Deserialize<'de> for Opt<T> {
    #[inline]
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
      Option::<T>::deserialize(deserializer).map(Opt::from)
    }
  }
}
