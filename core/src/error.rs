use thiserror::Error;

/// Error raised synchronously when a call violates a presence invariant.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Error)]
pub enum Error {
  #[error("Invalid argument: {0}")]
  InvalidArgument(&'static str),
}

impl Error {
  #[inline]
  pub fn is_invalid_argument(&self) -> bool {
    matches!(self, Self::InvalidArgument(_))
  }
}
