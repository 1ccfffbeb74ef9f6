use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

use opt_core::{Error, Opt};

/// Hierarchical key: a non-empty sequence of name segments, joined by [`NodeKey::DELIMITER`].
///
/// The key one segment shorter is the [parent](Self::parent) key. Equality, ordering, and hashing only consider the
/// joined form, so keys built in different ways compare equal when they render the same.
///
/// A key and all of its ancestors share one joined string and one table of segment end offsets; an ancestor is the
/// same buffer viewed with fewer segments.
#[derive(Clone)]
pub struct NodeKey {
  joined: Arc<str>,
  /// Byte offset in `joined` where each segment ends.
  ends: Arc<[usize]>,
  /// Number of segments in this key, in `1..=ends.len()`.
  len: usize,
}

impl NodeKey {
  /// Delimiter used to join segments, and the default delimiter when parsing.
  pub const DELIMITER: &'static str = ":";

  /// Creates a single-segment key.
  ///
  /// # Errors
  ///
  /// Returns [`Error::InvalidArgument`] if `name` is empty or contains [`Self::DELIMITER`].
  #[inline]
  pub fn root(name: impl Into<String>) -> Result<Self, Error> {
    Self::from_segments([name.into()])
  }

  /// Creates a key with `name` appended to this key.
  ///
  /// # Errors
  ///
  /// Returns [`Error::InvalidArgument`] if `name` is empty or contains [`Self::DELIMITER`].
  pub fn child(&self, name: impl Into<String>) -> Result<Self, Error> {
    let name = name.into();
    Self::check_segment(&name)?;
    let mut joined = String::with_capacity(self.as_str().len() + Self::DELIMITER.len() + name.len());
    joined.push_str(self.as_str());
    joined.push_str(Self::DELIMITER);
    joined.push_str(&name);
    let mut ends = Vec::with_capacity(self.len + 1);
    ends.extend_from_slice(&self.ends[..self.len]);
    ends.push(joined.len());
    Ok(Self::from_parts(joined, ends))
  }

  /// Parses `s`, split on [`Self::DELIMITER`]. Empty segments, from repeated or surrounding delimiters, are dropped.
  ///
  /// # Errors
  ///
  /// Returns [`Error::InvalidArgument`] if `s` has no non-empty segments.
  #[inline]
  pub fn parse(s: &str) -> Result<Self, Error> {
    Self::parse_with(s, Self::DELIMITER)
  }

  /// Parses `s`, split on `delimiter`. The resulting key is still joined with [`Self::DELIMITER`].
  ///
  /// # Errors
  ///
  /// Returns [`Error::InvalidArgument`] if `delimiter` is empty, if `s` has no non-empty segments, or if a segment
  /// contains [`Self::DELIMITER`].
  pub fn parse_with(s: &str, delimiter: &str) -> Result<Self, Error> {
    if delimiter.is_empty() {
      return Err(Error::InvalidArgument("key delimiter must not be empty"));
    }
    Self::from_segments(s.split(delimiter).filter(|segment| !segment.is_empty()))
  }

  /// Creates a key from `segments`, outermost first.
  ///
  /// # Errors
  ///
  /// Returns [`Error::InvalidArgument`] if there are no segments, or if a segment is empty or contains
  /// [`Self::DELIMITER`].
  pub fn from_segments<S: Into<String>>(segments: impl IntoIterator<Item=S>) -> Result<Self, Error> {
    let mut joined = String::new();
    let mut ends = Vec::new();
    for segment in segments {
      let segment = segment.into();
      Self::check_segment(&segment)?;
      if !ends.is_empty() {
        joined.push_str(Self::DELIMITER);
      }
      joined.push_str(&segment);
      ends.push(joined.len());
    }
    if ends.is_empty() {
      return Err(Error::InvalidArgument("key must have at least one segment"));
    }
    Ok(Self::from_parts(joined, ends))
  }

  fn check_segment(name: &str) -> Result<(), Error> {
    if name.is_empty() {
      return Err(Error::InvalidArgument("key segment must not be empty"));
    }
    if name.contains(Self::DELIMITER) {
      return Err(Error::InvalidArgument("key segment must not contain the delimiter"));
    }
    Ok(())
  }

  #[inline]
  fn from_parts(joined: String, ends: Vec<usize>) -> Self {
    let len = ends.len();
    Self { joined: joined.into(), ends: ends.into(), len }
  }


  /// Last segment of this key.
  #[inline]
  pub fn name(&self) -> &str { self.segment(self.len - 1) }

  /// Joined form of this key.
  #[inline]
  pub fn as_str(&self) -> &str { &self.joined[..self.ends[self.len - 1]] }

  /// Key one segment shorter, absent for single-segment keys. Shares storage with this key.
  #[inline]
  pub fn parent(&self) -> Opt<NodeKey> {
    if self.is_root() {
      return Opt::Absent;
    }
    Opt::Present(Self { joined: Arc::clone(&self.joined), ends: Arc::clone(&self.ends), len: self.len - 1 })
  }

  #[inline]
  pub fn is_root(&self) -> bool { self.len == 1 }

  /// Iterates over this key and its ancestors, innermost first.
  #[inline]
  pub fn ancestors(&self) -> impl Iterator<Item=NodeKey> {
    std::iter::successors(Some(self.clone()), |key| key.parent().into_option())
  }

  /// Segments of this key, outermost first.
  pub fn segments(&self) -> Vec<&str> {
    (0..self.len).map(|index| self.segment(index)).collect()
  }

  /// Number of segments, at least 1.
  #[inline]
  pub fn segment_count(&self) -> usize { self.len }

  fn segment(&self, index: usize) -> &str {
    let start = match index {
      0 => 0,
      _ => self.ends[index - 1] + Self::DELIMITER.len(),
    };
    &self.joined[start..self.ends[index]]
  }
}

impl PartialEq for NodeKey {
  #[inline]
  fn eq(&self, other: &Self) -> bool { self.as_str() == other.as_str() }
}
impl Eq for NodeKey {}

impl Hash for NodeKey {
  #[inline]
  fn hash<H: Hasher>(&self, state: &mut H) { self.as_str().hash(state) }
}

impl PartialOrd for NodeKey {
  #[inline]
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}
impl Ord for NodeKey {
  #[inline]
  fn cmp(&self, other: &Self) -> Ordering { self.as_str().cmp(other.as_str()) }
}

impl Debug for NodeKey {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.debug_tuple("NodeKey").field(&self.as_str()).finish()
  }
}
impl Display for NodeKey {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for NodeKey {
  type Err = Error;
  #[inline]
  fn from_str(s: &str) -> Result<Self, Self::Err> { Self::parse(s) }
}

impl AsRef<str> for NodeKey {
  #[inline]
  fn as_ref(&self) -> &str { self.as_str() }
}

/// Serializes as the joined form; deserializing parses and validates it.
#[cfg(feature = "serde")]
mod serde_impls {
  use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

  use super::NodeKey;

  impl Serialize for NodeKey {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
      serializer.serialize_str(self.as_str())
    }
  }

  impl<'de> Deserialize<'de> for NodeKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
      let s = String::deserialize(deserializer)?;
      NodeKey::parse(&s).map_err(de::Error::custom)
    }
  }
}
