//! Wildcard patterns accepted by `Container::collect`.

use crate::core::TypeTag;
use crate::error::{Error, Result};

/// What `collect` searches for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Search {
  /// A string pattern containing exactly one `*`.
  Pattern(String),
  /// Every class binding whose class is-a the given type.
  Type(TypeTag),
}

impl Search {
  pub fn of<T: ?Sized + 'static>() -> Self {
    Search::Type(TypeTag::of::<T>())
  }
}

impl From<&str> for Search {
  fn from(pattern: &str) -> Self {
    Search::Pattern(pattern.to_owned())
  }
}

impl From<String> for Search {
  fn from(pattern: String) -> Self {
    Search::Pattern(pattern)
  }
}

impl From<TypeTag> for Search {
  fn from(tag: TypeTag) -> Self {
    Search::Type(tag)
  }
}

/// A parsed single-wildcard pattern: `Pre*`, `*Suf` or `Pre*Suf`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Wildcard<'a> {
  prefix: &'a str,
  suffix: &'a str,
}

impl<'a> Wildcard<'a> {
  pub(crate) fn parse(pattern: &'a str) -> Result<Self> {
    let mut parts = pattern.split('*');
    match (parts.next(), parts.next(), parts.next()) {
      (Some(prefix), Some(suffix), None) => Ok(Self { prefix, suffix }),
      _ => Err(Error::InvalidSearchPattern(pattern.to_owned())),
    }
  }

  /// Prefix and suffix are checked independently and may overlap.
  pub(crate) fn matches(&self, candidate: &str) -> bool {
    candidate.starts_with(self.prefix) && candidate.ends_with(self.suffix)
  }
}
