//! Role-tagged text transforms and the default normalization chains.
//!
//! A transform wraps a pure, total `&str -> String` function. The key/value
//! role is metadata only: both roles behave identically, the tag just keeps a
//! value transform out of the key chain and vice versa.

use std::fmt;

/// Whether a transform belongs to the key chain or the value chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformRole {
    Key,
    Value,
}

impl TransformRole {
    /// Returns the string representation of this role.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::Key => "key",
            Self::Value => "value",
        }
    }
}

impl fmt::Display for TransformRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type TransformFn = Box<dyn Fn(&str) -> String + Send + Sync>;

/// A named normalization step applied to every surviving pair.
///
/// The wrapped function must be total and side-effect free; a panicking
/// closure is a programmer error and propagates out of `parse`.
pub struct Transform {
    role: TransformRole,
    f: TransformFn,
}

impl Transform {
    /// Create a key-chain transform.
    #[must_use]
    pub fn key(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self {
            role: TransformRole::Key,
            f: Box::new(f),
        }
    }

    /// Create a value-chain transform.
    #[must_use]
    pub fn value(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self {
            role: TransformRole::Value,
            f: Box::new(f),
        }
    }

    /// The chain this transform belongs to.
    #[must_use]
    pub const fn role(&self) -> TransformRole {
        self.role
    }

    /// Apply the wrapped function. Pure invocation, no validation.
    #[must_use]
    pub fn process(&self, input: &str) -> String {
        (self.f)(input)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform")
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// The default key chain, in its documented order:
/// strip `*` characters, strip one leading `-`, strip a leading
/// list-numbering prefix. Each step trims the result.
///
/// The order is part of the observable contract; reordering changes output
/// on keys like `-12. Term`.
#[must_use]
pub fn default_key_transforms() -> Vec<Transform> {
    vec![
        Transform::key(|key| key.replace('*', "").trim().to_string()),
        Transform::key(|key| key.strip_prefix('-').unwrap_or(key).trim().to_string()),
        Transform::key(strip_list_numbering),
    ]
}

/// The default value chain: trim surrounding whitespace only.
#[must_use]
pub fn default_value_transforms() -> Vec<Transform> {
    vec![Transform::value(|val| val.trim().to_string())]
}

/// Remove a leading `<digits>. ` prefix, as left behind by numbered lists.
fn strip_list_numbering(key: &str) -> String {
    let rest = key.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() < key.len() {
        if let Some(stripped) = rest.strip_prefix(". ") {
            return stripped.trim().to_string();
        }
    }
    key.trim().to_string()
}
