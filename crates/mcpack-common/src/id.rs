//! Namespaced identifiers.
//!
//! An [`Identifier`] is the `namespace:path` pair naming a function or a tag.
//! It is the key of the function graph and also appears verbatim inside
//! rendered command text, so malformed values are rejected at construction
//! instead of being repaired later.

use std::cmp::Ordering;
use std::fmt;
use std::iter;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::IdError;

fn is_namespace_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | '-')
}

fn is_path_char(c: char) -> bool {
    is_namespace_char(c) || c == '/'
}

fn validate_namespace(namespace: &str) -> Result<(), IdError> {
    if namespace.is_empty() {
        return Err(IdError::EmptyNamespace);
    }
    match namespace.chars().find(|c| !is_namespace_char(*c)) {
        Some(found) => Err(IdError::InvalidNamespaceChar {
            namespace: namespace.to_string(),
            found,
        }),
        None => Ok(()),
    }
}

fn validate_path(path: &str) -> Result<(), IdError> {
    if path.is_empty() {
        return Err(IdError::EmptyPath);
    }
    match path.chars().find(|c| !is_path_char(*c)) {
        Some(found) => Err(IdError::InvalidPathChar {
            path: path.to_string(),
            found,
        }),
        None => Ok(()),
    }
}

// ── Namespace ──────────────────────────────────────────────────────────

/// A validated namespace, e.g. `minecraft` or `my_pack`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Namespace(String);

impl Namespace {
    /// Create a namespace, rejecting anything outside `[a-z0-9_-]+`.
    pub fn new(name: impl Into<String>) -> Result<Self, IdError> {
        let name = name.into();
        validate_namespace(&name)?;
        Ok(Self(name))
    }

    /// The namespace text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build `namespace:path`.
    pub fn id(&self, path: &str) -> Result<Identifier, IdError> {
        validate_path(path)?;
        Ok(Identifier {
            namespace: self.0.clone(),
            path: path.to_string(),
        })
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Identifier ─────────────────────────────────────────────────────────

/// A namespaced identifier with canonical form `namespace:path`.
///
/// Both halves are validated, and neither may contain `:`, so two
/// identifiers are equal exactly when their canonical strings are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    namespace: String,
    path: String,
}

impl Identifier {
    /// Create an identifier from its two halves.
    pub fn new(namespace: impl Into<String>, path: impl Into<String>) -> Result<Self, IdError> {
        let namespace = namespace.into();
        let path = path.into();
        validate_namespace(&namespace)?;
        validate_path(&path)?;
        Ok(Self { namespace, path })
    }

    /// Parse the canonical `namespace:path` form.
    pub fn parse(text: &str) -> Result<Self, IdError> {
        let mut parts = text.split(':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(namespace), Some(path), None) => Self::new(namespace, path),
            _ => Err(IdError::Format(text.to_string())),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Build `namespace:path/segment`.
    pub fn child(&self, segment: &str) -> Result<Self, IdError> {
        validate_path(segment)?;
        Ok(Self {
            namespace: self.namespace.clone(),
            path: format!("{}/{}", self.path, segment),
        })
    }

    fn canonical_bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.namespace
            .bytes()
            .chain(iter::once(b':'))
            .chain(self.path.bytes())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for Identifier {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// Ordered by canonical string, not field-wise: `a-x:c` sorts before `a:b`.
impl Ord for Identifier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical_bytes().cmp(other.canonical_bytes())
    }
}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ── IdPrefix ───────────────────────────────────────────────────────────

/// Where generated identifiers are placed: directly under a namespace
/// (`ns:child`) or below an existing identifier (`ns:path/child`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdPrefix {
    Namespace(Namespace),
    Identifier(Identifier),
}

impl IdPrefix {
    /// Parse `ns` as a namespace prefix or `ns:path` as an identifier prefix.
    pub fn parse(text: &str) -> Result<Self, IdError> {
        if text.contains(':') {
            Identifier::parse(text).map(IdPrefix::Identifier)
        } else {
            Namespace::new(text).map(IdPrefix::Namespace)
        }
    }

    pub fn child(&self, segment: &str) -> Result<Identifier, IdError> {
        match self {
            IdPrefix::Namespace(ns) => ns.id(segment),
            IdPrefix::Identifier(id) => id.child(segment),
        }
    }
}

impl From<Namespace> for IdPrefix {
    fn from(ns: Namespace) -> Self {
        IdPrefix::Namespace(ns)
    }
}

impl From<Identifier> for IdPrefix {
    fn from(id: Identifier) -> Self {
        IdPrefix::Identifier(id)
    }
}

impl FromStr for IdPrefix {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for IdPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdPrefix::Namespace(ns) => write!(f, "{ns}"),
            IdPrefix::Identifier(id) => write!(f, "{id}"),
        }
    }
}

// ── TagRef ─────────────────────────────────────────────────────────────

/// A reference to a function tag (a group of functions), rendered `#ns:path`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagRef(pub Identifier);

impl fmt::Display for TagRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
