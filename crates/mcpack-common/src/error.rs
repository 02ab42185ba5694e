use std::fmt;

use serde::Serialize;

use crate::id::Identifier;

// ── Identifier errors ──────────────────────────────────────────────────

/// Why a namespace or identifier was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The text is not of the form `namespace:path`.
    Format(String),
    EmptyNamespace,
    EmptyPath,
    /// A namespace character outside `[a-z0-9_-]`.
    InvalidNamespaceChar { namespace: String, found: char },
    /// A path character outside `[a-z0-9_\-/]`.
    InvalidPathChar { path: String, found: char },
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format(text) => write!(
                f,
                "invalid identifier {text:?}: must be in the format \"namespace:path\""
            ),
            Self::EmptyNamespace => write!(f, "identifier namespace is empty"),
            Self::EmptyPath => write!(f, "identifier path is empty"),
            Self::InvalidNamespaceChar { namespace, found } => write!(
                f,
                "invalid namespace {namespace:?}: found {found:?}, namespaces must only contain \
                 lowercase letters, numbers, dashes, and underscores"
            ),
            Self::InvalidPathChar { path, found } => write!(
                f,
                "invalid path {path:?}: found {found:?}, paths must only contain lowercase \
                 letters, numbers, underscores, dashes, and forward-slashes"
            ),
        }
    }
}

impl std::error::Error for IdError {}

// ── Build errors ───────────────────────────────────────────────────────

/// A fatal error that stops registration or a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// Two explicit functions were registered under the same identifier.
    DuplicateFunction(Identifier),
    /// One function handle was registered under two identifiers.
    AliasedFunction { first: Identifier, second: Identifier },
    /// Anonymous functions were discovered but no internal prefix is set,
    /// so they cannot be named.
    MissingInternalPrefix { label: String },
    /// An identifier could not be constructed.
    Id(IdError),
    /// A generated JSON file could not be serialized.
    Serialize(String),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateFunction(id) => write!(f, "function {id} already exists"),
            Self::AliasedFunction { first, second } => write!(
                f,
                "function {first} cannot also be registered as {second}"
            ),
            Self::MissingInternalPrefix { label } => write!(
                f,
                "anonymous function {label:?} needs a name but no internal prefix is configured"
            ),
            Self::Id(err) => write!(f, "{err}"),
            Self::Serialize(msg) => write!(f, "failed to serialize output: {msg}"),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Id(err) => Some(err),
            _ => None,
        }
    }
}

impl From<IdError> for BuildError {
    fn from(err: IdError) -> Self {
        Self::Id(err)
    }
}

// ── Diagnostics ────────────────────────────────────────────────────────

/// A non-fatal problem noticed during a build.
///
/// Diagnostics are collected rather than aborting; generation proceeds with
/// the offending text unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    /// Label or identifier of the function the problem was found in.
    pub function: String,
}

impl Diagnostic {
    pub fn warning(kind: DiagnosticKind, function: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            kind,
            function: function.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => f.write_str("warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DiagnosticKind {
    /// A command line starts with `/`, which function files do not accept.
    LeadingSlash(String),
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LeadingSlash(line) => write!(
                f,
                "command {line:?} starts with a slash, which is invalid syntax in datapack functions"
            ),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in {}: {}", self.severity, self.function, self.kind)
    }
}
