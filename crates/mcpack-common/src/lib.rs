//! Shared types for the mcpack datapack generator.
//!
//! - [`id`]: namespaced identifiers, identifier prefixes and tag references
//! - [`error`]: identifier and build errors, plus non-fatal diagnostics

pub mod error;
pub mod id;

pub use error::{BuildError, Diagnostic, DiagnosticKind, IdError, Severity};
pub use id::{IdPrefix, Identifier, Namespace, TagRef};
