pub mod manifest;
pub mod output;

// Re-export key types for convenience.
pub use manifest::Manifest;
pub use output::write_output;
