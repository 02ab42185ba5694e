//! Function graph building and optimization for mcpack datapacks.
//!
//! Callers declare functions as lists of [`Command`](ir::Command)s. Commands
//! may embed other functions, which are discovered while rendering, so only
//! the explicitly registered entry points need to be named by hand.
//!
//! ## Architecture
//!
//! - [`ir`]: commands, function declarations and rendered lines
//! - [`build`]: the build context and the discovery work queue
//! - [`opt`]: naming of discovered functions, inlining and dead removal
//! - [`emit`]: output file layout
//! - [`datapack`]: the registration API tying the stages together
//!
//! ## Pipeline
//!
//! ```text
//! Datapack -> BuildContext -> FunctionGraph -> FunctionTextMap -> optimize -> files
//! ```

pub mod build;
pub mod datapack;
pub mod emit;
pub mod ir;
pub mod opt;
pub mod text_map;

pub use datapack::{BuildOptions, BuildOutput, Datapack, TagEntry};
pub use emit::PackMeta;
pub use ir::{run_id, Command, Function, FunctionHandle, ScheduleMode};
pub use opt::{OptimizeOptions, OptimizeStats};
