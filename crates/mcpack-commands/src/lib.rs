//! Typed builders for the commands datapacks use most.
//!
//! Everything here produces [`mcpack_codegen::Command`]s. Builders that can
//! wrap another command (`execute ... run`, `execute store`) keep the
//! wrapped command's function references, so the optimizer still sees
//! `execute ... run function <f>` calls built this way.

pub mod allocator;
pub mod error;
pub mod execute;
pub mod nbt;
pub mod score;
pub mod selector;
pub mod tag;
pub mod text;
pub mod types;

pub use allocator::ScoreAllocator;
pub use error::CommandError;
pub use execute::{Condition, Execute, StoreDestination};
pub use nbt::{NbtHolder, NbtPath, NumericType};
pub use score::{Comparison, Operand, ScoreCondition, ScoreHolder, ScoreOp, Scoreboard};
pub use selector::{EntitySelector, SortOrder};
pub use tag::ScoreboardTag;
pub use text::{ClickEvent, Color, Tellraw, TextComponent};
pub use types::{Coordinate, Duration, DurationUnit, FloatRange, IntRange};
