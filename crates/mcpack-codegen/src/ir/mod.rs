//! Declaration-side IR: commands, function declarations and rendered lines.

pub mod command;
pub mod function;
pub mod line;

pub use command::{Command, Part};
pub use function::{run_id, Function, FunctionHandle, ScheduleMode};
pub use line::{trim_body, FunctionKey, Line, Segment};
