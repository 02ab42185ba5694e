//! Function declarations.
//!
//! A [`Function`] is created anonymously and shared through a
//! [`FunctionHandle`]. Its identity is the allocation behind the handle, so
//! the same declaration reached from many call sites is discovered once.
//! The body lives behind a `RefCell` so a function can be created first and
//! filled in later, which is how recursive functions refer to themselves.

use std::cell::{Cell, Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use mcpack_common::Identifier;

use super::command::Command;

pub type FunctionHandle = Rc<Function>;

/// How `schedule function` treats an already scheduled call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScheduleMode {
    Append,
    #[default]
    Replace,
}

impl fmt::Display for ScheduleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleMode::Append => f.write_str("append"),
            ScheduleMode::Replace => f.write_str("replace"),
        }
    }
}

pub struct Function {
    label: String,
    commands: RefCell<Vec<Command>>,
    on_load: Cell<bool>,
    on_tick: Cell<bool>,
}

impl Function {
    /// Create an empty function. The label becomes its generated name
    /// unless it is registered under an explicit identifier.
    pub fn new(label: impl Into<String>) -> FunctionHandle {
        Rc::new(Self {
            label: label.into(),
            commands: RefCell::new(Vec::new()),
            on_load: Cell::new(false),
            on_tick: Cell::new(false),
        })
    }

    pub fn with_commands(
        label: impl Into<String>,
        commands: impl IntoIterator<Item = Command>,
    ) -> FunctionHandle {
        let function = Self::new(label);
        function.set_commands(commands);
        function
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replace the body.
    pub fn set_commands(&self, commands: impl IntoIterator<Item = Command>) {
        *self.commands.borrow_mut() = commands.into_iter().collect();
    }

    pub fn push(&self, command: impl Into<Command>) {
        self.commands.borrow_mut().push(command.into());
    }

    pub fn extend(&self, commands: impl IntoIterator<Item = Command>) {
        self.commands.borrow_mut().extend(commands);
    }

    pub fn commands(&self) -> Ref<'_, Vec<Command>> {
        self.commands.borrow()
    }

    pub fn set_on_load(&self, on_load: bool) -> &Self {
        self.on_load.set(on_load);
        self
    }

    pub fn set_on_tick(&self, on_tick: bool) -> &Self {
        self.on_tick.set(on_tick);
        self
    }

    pub fn runs_on_load(&self) -> bool {
        self.on_load.get()
    }

    pub fn runs_on_tick(&self) -> bool {
        self.on_tick.get()
    }

    // ── Call builders ──────────────────────────────────────────────────

    /// `function <id>`
    pub fn run(self: &Rc<Self>) -> Command {
        Command::raw("function ").function(self)
    }

    /// `schedule function <id> <delay> <mode>`
    pub fn schedule(self: &Rc<Self>, delay: impl fmt::Display, mode: ScheduleMode) -> Command {
        Command::raw("schedule function ")
            .function(self)
            .text(format!(" {delay} {mode}"))
    }

    /// `schedule clear <id>`
    pub fn schedule_clear(self: &Rc<Self>) -> Command {
        Command::raw("schedule clear ").function(self)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("label", &self.label)
            .field("commands", &self.commands.borrow().len())
            .field("on_load", &self.on_load.get())
            .field("on_tick", &self.on_tick.get())
            .finish()
    }
}

/// `function <id>` for a function defined outside this build.
pub fn run_id(id: &Identifier) -> Command {
    Command::raw(format!("function {id}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_can_be_set_after_creation() {
        let looping = Function::new("loop");
        looping.push("say tick");
        looping.push(looping.schedule("1t", ScheduleMode::Append));
        assert_eq!(looping.commands().len(), 2);
        assert_eq!(
            looping.commands()[1].to_string(),
            "schedule function <loop> 1t append"
        );
    }

    #[test]
    fn flags_default_off() {
        let f = Function::new("f");
        assert!(!f.runs_on_load());
        assert!(!f.runs_on_tick());
        f.set_on_load(true).set_on_tick(true);
        assert!(f.runs_on_load());
        assert!(f.runs_on_tick());
    }

    #[test]
    fn schedule_clear_and_run_id() {
        let f = Function::new("timer");
        assert_eq!(f.schedule_clear().to_string(), "schedule clear <timer>");
        let id = Identifier::parse("other:thing").unwrap();
        assert_eq!(run_id(&id).plain_text().as_deref(), Some("function other:thing"));
    }

    #[test]
    fn default_schedule_mode_is_replace() {
        assert_eq!(ScheduleMode::default().to_string(), "replace");
    }
}
