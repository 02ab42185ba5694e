//! The `execute` command builder.
//!
//! Subcommands are collected as text; [`Execute::run`] appends the final
//! command with its parts intact, so `execute ... run function <f>` keeps the
//! function reference and the inliner can recognise the call.

use std::fmt;

use mcpack_codegen::Command;

use crate::selector::EntitySelector;

/// The argument of an `if` or `unless` subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition(String);

impl Condition {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The target of a `store result` or `store success` subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreDestination(String);

impl StoreDestination {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl fmt::Display for StoreDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Execute {
    subcommands: Vec<String>,
}

impl Execute {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a subcommand verbatim.
    pub fn raw(mut self, subcommand: impl Into<String>) -> Self {
        self.subcommands.push(subcommand.into());
        self
    }

    pub fn as_(self, target: &EntitySelector) -> Self {
        self.raw(format!("as {target}"))
    }

    pub fn at(self, target: &EntitySelector) -> Self {
        self.raw(format!("at {target}"))
    }

    pub fn if_(self, condition: impl Into<Condition>) -> Self {
        self.raw(format!("if {}", condition.into()))
    }

    pub fn unless(self, condition: impl Into<Condition>) -> Self {
        self.raw(format!("unless {}", condition.into()))
    }

    pub fn store_result(self, destination: impl Into<StoreDestination>) -> Self {
        self.raw(format!("store result {}", destination.into()))
    }

    pub fn store_success(self, destination: impl Into<StoreDestination>) -> Self {
        self.raw(format!("store success {}", destination.into()))
    }

    /// Finish with `run <command>`.
    pub fn run(&self, command: impl Into<Command>) -> Command {
        Command::raw(format!("{self} run ")).then(command.into())
    }
}

impl fmt::Display for Execute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("execute")?;
        for subcommand in &self.subcommands {
            write!(f, " {subcommand}")?;
        }
        Ok(())
    }
}

/// An `execute` without `run`, used for its condition result.
impl From<Execute> for Command {
    fn from(execute: Execute) -> Self {
        Command::raw(execute.to_string())
    }
}
