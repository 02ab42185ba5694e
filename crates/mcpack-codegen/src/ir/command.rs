//! Command nodes.
//!
//! A [`Command`] is a sequence of text and function parts. Commands without
//! function parts are pure text; a function part makes the command
//! contextual: rendering it through a
//! [`BuildContext`](crate::build::BuildContext) registers the function for
//! discovery and leaves a reference in the rendered line.

use std::fmt;

use super::function::FunctionHandle;

#[derive(Debug, Clone)]
pub enum Part {
    Text(String),
    Function(FunctionHandle),
}

#[derive(Debug, Clone, Default)]
pub struct Command {
    parts: Vec<Part>,
}

impl Command {
    pub fn new() -> Self {
        Self::default()
    }

    /// A pure command, taken verbatim.
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part::Text(text.into())],
        }
    }

    /// A pure command written over several source lines: every newline
    /// followed by indentation is removed.
    pub fn from_multiline(text: &str) -> Self {
        Self::raw(collapse_multiline(text))
    }

    /// `# <text>`
    pub fn comment(text: &str) -> Self {
        Self::raw(format!("# {text}"))
    }

    pub fn text(mut self, text: impl AsRef<str>) -> Self {
        self.push_text(text.as_ref());
        self
    }

    pub fn function(mut self, function: &FunctionHandle) -> Self {
        self.push_function(function);
        self
    }

    /// Append all parts of `other`.
    pub fn then(mut self, other: Command) -> Self {
        for part in other.parts {
            match part {
                Part::Text(text) => self.push_text(&text),
                function => self.parts.push(function),
            }
        }
        self
    }

    pub fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.parts.last_mut() {
            Some(Part::Text(last)) => last.push_str(text),
            _ => self.parts.push(Part::Text(text.to_string())),
        }
    }

    pub fn push_function(&mut self, function: &FunctionHandle) {
        self.parts.push(Part::Function(function.clone()));
    }

    /// In-place [`then`](Self::then).
    pub fn extend(&mut self, other: Command) {
        let this = std::mem::take(self);
        *self = this.then(other);
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn is_pure(&self) -> bool {
        self.parts.iter().all(|part| matches!(part, Part::Text(_)))
    }

    /// The text of a pure command; `None` if it embeds a function.
    pub fn plain_text(&self) -> Option<String> {
        let mut out = String::new();
        for part in &self.parts {
            match part {
                Part::Text(text) => out.push_str(text),
                Part::Function(_) => return None,
            }
        }
        Some(out)
    }
}

impl From<&str> for Command {
    fn from(text: &str) -> Self {
        Command::raw(text)
    }
}

impl From<String> for Command {
    fn from(text: String) -> Self {
        Command::raw(text)
    }
}

/// Shows function parts by label; identifiers are only known after a build.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.parts {
            match part {
                Part::Text(text) => f.write_str(text)?,
                Part::Function(function) => write!(f, "<{}>", function.label())?,
            }
        }
        Ok(())
    }
}

fn collapse_multiline(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\n' && chars.peek().is_some_and(|next| next.is_whitespace()) {
            while chars.peek().is_some_and(|next| next.is_whitespace()) {
                chars.next();
            }
            continue;
        }
        out.push(c);
    }
    out
}

/// Build a pure command with `format!` syntax, collapsing indented
/// continuation lines.
///
/// ```
/// use mcpack_codegen::cmd;
/// let points = 3;
/// let command = cmd!("execute as @a[tag=winner,
///     limit=1] run scoreboard players add @s points {points}");
/// assert_eq!(
///     command.plain_text().as_deref(),
///     Some("execute as @a[tag=winner,limit=1] run scoreboard players add @s points 3")
/// );
/// ```
#[macro_export]
macro_rules! cmd {
    ($($arg:tt)*) => {
        $crate::ir::Command::from_multiline(&::std::format!($($arg)*))
    };
}
