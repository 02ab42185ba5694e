//! Function graph building.
//!
//! Rendering a command can discover new functions, so the builder drains a
//! work queue to a fixed point:
//!
//! 1. Explicit declarations (and load/tick roots) are seeded in order.
//! 2. The oldest queued declaration is popped and its commands rendered.
//!    Every function part is looked up in the discovery set; unseen
//!    declarations get the next [`FunctionKey`] and join the queue.
//! 3. The rendered lines are recorded as a [`FunctionNode`].
//!
//! A declaration is queued at most once per identity, so cycles terminate
//! and a function reachable from many call sites is rendered once.

pub mod graph;

use std::collections::VecDeque;
use std::rc::Rc;

use mcpack_common::{Diagnostic, DiagnosticKind, Identifier};
use rustc_hash::FxHashMap;

use crate::ir::{Command, FunctionHandle, FunctionKey, Line, Part};

pub use graph::{FunctionGraph, FunctionNode};

struct Discovered {
    function: FunctionHandle,
    explicit: Option<Identifier>,
}

/// Per-build discovery state threaded through every render call.
#[derive(Default)]
pub struct BuildContext {
    queue: VecDeque<FunctionKey>,
    /// Declaration identity (allocation address) to key.
    seen: FxHashMap<usize, FunctionKey>,
    /// Keeps every discovered declaration alive, indexed by key.
    discovered: Vec<Discovered>,
    diagnostics: Vec<Diagnostic>,
}

impl BuildContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function for rendering if it has not been seen yet and
    /// return its key.
    pub fn discover(&mut self, function: &FunctionHandle) -> FunctionKey {
        let identity = Rc::as_ptr(function) as usize;
        if let Some(key) = self.seen.get(&identity) {
            return *key;
        }
        let key = FunctionKey(self.discovered.len() as u32);
        self.seen.insert(identity, key);
        self.discovered.push(Discovered {
            function: function.clone(),
            explicit: None,
        });
        self.queue.push_back(key);
        key
    }

    /// Seed an explicitly registered function under its caller-chosen id.
    pub fn seed_explicit(&mut self, id: Identifier, function: &FunctionHandle) -> FunctionKey {
        let key = self.discover(function);
        self.discovered[key.index()].explicit = Some(id);
        key
    }

    /// Number of distinct declarations discovered so far.
    pub fn discovered_count(&self) -> usize {
        self.discovered.len()
    }

    pub fn key_of(&self, function: &FunctionHandle) -> Option<FunctionKey> {
        self.seen.get(&(Rc::as_ptr(function) as usize)).copied()
    }

    /// Render one command into one or more lines (embedded newlines split
    /// lines). `owner` names the function being rendered in diagnostics.
    pub fn render(&mut self, command: &Command, owner: &str) -> Vec<Line> {
        let mut lines = Vec::new();
        let mut current = Line::new();
        for part in command.parts() {
            match part {
                Part::Text(text) => {
                    let mut pieces = text.split('\n');
                    if let Some(first) = pieces.next() {
                        current.push_text(first);
                    }
                    for piece in pieces {
                        lines.push(std::mem::take(&mut current));
                        current.push_text(piece);
                    }
                }
                Part::Function(function) => {
                    let key = self.discover(function);
                    current.push_ref(key);
                }
            }
        }
        lines.push(current);

        for line in &lines {
            if line.starts_with("/") {
                self.report(Diagnostic::warning(
                    DiagnosticKind::LeadingSlash(command.to_string()),
                    owner,
                ));
            }
        }
        lines
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(function = %diagnostic.function, "{}", diagnostic.kind);
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    fn pop(&mut self) -> Option<(FunctionKey, FunctionHandle, Option<Identifier>)> {
        let key = self.queue.pop_front()?;
        let entry = &self.discovered[key.index()];
        Some((key, entry.function.clone(), entry.explicit.clone()))
    }
}

/// Drain the context's work queue, rendering every reachable function once.
pub fn build_graph(ctx: &mut BuildContext) -> FunctionGraph {
    let mut graph = FunctionGraph::new();

    while let Some((key, function, explicit)) = ctx.pop() {
        let owner = match &explicit {
            Some(id) => id.to_string(),
            None => function.label().to_string(),
        };

        let mut lines = Vec::new();
        for command in function.commands().iter() {
            lines.extend(ctx.render(command, &owner));
        }

        graph.add_node(FunctionNode {
            key,
            label: function.label().to_string(),
            explicit,
            lines,
            on_load: function.runs_on_load(),
            on_tick: function.runs_on_tick(),
        });
    }

    tracing::debug!(functions = graph.len(), "function graph built");
    graph
}
