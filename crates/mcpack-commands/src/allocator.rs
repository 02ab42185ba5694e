//! Temporary and constant scores on a shared objective.

use mcpack_codegen::Command;
use rustc_hash::FxHashSet;

use crate::score::{ScoreHolder, Scoreboard};

/// Hands out fresh temporaries (`A_0`, `A_1`, ...) and constant holders
/// (`C_<n>`). Each constant's initialisation command is recorded once and
/// belongs in a load function.
#[derive(Debug, Clone)]
pub struct ScoreAllocator {
    scoreboard: Scoreboard,
    prefix: String,
    constant_prefix: String,
    next: usize,
    constants: FxHashSet<i32>,
    init_constants: Vec<Command>,
}

impl ScoreAllocator {
    pub fn new(scoreboard: Scoreboard) -> Self {
        Self::with_prefixes(scoreboard, "A_", "C_")
    }

    pub fn with_prefixes(
        scoreboard: Scoreboard,
        prefix: impl Into<String>,
        constant_prefix: impl Into<String>,
    ) -> Self {
        Self {
            scoreboard,
            prefix: prefix.into(),
            constant_prefix: constant_prefix.into(),
            next: 0,
            constants: FxHashSet::default(),
            init_constants: Vec::new(),
        }
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// A score no earlier call has returned.
    pub fn score(&mut self) -> ScoreHolder {
        let name = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        self.scoreboard.player(name)
    }

    /// A score holding `value` once the init commands have run.
    pub fn constant(&mut self, value: i32) -> ScoreHolder {
        let score = self
            .scoreboard
            .player(format!("{}{value}", self.constant_prefix));
        if self.constants.insert(value) {
            self.init_constants.push(score.set(value));
        }
        score
    }

    pub fn init_constants(&self) -> &[Command] {
        &self.init_constants
    }
}
