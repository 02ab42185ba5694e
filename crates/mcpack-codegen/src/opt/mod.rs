//! Whole-program passes over the named function map.
//!
//! [`rename`](rename::rename) turns the discovered graph into a
//! [`FunctionTextMap`]; [`optimize`] then runs the inlining passes and the
//! dead sweep in order:
//!
//! 1. execute-call inlining of one-line functions
//! 2. whole-body inlining of functions referenced once
//! 3. removal of unreferenced functions
//!
//! By default the passes run once. With [`OptimizeOptions::fixpoint`] they
//! repeat until a round changes nothing, bounded by [`MAX_FIXPOINT_ROUNDS`].

pub mod inline;
pub mod rename;

use serde::{Deserialize, Serialize};

use crate::text_map::FunctionTextMap;

pub use inline::{eliminate_dead, inline_execute_calls, inline_single_references};
pub use rename::{clean_label, rename};

/// Upper bound on optimization rounds when iterating to a fixed point.
pub const MAX_FIXPOINT_ROUNDS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizeOptions {
    /// Run the two inlining passes.
    pub inline: bool,
    /// Remove eligible functions with no remaining references.
    pub eliminate_dead: bool,
    /// Repeat the passes until nothing changes.
    pub fixpoint: bool,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            inline: true,
            eliminate_dead: true,
            fixpoint: false,
        }
    }
}

impl OptimizeOptions {
    /// Keep every discovered function as written.
    pub fn none() -> Self {
        Self {
            inline: false,
            eliminate_dead: false,
            fixpoint: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OptimizeStats {
    /// `execute ... run function` call sites rewritten in place.
    pub execute_inlined: usize,
    /// Functions substituted into their single call site.
    pub bodies_inlined: usize,
    /// Functions removed as unreferenced, including those whose body was
    /// substituted into their only call site.
    pub removed: usize,
    pub rounds: usize,
}

impl OptimizeStats {
    fn absorb(&mut self, round: OptimizeStats) {
        self.execute_inlined += round.execute_inlined;
        self.bodies_inlined += round.bodies_inlined;
        self.removed += round.removed;
    }

    fn changed(&self) -> bool {
        self.execute_inlined + self.bodies_inlined + self.removed > 0
    }
}

pub fn optimize(map: &mut FunctionTextMap, options: &OptimizeOptions) -> OptimizeStats {
    let mut total = OptimizeStats::default();
    let max_rounds = if options.fixpoint { MAX_FIXPOINT_ROUNDS } else { 1 };

    let mut settled = false;
    while total.rounds < max_rounds {
        let round = run_round(map, options);
        total.rounds += 1;
        tracing::debug!(
            round = total.rounds,
            execute_inlined = round.execute_inlined,
            bodies_inlined = round.bodies_inlined,
            removed = round.removed,
            "optimization round"
        );
        total.absorb(round);
        if !round.changed() {
            settled = true;
            break;
        }
    }

    if options.fixpoint && !settled {
        tracing::debug!(rounds = total.rounds, "stopped before reaching a fixed point");
    }
    total
}

fn run_round(map: &mut FunctionTextMap, options: &OptimizeOptions) -> OptimizeStats {
    let mut stats = OptimizeStats::default();
    if options.inline {
        stats.execute_inlined = inline_execute_calls(map);
        stats.bodies_inlined = inline_single_references(map);
    }
    if options.eliminate_dead {
        stats.removed = eliminate_dead(map);
    }
    stats
}
