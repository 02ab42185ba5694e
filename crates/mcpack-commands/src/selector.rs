//! Entity selectors: `@s`, `@p`, `@a`, `@e` with `[...]` arguments, or a
//! bare player name.

use std::fmt;

use crate::error::CommandError;
use crate::execute::Condition;
use crate::tag::ScoreboardTag;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySelector {
    variable: String,
    clauses: Vec<String>,
}

impl EntitySelector {
    fn variable(variable: &str) -> Self {
        Self {
            variable: variable.to_string(),
            clauses: Vec::new(),
        }
    }

    /// `@s`
    pub fn executor() -> Self {
        Self::variable("@s")
    }

    /// `@p`
    pub fn nearest_player() -> Self {
        Self::variable("@p")
    }

    /// `@a`
    pub fn all_players() -> Self {
        Self::variable("@a")
    }

    /// `@e`
    pub fn all_entities() -> Self {
        Self::variable("@e")
    }

    /// A player name or UUID. Accepts no clauses.
    pub fn player(name: impl Into<String>) -> Self {
        Self {
            variable: name.into(),
            clauses: Vec::new(),
        }
    }

    /// Parse `@a[limit=1,tag=x]` or a player name.
    pub fn parse(text: &str) -> Self {
        if !text.starts_with('@') {
            return Self::player(text);
        }
        match text.split_once('[') {
            Some((variable, rest)) => {
                let args = rest.strip_suffix(']').unwrap_or(rest);
                Self {
                    variable: variable.to_string(),
                    clauses: args
                        .split(',')
                        .filter(|clause| !clause.is_empty())
                        .map(str::to_string)
                        .collect(),
                }
            }
            None => Self::variable(text),
        }
    }

    pub fn is_player_name(&self) -> bool {
        !self.variable.starts_with('@')
    }

    /// Add a raw `key=value` argument.
    pub fn clause(mut self, clause: impl Into<String>) -> Result<Self, CommandError> {
        let clause = clause.into();
        if self.is_player_name() {
            return Err(CommandError::ClauseOnPlayerName {
                player: self.variable,
                clause,
            });
        }
        self.clauses.push(clause);
        Ok(self)
    }

    pub fn limit(self, count: u32) -> Result<Self, CommandError> {
        self.clause(format!("limit={count}"))
    }

    pub fn entity_type(self, entity_type: &str) -> Result<Self, CommandError> {
        self.clause(format!("type={entity_type}"))
    }

    pub fn has_tag(self, tag: &ScoreboardTag) -> Result<Self, CommandError> {
        self.clause(format!("tag={}", tag.name()))
    }

    pub fn without_tag(self, tag: &ScoreboardTag) -> Result<Self, CommandError> {
        self.clause(format!("tag=!{}", tag.name()))
    }

    pub fn sort(self, order: SortOrder) -> Result<Self, CommandError> {
        self.clause(format!("sort={order}"))
    }

    /// `entity <selector>`, true while the selector matches anything.
    pub fn exists(&self) -> Condition {
        Condition::new(format!("entity {self}"))
    }
}

impl fmt::Display for EntitySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.variable)?;
        if !self.is_player_name() && !self.clauses.is_empty() {
            write!(f, "[{}]", self.clauses.join(","))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Nearest,
    Furthest,
    Random,
    Arbitrary,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortOrder::Nearest => "nearest",
            SortOrder::Furthest => "furthest",
            SortOrder::Random => "random",
            SortOrder::Arbitrary => "arbitrary",
        })
    }
}
