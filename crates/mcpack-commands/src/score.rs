//! Scoreboard objectives and the scores held in them.

use std::fmt;

use mcpack_codegen::Command;

use crate::error::CommandError;
use crate::execute::{Condition, Execute, StoreDestination};
use crate::selector::EntitySelector;
use crate::text::TextComponent;
use crate::types::IntRange;

const MAX_OBJECTIVE_LEN: usize = 16;

/// A scoreboard objective. The name is validated on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Scoreboard {
    objective: String,
    criteria: String,
    display_name: Option<TextComponent>,
}

impl Scoreboard {
    /// A `dummy` objective.
    pub fn new(objective: impl Into<String>) -> Result<Self, CommandError> {
        let objective = objective.into();
        verify_objective(&objective)?;
        Ok(Self {
            objective,
            criteria: "dummy".to_string(),
            display_name: None,
        })
    }

    pub fn with_criteria(mut self, criteria: impl Into<String>) -> Self {
        self.criteria = criteria.into();
        self
    }

    pub fn with_display_name(mut self, name: TextComponent) -> Self {
        self.display_name = Some(name);
        self
    }

    pub fn objective(&self) -> &str {
        &self.objective
    }

    pub fn create(&self) -> Result<Command, CommandError> {
        let mut text = format!(
            "scoreboard objectives add {} {}",
            self.objective, self.criteria
        );
        if let Some(name) = &self.display_name {
            text.push(' ');
            text.push_str(&name.to_json()?);
        }
        Ok(Command::raw(text))
    }

    pub fn remove(&self) -> Command {
        Command::raw(format!("scoreboard objectives remove {}", self.objective))
    }

    /// The score of every entity matched by `target`.
    pub fn entities(&self, target: EntitySelector) -> ScoreHolder {
        ScoreHolder {
            objective: self.objective.clone(),
            target,
        }
    }

    /// The score of a named holder, which need not be a real player.
    pub fn player(&self, name: impl Into<String>) -> ScoreHolder {
        self.entities(EntitySelector::player(name))
    }
}

pub fn verify_objective(objective: &str) -> Result<(), CommandError> {
    if objective.chars().count() > MAX_OBJECTIVE_LEN {
        return Err(CommandError::ObjectiveTooLong(objective.to_string()));
    }
    match objective
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
    {
        Some(found) => Err(CommandError::InvalidObjectiveChar {
            objective: objective.to_string(),
            found,
        }),
        None => Ok(()),
    }
}

/// One objective's score for a selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreHolder {
    objective: String,
    target: EntitySelector,
}

impl ScoreHolder {
    pub fn objective(&self) -> &str {
        &self.objective
    }

    pub fn target(&self) -> &EntitySelector {
        &self.target
    }

    pub fn get(&self) -> Command {
        Command::raw(format!("scoreboard players get {self}"))
    }

    pub fn set(&self, value: i32) -> Command {
        Command::raw(format!("scoreboard players set {self} {value}"))
    }

    pub fn add(&self, value: i32) -> Command {
        Command::raw(format!("scoreboard players add {self} {value}"))
    }

    pub fn remove(&self, value: i32) -> Command {
        Command::raw(format!("scoreboard players remove {self} {value}"))
    }

    pub fn reset(&self) -> Command {
        Command::raw(format!("scoreboard players reset {self}"))
    }

    /// `scoreboard players operation <self> <op> <other>`
    pub fn operation(&self, op: ScoreOp, other: &ScoreHolder) -> Command {
        Command::raw(format!("scoreboard players operation {self} {op} {other}"))
    }

    pub fn assign_score(&self, other: &ScoreHolder) -> Command {
        self.operation(ScoreOp::Assign, other)
    }

    pub fn add_score(&self, other: &ScoreHolder) -> Command {
        self.operation(ScoreOp::Add, other)
    }

    pub fn subtract_score(&self, other: &ScoreHolder) -> Command {
        self.operation(ScoreOp::Subtract, other)
    }

    pub fn multiply_score(&self, other: &ScoreHolder) -> Command {
        self.operation(ScoreOp::Multiply, other)
    }

    pub fn divide_score(&self, other: &ScoreHolder) -> Command {
        self.operation(ScoreOp::Divide, other)
    }

    pub fn modulo_score(&self, other: &ScoreHolder) -> Command {
        self.operation(ScoreOp::Modulo, other)
    }

    /// Store the result of `command` in this score.
    pub fn assign_command(&self, command: impl Into<Command>) -> Command {
        Execute::new().store_result(self).run(command)
    }

    // ── Conditions ─────────────────────────────────────────────────────

    pub fn matches(&self, range: IntRange) -> ScoreCondition {
        ScoreCondition::InRange {
            score: self.clone(),
            range,
        }
    }

    pub fn equal_to(&self, other: impl Into<Operand>) -> ScoreCondition {
        self.compare(Comparison::Equal, other.into())
    }

    pub fn less_than(&self, other: impl Into<Operand>) -> ScoreCondition {
        self.compare(Comparison::Less, other.into())
    }

    pub fn less_than_or_equal(&self, other: impl Into<Operand>) -> ScoreCondition {
        self.compare(Comparison::LessOrEqual, other.into())
    }

    pub fn greater_than(&self, other: impl Into<Operand>) -> ScoreCondition {
        self.compare(Comparison::Greater, other.into())
    }

    pub fn greater_than_or_equal(&self, other: impl Into<Operand>) -> ScoreCondition {
        self.compare(Comparison::GreaterOrEqual, other.into())
    }

    /// Inclusive on both ends.
    pub fn between(&self, min: i32, max: i32) -> ScoreCondition {
        self.matches(IntRange::between(min, max))
    }

    fn compare(&self, op: Comparison, other: Operand) -> ScoreCondition {
        let range = match other {
            Operand::Score(rhs) => {
                return ScoreCondition::Compare {
                    lhs: self.clone(),
                    op,
                    rhs,
                }
            }
            Operand::Value(n) => match op {
                Comparison::Equal => IntRange::exactly(n),
                Comparison::Less => IntRange::at_most(n.saturating_sub(1)),
                Comparison::LessOrEqual => IntRange::at_most(n),
                Comparison::Greater => IntRange::at_least(n.saturating_add(1)),
                Comparison::GreaterOrEqual => IntRange::at_least(n),
            },
        };
        self.matches(range)
    }
}

/// `<selector> <objective>`
impl fmt::Display for ScoreHolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.target, self.objective)
    }
}

impl From<&ScoreHolder> for StoreDestination {
    fn from(score: &ScoreHolder) -> Self {
        StoreDestination::new(format!("score {score}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreOp {
    Assign,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Min,
    Max,
    Swap,
}

impl fmt::Display for ScoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ScoreOp::Assign => "=",
            ScoreOp::Add => "+=",
            ScoreOp::Subtract => "-=",
            ScoreOp::Multiply => "*=",
            ScoreOp::Divide => "/=",
            ScoreOp::Modulo => "%=",
            ScoreOp::Min => "<",
            ScoreOp::Max => ">",
            ScoreOp::Swap => "><",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Less,
    LessOrEqual,
    Equal,
    GreaterOrEqual,
    Greater,
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Comparison::Less => "<",
            Comparison::LessOrEqual => "<=",
            Comparison::Equal => "=",
            Comparison::GreaterOrEqual => ">=",
            Comparison::Greater => ">",
        })
    }
}

/// Right-hand side of a score comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Value(i32),
    Score(ScoreHolder),
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Operand::Value(value)
    }
}

impl From<&ScoreHolder> for Operand {
    fn from(score: &ScoreHolder) -> Self {
        Operand::Score(score.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreCondition {
    InRange {
        score: ScoreHolder,
        range: IntRange,
    },
    Compare {
        lhs: ScoreHolder,
        op: Comparison,
        rhs: ScoreHolder,
    },
}

impl fmt::Display for ScoreCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreCondition::InRange { score, range } => write!(f, "score {score} matches {range}"),
            ScoreCondition::Compare { lhs, op, rhs } => write!(f, "score {lhs} {op} {rhs}"),
        }
    }
}

impl From<ScoreCondition> for Condition {
    fn from(condition: ScoreCondition) -> Self {
        Condition::new(condition.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points() -> Scoreboard {
        Scoreboard::new("points").unwrap()
    }

    #[test]
    fn objective_names_are_validated() {
        assert_eq!(
            Scoreboard::new("a_very_long_objective").unwrap_err(),
            CommandError::ObjectiveTooLong("a_very_long_objective".into())
        );
        assert_eq!(
            Scoreboard::new("has-dash").unwrap_err(),
            CommandError::InvalidObjectiveChar {
                objective: "has-dash".into(),
                found: '-'
            }
        );
        assert!(Scoreboard::new("Kills_2").is_ok());
    }

    #[test]
    fn objective_commands() {
        let board = points().with_criteria("playerKillCount");
        assert_eq!(
            board.create().unwrap().plain_text().as_deref(),
            Some("scoreboard objectives add points playerKillCount")
        );
        assert_eq!(
            board.remove().plain_text().as_deref(),
            Some("scoreboard objectives remove points")
        );
        let named = points().with_display_name(TextComponent::plain("Points"));
        assert_eq!(
            named.create().unwrap().plain_text().as_deref(),
            Some(r#"scoreboard objectives add points dummy {"text":"Points"}"#)
        );
    }

    #[test]
    fn player_score_commands() {
        let me = points().entities(EntitySelector::executor());
        let total = points().player("#total");
        assert_eq!(me.set(3).plain_text().as_deref(), Some("scoreboard players set @s points 3"));
        assert_eq!(me.add(1).plain_text().as_deref(), Some("scoreboard players add @s points 1"));
        assert_eq!(
            total.add_score(&me).plain_text().as_deref(),
            Some("scoreboard players operation #total points += @s points")
        );
        assert_eq!(
            total.operation(ScoreOp::Swap, &me).plain_text().as_deref(),
            Some("scoreboard players operation #total points >< @s points")
        );
    }

    #[test]
    fn comparisons_against_numbers_become_ranges() {
        let me = points().entities(EntitySelector::executor());
        assert_eq!(me.greater_than(5).to_string(), "score @s points matches 6..");
        assert_eq!(me.less_than(5).to_string(), "score @s points matches ..4");
        assert_eq!(me.equal_to(0).to_string(), "score @s points matches 0");
        assert_eq!(me.between(1, 3).to_string(), "score @s points matches 1..3");
    }

    #[test]
    fn comparisons_against_scores() {
        let me = points().entities(EntitySelector::executor());
        let best = points().player("#best");
        assert_eq!(
            me.greater_than_or_equal(&best).to_string(),
            "score @s points >= #best points"
        );
    }

    #[test]
    fn assign_command_stores_result() {
        let count = points().player("#count");
        let command = count.assign_command("execute if entity @e[type=minecraft:pig]");
        assert_eq!(
            command.plain_text().as_deref(),
            Some(
                "execute store result score #count points run execute if entity \
                 @e[type=minecraft:pig]"
            )
        );
    }
}
