//! NBT data holders and paths for `/data` and `execute store`.

use std::fmt;

use mcpack_codegen::Command;
use mcpack_common::Identifier;

use crate::execute::{Execute, StoreDestination};
use crate::score::ScoreHolder;
use crate::selector::EntitySelector;
use crate::types::Coordinate;

/// Something that owns NBT: an entity, a block entity or a storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NbtHolder {
    Entity(EntitySelector),
    Block(Coordinate),
    Storage(Identifier),
}

impl NbtHolder {
    /// `entity`, `block` or `storage`, as used by `/data` and text components.
    pub fn kind(&self) -> &'static str {
        match self {
            NbtHolder::Entity(_) => "entity",
            NbtHolder::Block(_) => "block",
            NbtHolder::Storage(_) => "storage",
        }
    }

    /// The holder's selector without the kind keyword.
    pub fn selector(&self) -> String {
        match self {
            NbtHolder::Entity(selector) => selector.to_string(),
            NbtHolder::Block(position) => position.to_string(),
            NbtHolder::Storage(id) => id.to_string(),
        }
    }

    pub fn path(&self, path: impl Into<String>) -> NbtPath {
        NbtPath {
            holder: self.clone(),
            path: path.into(),
        }
    }
}

/// `<kind> <selector>`
impl fmt::Display for NbtHolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.selector())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericType {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl fmt::Display for NumericType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NumericType::Byte => "byte",
            NumericType::Short => "short",
            NumericType::Int => "int",
            NumericType::Long => "long",
            NumericType::Float => "float",
            NumericType::Double => "double",
        })
    }
}

/// A path inside a holder's NBT, e.g. `Inventory[0].Count`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NbtPath {
    holder: NbtHolder,
    path: String,
}

impl NbtPath {
    pub fn holder(&self) -> &NbtHolder {
        &self.holder
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn get(&self, scale: f64) -> Command {
        Command::raw(format!("data get {} {} {scale}", self.holder, self.path))
    }

    /// `data modify ... set value <snbt>`
    pub fn set_value(&self, snbt: &str) -> Command {
        Command::raw(format!(
            "data modify {} {} set value {snbt}",
            self.holder, self.path
        ))
    }

    /// `data modify ... set from <other>`
    pub fn set_from(&self, other: &NbtPath) -> Command {
        Command::raw(format!(
            "data modify {} {} set from {} {}",
            self.holder, self.path, other.holder, other.path
        ))
    }

    pub fn remove(&self) -> Command {
        Command::raw(format!("data remove {} {}", self.holder, self.path))
    }

    pub fn store_destination(&self, data_type: NumericType, scale: f64) -> StoreDestination {
        StoreDestination::new(format!("{} {} {data_type} {scale}", self.holder, self.path))
    }

    /// Copy a score into this path.
    pub fn assign_score(&self, score: &ScoreHolder, data_type: NumericType, scale: f64) -> Command {
        Execute::new()
            .store_result(self.store_destination(data_type, scale))
            .run(score.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::Scoreboard;

    fn storage() -> NbtHolder {
        NbtHolder::Storage(Identifier::parse("ns:vars").unwrap())
    }

    #[test]
    fn data_commands() {
        let health = NbtHolder::Entity(EntitySelector::executor()).path("Health");
        assert_eq!(
            health.get(1.0).plain_text().as_deref(),
            Some("data get entity @s Health 1")
        );

        let slot = storage().path("slot");
        assert_eq!(
            slot.set_value("{id:\"minecraft:stone\"}").plain_text().as_deref(),
            Some("data modify storage ns:vars slot set value {id:\"minecraft:stone\"}")
        );

        let chest = NbtHolder::Block(Coordinate::absolute(0.0, 64.0, 0.0, false)).path("Items[0]");
        assert_eq!(
            slot.set_from(&chest).plain_text().as_deref(),
            Some("data modify storage ns:vars slot set from block 0 64 0 Items[0]")
        );
    }

    #[test]
    fn store_score_into_nbt() {
        let score = Scoreboard::new("vars").unwrap().player("#x");
        let value = storage().path("x");
        assert_eq!(
            value.assign_score(&score, NumericType::Int, 1.0).plain_text().as_deref(),
            Some("execute store result storage ns:vars x int 1 run scoreboard players get #x vars")
        );
    }
}
