use mcpack_codegen::Command;

use crate::selector::EntitySelector;

/// A scoreboard tag attached to entities with `/tag`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScoreboardTag(String);

impl ScoreboardTag {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn add(&self, target: &EntitySelector) -> Command {
        Command::raw(format!("tag {target} add {}", self.0))
    }

    pub fn remove(&self, target: &EntitySelector) -> Command {
        Command::raw(format!("tag {target} remove {}", self.0))
    }

    pub fn list(target: &EntitySelector) -> Command {
        Command::raw(format!("tag {target} list"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_commands() {
        let tag = ScoreboardTag::new("winner");
        let everyone = EntitySelector::all_players();
        assert_eq!(
            tag.add(&everyone).plain_text().as_deref(),
            Some("tag @a add winner")
        );
        assert_eq!(
            tag.remove(&everyone).plain_text().as_deref(),
            Some("tag @a remove winner")
        );
        assert_eq!(
            ScoreboardTag::list(&EntitySelector::executor()).plain_text().as_deref(),
            Some("tag @s list")
        );
    }
}
