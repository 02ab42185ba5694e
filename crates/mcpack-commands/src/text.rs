//! JSON text components and `/tellraw`.
//!
//! Components serialize with serde; unset fields are omitted so the output
//! matches what the game writes itself.

use mcpack_codegen::Command;
use serde::Serialize;

use crate::error::CommandError;
use crate::nbt::{NbtHolder, NbtPath};
use crate::score::ScoreHolder;
use crate::selector::EntitySelector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClickEvent {
    pub action: &'static str,
    pub value: String,
}

impl ClickEvent {
    pub fn open_url(url: impl Into<String>) -> Self {
        Self::new("open_url", url.into())
    }

    pub fn run_command(command: impl Into<String>) -> Self {
        Self::new("run_command", command.into())
    }

    pub fn suggest_command(command: impl Into<String>) -> Self {
        Self::new("suggest_command", command.into())
    }

    pub fn change_page(page: u32) -> Self {
        Self::new("change_page", page.to_string())
    }

    pub fn copy_to_clipboard(text: impl Into<String>) -> Self {
        Self::new("copy_to_clipboard", text.into())
    }

    fn new(action: &'static str, value: String) -> Self {
        Self { action, value }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreContent {
    pub name: String,
    pub objective: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TextComponent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with: Option<Vec<TextComponent>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<ScoreContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keybind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpret: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator: Option<Box<TextComponent>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underlined: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obfuscated: Option<bool>,
    /// Inserted into chat on shift-click.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insertion: Option<String>,
    #[serde(rename = "clickEvent", skip_serializing_if = "Option::is_none")]
    pub click_event: Option<ClickEvent>,
    /// Appended after this component's own content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<Vec<TextComponent>>,
}

impl TextComponent {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn translated(key: impl Into<String>, with: Vec<TextComponent>) -> Self {
        Self {
            translate: Some(key.into()),
            with: (!with.is_empty()).then_some(with),
            ..Self::default()
        }
    }

    pub fn score(score: &ScoreHolder) -> Self {
        Self {
            score: Some(ScoreContent {
                name: score.target().to_string(),
                objective: score.objective().to_string(),
                value: None,
            }),
            ..Self::default()
        }
    }

    pub fn entity_names(entity: &EntitySelector, separator: Option<TextComponent>) -> Self {
        Self {
            selector: Some(entity.to_string()),
            separator: separator.map(Box::new),
            ..Self::default()
        }
    }

    pub fn keybind(key: impl Into<String>) -> Self {
        Self {
            keybind: Some(key.into()),
            ..Self::default()
        }
    }

    pub fn nbt(path: &NbtPath, interpret: bool) -> Self {
        let mut component = Self {
            nbt: Some(path.path().to_string()),
            interpret: interpret.then_some(true),
            ..Self::default()
        };
        let selector = Some(path.holder().selector());
        match path.holder() {
            NbtHolder::Entity(_) => component.entity = selector,
            NbtHolder::Block(_) => component.block = selector,
            NbtHolder::Storage(_) => component.storage = selector,
        }
        component
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = Some(true);
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = Some(true);
        self
    }

    pub fn on_click(mut self, event: ClickEvent) -> Self {
        self.click_event = Some(event);
        self
    }

    pub fn append(mut self, component: TextComponent) -> Self {
        self.extra.get_or_insert_with(Vec::new).push(component);
        self
    }

    pub fn to_json(&self) -> Result<String, CommandError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// `tellraw <target> <message>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tellraw {
    pub target: EntitySelector,
    pub message: TextComponent,
}

impl Tellraw {
    pub fn new(target: EntitySelector, message: TextComponent) -> Self {
        Self { target, message }
    }

    pub fn to_command(&self) -> Result<Command, CommandError> {
        Ok(Command::raw(format!(
            "tellraw {} {}",
            self.target,
            self.message.to_json()?
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::Scoreboard;
    use insta::assert_snapshot;
    use mcpack_common::Identifier;

    #[test]
    fn unset_fields_are_omitted() {
        let json = TextComponent::plain("hi").color(Color::DarkRed).bold().to_json().unwrap();
        assert_snapshot!(json, @r#"{"text":"hi","color":"dark_red","bold":true}"#);
    }

    #[test]
    fn score_and_extra() {
        let kills = Scoreboard::new("kills").unwrap().entities(EntitySelector::executor());
        let json = TextComponent::plain("Kills: ")
            .append(TextComponent::score(&kills))
            .on_click(ClickEvent::run_command("/trigger stats"))
            .to_json()
            .unwrap();
        assert_snapshot!(json, @r#"{"text":"Kills: ","clickEvent":{"action":"run_command","value":"/trigger stats"},"extra":[{"score":{"name":"@s","objective":"kills"}}]}"#);
    }

    #[test]
    fn nbt_component_names_its_holder_kind() {
        let path = NbtHolder::Storage(Identifier::parse("ns:ui").unwrap()).path("title");
        let json = TextComponent::nbt(&path, true).to_json().unwrap();
        assert_snapshot!(json, @r#"{"nbt":"title","storage":"ns:ui","interpret":true}"#);
    }

    #[test]
    fn tellraw_command() {
        let command = Tellraw::new(EntitySelector::all_players(), TextComponent::plain("hello"))
            .to_command()
            .unwrap();
        assert_eq!(
            command.plain_text().as_deref(),
            Some(r#"tellraw @a {"text":"hello"}"#)
        );
    }
}
