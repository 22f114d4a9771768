//! Typed public schema of the data package.
//!
//! These are the shapes written to `data/*.json` and to the icon collections.
//! Extraction builds loosely-typed JSON records first; a record only becomes
//! one of these types after patches are applied, so deserialization here is
//! also the final required-field validation (e.g. a `list` without an
//! `elementType` never makes it into the output).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier an entity is declared under in the plugin source (`PlayerSendMessage`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityName(String);

impl EntityName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Id used for an icon whose entity never got a public id.
    pub fn fallback_id(&self) -> EntityId {
        EntityId::new(self.0.to_lowercase())
    }
}

impl fmt::Display for EntityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Public identifier of an entity (`player_send_message`); the join key for patches.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

///////////////////////////////////////////////////////////////////////////////

/// Kinds of values a game value can hold or an argument can accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Number,
    Text,
    Item,
    Block,
    Location,
    Vector,
    Sound,
    Particle,
    Potion,
    /// Only accepts variables holding a list
    List,
    /// Only accepts variables holding a dictionary
    Dictionary,
}

impl ValueType {
    pub const ALL: [ValueType; 11] = [
        ValueType::Number,
        ValueType::Text,
        ValueType::Item,
        ValueType::Block,
        ValueType::Location,
        ValueType::Vector,
        ValueType::Sound,
        ValueType::Particle,
        ValueType::Potion,
        ValueType::List,
        ValueType::Dictionary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Number => "number",
            ValueType::Text => "text",
            ValueType::Item => "item",
            ValueType::Block => "block",
            ValueType::Location => "location",
            ValueType::Vector => "vector",
            ValueType::Sound => "sound",
            ValueType::Particle => "particle",
            ValueType::Potion => "potion",
            ValueType::List => "list",
            ValueType::Dictionary => "dictionary",
        }
    }

    /// Exact (already lowercased) match against the public vocabulary.
    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == token)
    }
}

/// Everything an action argument may be typed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgumentType {
    Number,
    Text,
    Item,
    Block,
    Location,
    Vector,
    Sound,
    Particle,
    Potion,
    List,
    Dictionary,
    Variable,
    Any,
    Union,
    Enum,
}

impl ArgumentType {
    pub const ALL: [ArgumentType; 15] = [
        ArgumentType::Number,
        ArgumentType::Text,
        ArgumentType::Item,
        ArgumentType::Block,
        ArgumentType::Location,
        ArgumentType::Vector,
        ArgumentType::Sound,
        ArgumentType::Particle,
        ArgumentType::Potion,
        ArgumentType::List,
        ArgumentType::Dictionary,
        ArgumentType::Variable,
        ArgumentType::Any,
        ArgumentType::Union,
        ArgumentType::Enum,
    ];

    pub fn as_str(&self) -> &'static str {
        match self.value_type() {
            Some(value_type) => value_type.as_str(),
            None => match self {
                ArgumentType::Variable => "variable",
                ArgumentType::Any => "any",
                ArgumentType::Union => "union",
                _ => "enum",
            },
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == token)
    }

    pub fn value_type(&self) -> Option<ValueType> {
        Some(match self {
            ArgumentType::Number => ValueType::Number,
            ArgumentType::Text => ValueType::Text,
            ArgumentType::Item => ValueType::Item,
            ArgumentType::Block => ValueType::Block,
            ArgumentType::Location => ValueType::Location,
            ArgumentType::Vector => ValueType::Vector,
            ArgumentType::Sound => ValueType::Sound,
            ArgumentType::Particle => ValueType::Particle,
            ArgumentType::Potion => ValueType::Potion,
            ArgumentType::List => ValueType::List,
            ArgumentType::Dictionary => ValueType::Dictionary,
            ArgumentType::Variable
            | ArgumentType::Any
            | ArgumentType::Union
            | ArgumentType::Enum => return None,
        })
    }
}

impl From<ValueType> for ArgumentType {
    fn from(value: ValueType) -> Self {
        match value {
            ValueType::Number => ArgumentType::Number,
            ValueType::Text => ArgumentType::Text,
            ValueType::Item => ArgumentType::Item,
            ValueType::Block => ArgumentType::Block,
            ValueType::Location => ArgumentType::Location,
            ValueType::Vector => ArgumentType::Vector,
            ValueType::Sound => ArgumentType::Sound,
            ValueType::Particle => ArgumentType::Particle,
            ValueType::Potion => ArgumentType::Potion,
            ValueType::List => ArgumentType::List,
            ValueType::Dictionary => ArgumentType::Dictionary,
        }
    }
}

/// Size of the numbers a number argument accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberSize {
    Int,
    Long,
    Float,
    Double,
}

///////////////////////////////////////////////////////////////////////////////

/// Human-authored fields. Extraction never fills these; only patches do.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationDefault {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f64,
    pub pitch: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorDefault {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundDefault {
    pub id: String,
    pub volume: f64,
    pub pitch: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleDefault {
    pub id: String,
    pub count: u32,
    pub spread: [f64; 2],
    pub motion: VectorDefault,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PotionDefault {
    #[serde(rename = "type")]
    pub kind: String,
    pub duration: u32,
    pub amplifier: u32,
}

/// One argument slot group of an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionArgument {
    pub id: String,
    /// Occupies several repeated slot groups in the action menu.
    #[serde(default)]
    pub plural: bool,
    #[serde(rename = "valueSlots")]
    pub value_slots: Vec<u32>,
    #[serde(flatten)]
    pub kind: ArgumentKind,
    #[serde(flatten)]
    pub metadata: Metadata,
}

impl ActionArgument {
    pub fn argument_type(&self) -> ArgumentType {
        self.kind.argument_type()
    }
}

/// Type-specific part of an argument. `Enum` has no description slots at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ArgumentKind {
    Number {
        description_slots: Vec<u32>,
        size: NumberSize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_value: Option<f64>,
    },
    Text {
        description_slots: Vec<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_value: Option<String>,
    },
    Item {
        description_slots: Vec<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_value: Option<String>,
    },
    Block {
        description_slots: Vec<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_value: Option<String>,
    },
    Location {
        description_slots: Vec<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_value: Option<LocationDefault>,
    },
    Vector {
        description_slots: Vec<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_value: Option<VectorDefault>,
    },
    Sound {
        description_slots: Vec<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_value: Option<SoundDefault>,
    },
    Particle {
        description_slots: Vec<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_value: Option<ParticleDefault>,
    },
    Potion {
        description_slots: Vec<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_value: Option<PotionDefault>,
    },
    List {
        description_slots: Vec<u32>,
        element_type: ValueType,
    },
    Dictionary {
        description_slots: Vec<u32>,
        key_type: ValueType,
        value_type: ValueType,
    },
    Variable {
        description_slots: Vec<u32>,
    },
    Any {
        description_slots: Vec<u32>,
    },
    /// Only ever written by patches; the action menu cannot express a union.
    Union {
        description_slots: Vec<u32>,
        types: Vec<ArgumentType>,
    },
    Enum {
        values: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_value: Option<String>,
    },
}

impl ArgumentKind {
    pub fn argument_type(&self) -> ArgumentType {
        match self {
            ArgumentKind::Number { .. } => ArgumentType::Number,
            ArgumentKind::Text { .. } => ArgumentType::Text,
            ArgumentKind::Item { .. } => ArgumentType::Item,
            ArgumentKind::Block { .. } => ArgumentType::Block,
            ArgumentKind::Location { .. } => ArgumentType::Location,
            ArgumentKind::Vector { .. } => ArgumentType::Vector,
            ArgumentKind::Sound { .. } => ArgumentType::Sound,
            ArgumentKind::Particle { .. } => ArgumentType::Particle,
            ArgumentKind::Potion { .. } => ArgumentType::Potion,
            ArgumentKind::List { .. } => ArgumentType::List,
            ArgumentKind::Dictionary { .. } => ArgumentType::Dictionary,
            ArgumentKind::Variable { .. } => ArgumentType::Variable,
            ArgumentKind::Any { .. } => ArgumentType::Any,
            ArgumentKind::Union { .. } => ArgumentType::Union,
            ArgumentKind::Enum { .. } => ArgumentType::Enum,
        }
    }

    pub fn description_slots(&self) -> Option<&[u32]> {
        match self {
            ArgumentKind::Number { description_slots, .. }
            | ArgumentKind::Text { description_slots, .. }
            | ArgumentKind::Item { description_slots, .. }
            | ArgumentKind::Block { description_slots, .. }
            | ArgumentKind::Location { description_slots, .. }
            | ArgumentKind::Vector { description_slots, .. }
            | ArgumentKind::Sound { description_slots, .. }
            | ArgumentKind::Particle { description_slots, .. }
            | ArgumentKind::Potion { description_slots, .. }
            | ArgumentKind::List { description_slots, .. }
            | ArgumentKind::Dictionary { description_slots, .. }
            | ArgumentKind::Variable { description_slots }
            | ArgumentKind::Any { description_slots }
            | ArgumentKind::Union { description_slots, .. } => Some(description_slots),
            ArgumentKind::Enum { .. } => None,
        }
    }
}

///////////////////////////////////////////////////////////////////////////////

/// Action categories in match priority order.
///
/// `controller` comes first because `control` is a prefix of it. Declaration
/// order is also the key order of the published actions object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionCategory {
    Controller,
    Player,
    IfPlayer,
    Entity,
    IfEntity,
    Game,
    IfGame,
    Control,
    SetVariable,
    IfVariable,
    Select,
    Repeat,
    Else,
    CallFunction,
    StartProcess,
    Empty,
}

impl ActionCategory {
    pub const PRIORITY: [ActionCategory; 16] = [
        ActionCategory::Controller,
        ActionCategory::Player,
        ActionCategory::IfPlayer,
        ActionCategory::Entity,
        ActionCategory::IfEntity,
        ActionCategory::Game,
        ActionCategory::IfGame,
        ActionCategory::Control,
        ActionCategory::SetVariable,
        ActionCategory::IfVariable,
        ActionCategory::Select,
        ActionCategory::Repeat,
        ActionCategory::Else,
        ActionCategory::CallFunction,
        ActionCategory::StartProcess,
        ActionCategory::Empty,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionCategory::Controller => "controller",
            ActionCategory::Player => "player",
            ActionCategory::IfPlayer => "if_player",
            ActionCategory::Entity => "entity",
            ActionCategory::IfEntity => "if_entity",
            ActionCategory::Game => "game",
            ActionCategory::IfGame => "if_game",
            ActionCategory::Control => "control",
            ActionCategory::SetVariable => "set_variable",
            ActionCategory::IfVariable => "if_variable",
            ActionCategory::Select => "select",
            ActionCategory::Repeat => "repeat",
            ActionCategory::Else => "else",
            ActionCategory::CallFunction => "call_function",
            ActionCategory::StartProcess => "start_process",
            ActionCategory::Empty => "empty",
        }
    }

    /// First category in priority order whose name prefixes `id`.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::PRIORITY
            .into_iter()
            .find(|category| id.starts_with(category.as_str()))
    }

    /// Shape an action of this category has unless a patch says otherwise.
    pub fn default_type(&self) -> ActionType {
        match self {
            ActionCategory::IfPlayer
            | ActionCategory::IfEntity
            | ActionCategory::IfGame
            | ActionCategory::IfVariable
            | ActionCategory::Else
            | ActionCategory::Controller
            | ActionCategory::Repeat => ActionType::Container,
            _ => ActionType::Basic,
        }
    }
}

impl fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Action with arguments
    Basic,
    /// Action without arguments executing a conditional operation
    BasicWithConditional,
    /// Action with arguments wrapping child actions
    Container,
    /// Action without arguments wrapping child actions run only when its condition holds
    ContainerWithConditional,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Basic => "basic",
            ActionType::BasicWithConditional => "basic_with_conditional",
            ActionType::Container => "container",
            ActionType::ContainerWithConditional => "container_with_conditional",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub id: EntityId,
    pub category: ActionCategory,
    #[serde(flatten)]
    pub shape: ActionShape,
    #[serde(flatten)]
    pub metadata: Metadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionShape {
    /// `args` are filled in after validation, so a record may omit them.
    Basic {
        #[serde(default)]
        args: Vec<ActionArgument>,
    },
    BasicWithConditional,
    Container {
        #[serde(default)]
        args: Vec<ActionArgument>,
    },
    ContainerWithConditional,
}

impl ActionShape {
    pub fn action_type(&self) -> ActionType {
        match self {
            ActionShape::Basic { .. } => ActionType::Basic,
            ActionShape::BasicWithConditional => ActionType::BasicWithConditional,
            ActionShape::Container { .. } => ActionType::Container,
            ActionShape::ContainerWithConditional => ActionType::ContainerWithConditional,
        }
    }

    pub fn args(&self) -> &[ActionArgument] {
        match self {
            ActionShape::Basic { args } | ActionShape::Container { args } => args,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EntityId,
    /// Category label of the trigger menu the event is listed in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub cancellable: bool,
    #[serde(
        rename = "worksWith",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub works_with: Vec<String>,
    #[serde(
        rename = "additionalInfo",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub additional_info: Vec<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameValue {
    pub id: EntityId,
    #[serde(flatten)]
    pub kind: GameValueKind,
    #[serde(
        rename = "worksWith",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub works_with: Vec<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum GameValueKind {
    Number,
    Text,
    Item,
    Block,
    Location,
    Vector,
    Sound,
    Particle,
    Potion,
    List {
        element_type: ValueType,
    },
    Dictionary {
        key_type: ValueType,
        value_type: ValueType,
    },
}

impl GameValueKind {
    pub fn value_type(&self) -> ValueType {
        match self {
            GameValueKind::Number => ValueType::Number,
            GameValueKind::Text => ValueType::Text,
            GameValueKind::Item => ValueType::Item,
            GameValueKind::Block => ValueType::Block,
            GameValueKind::Location => ValueType::Location,
            GameValueKind::Vector => ValueType::Vector,
            GameValueKind::Sound => ValueType::Sound,
            GameValueKind::Particle => ValueType::Particle,
            GameValueKind::Potion => ValueType::Potion,
            GameValueKind::List { .. } => ValueType::List,
            GameValueKind::Dictionary { .. } => ValueType::Dictionary,
        }
    }
}

///////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconKind {
    Action,
    Event,
    GameValue,
}

fn default_amount() -> u32 {
    1
}

/// What the icon renderer needs to draw one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Icon {
    pub id: EntityId,
    #[serde(rename = "type")]
    pub kind: IconKind,
    pub material: String,
    #[serde(default = "default_amount")]
    pub amount: u32,
    #[serde(default)]
    pub has_glint: bool,
    /// Skin texture hash, only for `PLAYER_HEAD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub works_with: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellable: Option<bool>,
}
