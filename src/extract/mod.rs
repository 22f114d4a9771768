//! Entity assemblers: one per entity kind.
//!
//! Every assembler follows the same steps:
//! 1. read icons from the menu files, keyed by source name;
//! 2. read the raw records from the kind's source files;
//! 3. join icons onto records by name, then switch to the public id;
//! 4. apply the patch for that id;
//! 5. validate by deserializing into the typed model.
//!
//! Each step records problems in [`Diagnostics`] and moves on to the next
//! entity, so one malformed input costs exactly that entity.

pub mod actions;
pub mod events;
pub mod game_values;

pub use actions::{assemble_actions, ActionsByCategory};
pub use events::assemble_events;
pub use game_values::assemble_game_values;

use crate::diagnostics::{Accumulator, Diagnostics};
use crate::model::{EntityId, EntityName, Icon};
use crate::normalize::remove_comments;
use crate::patch::{PatchRecord, ICON_FIELD};
use crate::source::SourceFile;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// What an assembler hands back: the valid entities, every icon it could
/// build (keyed by source name), and what went wrong along the way.
#[derive(Debug, Clone, Default)]
pub struct Assembled<T> {
    pub entities: T,
    pub icons: BTreeMap<EntityName, Icon>,
    pub diagnostics: Diagnostics,
}

type IconExtractor = fn(&str, &mut Diagnostics) -> Vec<(EntityName, Icon)>;

/// Runs `extract` over every menu file and gathers the icons by name.
fn collect_icons(
    menu_files: &[SourceFile],
    extract: IconExtractor,
    diagnostics: &mut Diagnostics,
) -> BTreeMap<EntityName, Icon> {
    let mut icons = Accumulator::new();
    for file in menu_files {
        let text = remove_comments(&file.contents);
        for (name, icon) in extract(&text, diagnostics) {
            icons.insert(name, &file.name, icon, diagnostics);
        }
    }
    icons.into_map()
}

/// The icon as it joins an extracted record: re-keyed to the public id.
fn icon_field(icon: &Icon, id: &EntityId) -> Option<Value> {
    let mut icon = icon.clone();
    icon.id = id.clone();
    serde_json::to_value(icon).ok()
}

/// Copies `fields` from the merged icon onto the record, unless the patch
/// set them itself. Empty lists are not copied.
fn promote_icon_fields(
    merged: &mut PatchRecord,
    patch: &PatchRecord,
    fields: &[&str],
) {
    let Some(Value::Object(icon)) = merged.get(ICON_FIELD).cloned() else {
        return;
    };
    for &field in fields {
        if patch.contains_key(field) {
            continue;
        }
        match icon.get(field) {
            Some(Value::Array(items)) if items.is_empty() => {}
            Some(Value::Null) | None => {}
            Some(value) => {
                merged.insert(field.to_string(), value.clone());
            }
        }
    }
}

/// Splits the icon off a merged record and validates both halves.
///
/// An invalid entity is an error and is left out; an invalid icon only warns.
fn validate<T: DeserializeOwned>(
    id: &EntityId,
    mut merged: PatchRecord,
    label: &str,
    diagnostics: &mut Diagnostics,
) -> (Option<T>, Option<Icon>) {
    let icon = match merged.remove(ICON_FIELD) {
        // A patch-only icon does not repeat the entity id.
        Some(Value::Object(mut icon)) => {
            icon.insert("id".into(), json!(id));
            match serde_json::from_value::<Icon>(Value::Object(icon)) {
                Ok(icon) => Some(icon),
                Err(e) => {
                    diagnostics.warn(id.as_str(), format!("invalid icon: {e}"));
                    None
                }
            }
        }
        Some(other) => {
            diagnostics.warn(id.as_str(), format!("icon must be an object, got {other}"));
            None
        }
        None => None,
    };

    let entity = match serde_json::from_value::<T>(Value::Object(merged)) {
        Ok(entity) => Some(entity),
        Err(e) => {
            diagnostics.error(id.as_str(), format!("invalid {label}: {e}"));
            None
        }
    };

    (entity, icon)
}
