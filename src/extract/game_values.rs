use super::{collect_icons, icon_field, promote_icon_fields, validate, Assembled};
use crate::classify::value_type_from_internal;
use crate::diagnostics::{Accumulator, Diagnostics};
use crate::icons::extract_game_value_icons;
use crate::model::{EntityId, EntityName, GameValue};
use crate::normalize::remove_comments;
use crate::patch::{merge, PatchRecord, Patches, ICON_FIELD};
use crate::patterns::rules::REGISTERED_GAME_VALUE;
use crate::source::SourceFile;
use serde_json::json;
use std::slice;
use tracing::info;

const ICON_FIELDS: [&str; 1] = ["worksWith"];

/// Game values are registered in one file and listed in one menu file.
///
/// A `list` or `dictionary` value only survives if a patch supplies its
/// element (or key and value) types.
pub fn assemble_game_values(
    values: &SourceFile,
    menu: &SourceFile,
    patches: &Patches,
) -> Assembled<Vec<GameValue>> {
    let mut diagnostics = Diagnostics::new();
    let mut icons = collect_icons(
        slice::from_ref(menu),
        extract_game_value_icons,
        &mut diagnostics,
    );
    info!(icons = icons.len(), "Collected game value icons");

    let text = remove_comments(&values.contents);
    let mut game_values: Accumulator<EntityId, GameValue> = Accumulator::new();
    let mut registered = 0;

    for record in REGISTERED_GAME_VALUE.matches(&text) {
        registered += 1;
        let name = EntityName::new(record.text("name"));
        let id = EntityId::new(record.text("id"));
        let token = record.text("type");
        let patch = patches.for_id(&id);

        let mut extracted = PatchRecord::new();
        extracted.insert("id".into(), json!(id));
        match value_type_from_internal(token) {
            Some(value_type) => {
                extracted.insert("type".into(), json!(value_type));
            }
            None => diagnostics.error(
                id.as_str(),
                format!("unknown value type `{token}` of game value"),
            ),
        }
        match icons.get(&name).and_then(|icon| icon_field(icon, &id)) {
            Some(icon) => {
                extracted.insert(ICON_FIELD.into(), icon);
            }
            None if !patch.contains_key(ICON_FIELD) => {
                diagnostics.warn(id.as_str(), "couldn't find icon for game value");
            }
            None => {}
        }

        let mut merged = merge(&extracted, &patch);
        promote_icon_fields(&mut merged, &patch, &ICON_FIELDS);

        let (game_value, icon) =
            validate::<GameValue>(&id, merged, "game value", &mut diagnostics);
        if let Some(icon) = icon {
            icons.insert(name.clone(), icon);
        }
        if let Some(game_value) = game_value {
            game_values.insert(id, name.as_str(), game_value, &mut diagnostics);
        }
    }

    if registered == 0 {
        diagnostics.error(&values.name, "couldn't find any registered game values");
    }

    Assembled {
        entities: game_values.into_values(),
        icons,
        diagnostics,
    }
}
