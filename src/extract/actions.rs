//! Actions: one Kotlin `object` per file, arguments declared as delegated
//! properties (`val x by text("x") { parsing = ...; description = ... }`).

use super::{collect_icons, icon_field, validate, Assembled};
use crate::classify::{argument_type_from_internal, number_size_from_internal};
use crate::diagnostics::{Accumulator, Diagnostics};
use crate::enums::{extract_enums, with_overrides, EnumTable};
use crate::icons::extract_action_icons;
use crate::model::{
    Action, ActionArgument, ActionCategory, ActionShape, ArgumentType, EntityId, EntityName,
    NumberSize,
};
use crate::normalize::remove_comments;
use crate::patch::{merge, overlay, PatchRecord, Patches, ICON_FIELD};
use crate::patterns::rules::{
    ACTION_ARGUMENT, ACTION_NAME, ARGUMENT_DESCRIPTION_SLOTS, ARGUMENT_VALUE_SLOTS,
};
use crate::patterns::Record;
use crate::slots;
use crate::source::SourceFile;
use serde_json::{json, Value};
use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

/// Published shape of the actions collection.
pub type ActionsByCategory = BTreeMap<ActionCategory, Vec<Action>>;

/// Patch field holding per-argument patches, keyed by argument id.
pub const ARGS_FIELD: &str = "args";

/// Enum name `boolean` arguments take their two values from.
pub const BOOLEAN_ENUM: &str = "Boolean";

pub fn assemble_actions(
    action_files: &[SourceFile],
    menu_files: &[SourceFile],
    patches: &Patches,
    enums: &EnumTable,
) -> Assembled<ActionsByCategory> {
    let mut diagnostics = Diagnostics::new();
    let mut icons = collect_icons(menu_files, extract_action_icons, &mut diagnostics);
    info!(icons = icons.len(), "Collected action icons");

    let mut actions: Accumulator<EntityId, Action> = Accumulator::new();

    for file in action_files {
        let text = remove_comments(&file.contents);

        let Some(declaration) = ACTION_NAME.first(&text) else {
            diagnostics.error(&file.name, "couldn't find action declaration");
            continue;
        };
        let name = EntityName::new(declaration.text("name"));
        let id = EntityId::new(declaration.text("id"));

        let Some(category) = ActionCategory::from_id(id.as_str()) else {
            diagnostics.error(id.as_str(), "couldn't find category for action");
            continue;
        };

        let mut patch = patches.for_id(&id);
        let argument_patches = match patch.remove(ARGS_FIELD) {
            Some(Value::Object(argument_patches)) => argument_patches,
            Some(_) => {
                diagnostics.warn(
                    id.as_str(),
                    "`args` patch must be an object keyed by argument id, ignoring it",
                );
                PatchRecord::new()
            }
            None => PatchRecord::new(),
        };

        let enums = with_overrides(extract_enums(&text), enums);
        let args = assemble_arguments(&id, &text, &enums, &argument_patches, &mut diagnostics);

        let mut extracted = PatchRecord::new();
        extracted.insert("id".into(), json!(id));
        extracted.insert("category".into(), json!(category));
        extracted.insert("type".into(), json!(category.default_type()));
        match icons.get(&name).and_then(|icon| icon_field(icon, &id)) {
            Some(icon) => {
                extracted.insert(ICON_FIELD.into(), icon);
            }
            None if !patch.contains_key(ICON_FIELD) => {
                diagnostics.warn(id.as_str(), "couldn't find icon for action");
            }
            None => {}
        }

        let merged = merge(&extracted, &patch);
        let (action, icon) = validate::<Action>(&id, merged, "action", &mut diagnostics);

        if let Some(icon) = icon {
            icons.insert(name, icon);
        }
        if let Some(mut action) = action {
            if let ActionShape::Basic { args: shape_args }
            | ActionShape::Container { args: shape_args } = &mut action.shape
            {
                *shape_args = args;
            }
            actions.insert(id, &file.name, action, &mut diagnostics);
        }
    }

    let mut by_category = ActionsByCategory::new();
    for action in actions.into_values() {
        by_category.entry(action.category).or_default().push(action);
    }

    Assembled {
        entities: by_category,
        icons,
        diagnostics,
    }
}

/// Extracts, patches and validates every argument of one action.
///
/// An argument that cannot be completed is reported and dropped; the action
/// itself still goes out with the remaining arguments.
fn assemble_arguments(
    action: &EntityId,
    text: &str,
    enums: &EnumTable,
    patches: &PatchRecord,
    diagnostics: &mut Diagnostics,
) -> Vec<ActionArgument> {
    let mut seen = BTreeSet::new();
    let mut arguments = Vec::new();

    for record in ACTION_ARGUMENT.matches(text) {
        let argument_id = record.text("id");
        seen.insert(argument_id.to_string());

        let Some(extracted) = extract_argument(action, &record, enums, diagnostics) else {
            continue;
        };
        let patched = match patches.get(argument_id) {
            Some(Value::Object(patch)) => overlay(&extracted, patch),
            _ => extracted,
        };

        match serde_json::from_value::<ActionArgument>(Value::Object(patched)) {
            Ok(argument) => arguments.push(argument),
            Err(e) => diagnostics.error(
                action.as_str(),
                format!("invalid argument `{argument_id}`: {e}"),
            ),
        }
    }

    for unknown in patches.keys().filter(|id| !seen.contains(*id)) {
        diagnostics.warn(
            action.as_str(),
            format!("patch for unknown argument `{unknown}`"),
        );
    }

    arguments
}

fn extract_argument(
    action: &EntityId,
    record: &Record<'_>,
    enums: &EnumTable,
    diagnostics: &mut Diagnostics,
) -> Option<PatchRecord> {
    let kind = record.text("kind");
    let id = record.text("id");
    let body = record.text("body");

    let Some(argument_type) = argument_type_from_internal(kind) else {
        diagnostics.error(
            action.as_str(),
            format!("unknown argument type `{kind}` of argument `{id}`"),
        );
        return None;
    };

    let Some(value_slots) = ARGUMENT_VALUE_SLOTS.capture(body, "slots") else {
        diagnostics.error(
            action.as_str(),
            format!("couldn't get value slots of argument `{id}`"),
        );
        return None;
    };

    let mut argument = PatchRecord::new();
    argument.insert("id".into(), json!(id));
    argument.insert("plural".into(), json!(false));
    argument.insert("type".into(), json!(argument_type));
    argument.insert("valueSlots".into(), json!(slots::resolve(value_slots)));

    if argument_type == ArgumentType::Enum {
        let enum_name = if kind.eq_ignore_ascii_case("boolean") {
            BOOLEAN_ENUM
        } else {
            record.text("enum")
        };
        let Some(values) = enums.get(enum_name) else {
            diagnostics.error(
                action.as_str(),
                format!("couldn't get values of enum `{enum_name}` for argument `{id}`"),
            );
            return None;
        };
        argument.insert("values".into(), json!(values));
        if let Some(default) = record.get("default") {
            argument.insert("defaultValue".into(), json!(default));
        }
        return Some(argument);
    }

    let Some(description_slots) = ARGUMENT_DESCRIPTION_SLOTS.capture(body, "slots") else {
        diagnostics.error(
            action.as_str(),
            format!("couldn't get description slots of argument `{id}`"),
        );
        return None;
    };
    argument.insert(
        "descriptionSlots".into(),
        json!(slots::resolve(description_slots)),
    );

    match argument_type {
        ArgumentType::Number => {
            let size = number_size_from_internal(kind).unwrap_or_else(|| {
                diagnostics.warn(
                    action.as_str(),
                    format!("number argument `{id}` has no size in `{kind}`, assuming double"),
                );
                NumberSize::Double
            });
            argument.insert("size".into(), json!(size));
        }
        ArgumentType::List | ArgumentType::Dictionary => {}
        _ => {
            argument.insert("plural".into(), json!(record.get("plural").is_some()));
        }
    }

    Some(argument)
}
