use super::{collect_icons, icon_field, promote_icon_fields, validate, Assembled};
use crate::diagnostics::{Accumulator, Diagnostics};
use crate::icons::extract_trigger_icons;
use crate::model::{EntityId, EntityName, Event};
use crate::normalize::remove_comments;
use crate::patch::{merge, PatchRecord, Patches, ICON_FIELD};
use crate::patterns::rules::REGISTERED_EVENT;
use crate::source::SourceFile;
use serde_json::json;
use tracing::info;

/// Registrations whose id contains this are placeholders, not real events.
pub const DUMMY_MARKER: &str = "dummy";

/// Event fields that are only known from the trigger menu icon.
const ICON_FIELDS: [&str; 4] = ["category", "cancellable", "worksWith", "additionalInfo"];

pub fn assemble_events(
    triggers: &SourceFile,
    menu_files: &[SourceFile],
    patches: &Patches,
) -> Assembled<Vec<Event>> {
    let mut diagnostics = Diagnostics::new();
    let mut icons = collect_icons(menu_files, extract_trigger_icons, &mut diagnostics);
    info!(icons = icons.len(), "Collected event icons");

    let text = remove_comments(&triggers.contents);
    let registrations: Vec<(EntityName, EntityId)> = REGISTERED_EVENT
        .matches(&text)
        .map(|record| {
            (
                EntityName::new(record.text("name")),
                EntityId::new(record.text("id")),
            )
        })
        .filter(|(_, id)| !id.as_str().contains(DUMMY_MARKER))
        .collect();

    if registrations.is_empty() {
        diagnostics.error(&triggers.name, "couldn't find any registered events");
    }

    let mut events: Accumulator<EntityId, Event> = Accumulator::new();

    for (name, id) in registrations {
        let patch = patches.for_id(&id);

        let mut extracted = PatchRecord::new();
        extracted.insert("id".into(), json!(id));
        match icons.get(&name).and_then(|icon| icon_field(icon, &id)) {
            Some(icon) => {
                extracted.insert(ICON_FIELD.into(), icon);
            }
            None if !patch.contains_key(ICON_FIELD) => {
                diagnostics.warn(id.as_str(), "couldn't find icon for event");
            }
            None => {}
        }

        let mut merged = merge(&extracted, &patch);
        promote_icon_fields(&mut merged, &patch, &ICON_FIELDS);

        let (event, icon) = validate::<Event>(&id, merged, "event", &mut diagnostics);
        if let Some(icon) = icon {
            icons.insert(name.clone(), icon);
        }
        if let Some(event) = event {
            events.insert(id, name.as_str(), event, &mut diagnostics);
        }
    }

    Assembled {
        entities: events.into_values(),
        icons,
        diagnostics,
    }
}
