//! Hand-maintained corrections layered over extracted records.
//!
//! A patch file is a JSON object keyed by final entity id. Each value is a
//! partial record whose fields replace the extracted ones; its `icon` object
//! is merged one level deeper into the extracted icon instead of replacing it.

use crate::enums::EnumTable;
use crate::model::EntityId;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub type PatchRecord = Map<String, Value>;

pub const ICON_FIELD: &str = "icon";

/// Shallow overlay: every field of `top` replaces the one in `base`.
pub fn overlay(base: &PatchRecord, top: &PatchRecord) -> PatchRecord {
    let mut merged = base.clone();
    for (field, value) in top {
        merged.insert(field.clone(), value.clone());
    }
    merged
}

/// Applies `patch` to `extracted`. Patch fields win; `icon` objects are overlaid.
pub fn merge(extracted: &PatchRecord, patch: &PatchRecord) -> PatchRecord {
    let mut merged = extracted.clone();
    for (field, value) in patch {
        let combined = match (field.as_str(), extracted.get(field), value) {
            (ICON_FIELD, Some(Value::Object(base)), Value::Object(top)) => {
                Value::Object(overlay(base, top))
            }
            _ => value.clone(),
        };
        merged.insert(field.clone(), combined);
    }
    merged
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patches {
    by_id: BTreeMap<EntityId, PatchRecord>,
}

impl Patches {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let by_id: BTreeMap<EntityId, PatchRecord> = serde_json::from_str(text)?;
        Ok(Self { by_id })
    }

    pub fn get(&self, id: &EntityId) -> Option<&PatchRecord> {
        self.by_id.get(id)
    }

    /// `patch`, or an empty record when `id` has none.
    pub fn for_id(&self, id: &EntityId) -> PatchRecord {
        self.by_id.get(id).cloned().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl FromIterator<(EntityId, PatchRecord)> for Patches {
    fn from_iter<I: IntoIterator<Item = (EntityId, PatchRecord)>>(iter: I) -> Self {
        Self {
            by_id: iter.into_iter().collect(),
        }
    }
}

/// The curated enum table (`enums.json`): enum name to ordered members.
pub fn enum_overrides_from_json(text: &str) -> Result<EnumTable, serde_json::Error> {
    serde_json::from_str(text)
}
