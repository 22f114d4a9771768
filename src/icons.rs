//! Icon metadata read from menu definitions.
//!
//! Each menu lists its entities as call sites (`action(...)`, `trigger(...)`,
//! `addGameValue(...)`); the text of one call up to the next call is the
//! span that the material, glint, amount and key lists are read from.

use crate::diagnostics::Diagnostics;
use crate::model::{EntityName, Icon, IconKind};
use crate::patterns::rules::{
    MENU_ACTION, MENU_ADDITIONAL_INFO, MENU_AMOUNT, MENU_GAME_VALUE, MENU_MATERIAL,
    MENU_TEXTURE, MENU_TRIGGER, MENU_TRIGGER_CATEGORY, MENU_WORKS_WITH,
};
use crate::patterns::{keyed_strings, string_literals};
use base64::prelude::*;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Call that gives an item the enchantment shimmer.
pub const GLINT_MARKER: &str = "addUnsafeEnchantment";

pub const PLAYER_HEAD: &str = "PLAYER_HEAD";

/// Texture hash of the default (Steve) skin, used when a head payload is unusable.
pub const DEFAULT_SKIN: &str = "1a4af718455d4aab528e7a61f86fa25e6a369d1768dcb13f7df319a713eb810b";

pub fn extract_action_icons(menu: &str, diagnostics: &mut Diagnostics) -> Vec<(EntityName, Icon)> {
    MENU_ACTION
        .matches(menu)
        .filter_map(|record| {
            let name = EntityName::new(record.text("name"));
            let span = record.text("span");
            let mut icon = base_icon(IconKind::Action, &name, span, diagnostics)?;
            icon.works_with = Some(keyed_strings(&MENU_WORKS_WITH, span));
            icon.additional_info = Some(keyed_strings(&MENU_ADDITIONAL_INFO, span));
            Some((name, icon))
        })
        .collect()
}

/// Trigger icons also carry the menu's category label and whether the event
/// is cancellable.
pub fn extract_trigger_icons(menu: &str, diagnostics: &mut Diagnostics) -> Vec<(EntityName, Icon)> {
    let category = MENU_TRIGGER_CATEGORY
        .capture(menu, "category")
        .map(str::to_string);

    MENU_TRIGGER
        .matches(menu)
        .filter_map(|record| {
            let name = EntityName::new(record.text("name"));
            let span = record.text("span");
            let mut icon = base_icon(IconKind::Event, &name, span, diagnostics)?;
            icon.category = category.clone();
            icon.cancellable = Some(span.contains("true"));
            icon.works_with = Some(keyed_strings(&MENU_WORKS_WITH, span));
            icon.additional_info = Some(keyed_strings(&MENU_ADDITIONAL_INFO, span));
            Some((name, icon))
        })
        .collect()
}

/// Game value menus list the compatible keys as bare literals, so every
/// string in the span except a head texture counts as "works with".
pub fn extract_game_value_icons(
    menu: &str,
    diagnostics: &mut Diagnostics,
) -> Vec<(EntityName, Icon)> {
    MENU_GAME_VALUE
        .matches(menu)
        .filter_map(|record| {
            let name = EntityName::new(record.text("name"));
            let span = record.text("span");
            let mut icon = base_icon(IconKind::GameValue, &name, span, diagnostics)?;
            let payload = MENU_TEXTURE.capture(span, "payload");
            icon.works_with = Some(
                string_literals(span)
                    .into_iter()
                    .filter(|literal| Some(literal.as_str()) != payload)
                    .collect(),
            );
            Some((name, icon))
        })
        .collect()
}

fn base_icon(
    kind: IconKind,
    name: &EntityName,
    span: &str,
    diagnostics: &mut Diagnostics,
) -> Option<Icon> {
    let Some(material) = MENU_MATERIAL.capture(span, "material") else {
        diagnostics.error(
            name.as_str(),
            format!("couldn't extract icon material for {}", kind_label(kind)),
        );
        return None;
    };

    let amount = MENU_AMOUNT
        .capture(span, "amount")
        .and_then(|amount| amount.parse::<u32>().ok())
        .filter(|&amount| amount > 0)
        .unwrap_or(1);

    let texture = (material == PLAYER_HEAD).then(|| {
        let payload = MENU_TEXTURE.capture(span, "payload");
        head_texture_or_default(name, payload, diagnostics)
    });

    Some(Icon {
        id: name.fallback_id(),
        kind,
        material: material.to_string(),
        amount,
        has_glint: span.contains(GLINT_MARKER),
        texture,
        works_with: None,
        additional_info: None,
        category: None,
        cancellable: None,
    })
}

fn kind_label(kind: IconKind) -> &'static str {
    match kind {
        IconKind::Action => "action",
        IconKind::Event => "trigger",
        IconKind::GameValue => "game value",
    }
}

///////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("texture payload is not base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("texture payload is not JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("texture payload has an empty skin url")]
    EmptyUrl,
}

#[derive(Deserialize)]
struct TexturePayload {
    textures: Textures,
}

#[derive(Deserialize)]
struct Textures {
    #[serde(rename = "SKIN")]
    skin: Skin,
}

#[derive(Deserialize)]
struct Skin {
    url: String,
}

/// Decodes a head payload (base64 JSON with `textures.SKIN.url`) to the
/// skin's texture hash, the last segment of that url.
pub fn decode_head_texture(payload: &str) -> Result<String, TextureError> {
    let payload = payload.trim();
    let bytes = BASE64_STANDARD
        .decode(payload)
        .or_else(|_| BASE64_STANDARD_NO_PAD.decode(payload))?;
    let decoded: TexturePayload = serde_json::from_slice(&bytes)?;
    decoded
        .textures
        .skin
        .url
        .rsplit('/')
        .next()
        .filter(|hash| !hash.is_empty())
        .map(str::to_string)
        .ok_or(TextureError::EmptyUrl)
}

/// Never fails: a missing or unreadable payload becomes [`DEFAULT_SKIN`].
pub fn head_texture_or_default(
    name: &EntityName,
    payload: Option<&str>,
    diagnostics: &mut Diagnostics,
) -> String {
    let Some(payload) = payload else {
        diagnostics.info(name.as_str(), "player head without texture, using default skin");
        return DEFAULT_SKIN.to_string();
    };
    match decode_head_texture(payload) {
        Ok(hash) => hash,
        Err(e) => {
            debug!(name = %name, error = %e, "Falling back to default skin");
            diagnostics.info(name.as_str(), format!("{e}, using default skin"));
            DEFAULT_SKIN.to_string()
        }
    }
}
