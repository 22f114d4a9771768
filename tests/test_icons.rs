use justmc_data::diagnostics::{Diagnostics, Severity};
use justmc_data::icons::{
    decode_head_texture, extract_action_icons, extract_game_value_icons, extract_trigger_icons,
    head_texture_or_default, DEFAULT_SKIN,
};
use justmc_data::model::{EntityName, IconKind};

const HEAD_PAYLOAD: &str = "eyJ0ZXh0dXJlcyI6eyJTS0lOIjp7InVybCI6Imh0dHA6Ly90ZXh0dXJlcy5taW5lY3JhZnQubmV0L3RleHR1cmUvYWJjIn19fQ==";

const ACTION_MENU: &str = r#"
class PlayerActionsMenu : Menu() {
    init {
        action(PlayerSendMessage, ItemStack(Material.WRITABLE_BOOK).apply { addUnsafeEnchantment(Enchantment.LUCK, 1) },
            workWithKeys = listOf("player", "entity"),
            additionalInfoKeys = listOf("info.merging"))
        action(PlayerGiveItems, ItemStack(Material.CHEST, 3))
        action(Broken, nothing here)
    }
}
"#;

#[test]
fn test_action_icons() {
    let mut diagnostics = Diagnostics::new();

    let icons = extract_action_icons(ACTION_MENU, &mut diagnostics);

    assert_eq!(icons.len(), 2);
    let (name, send) = &icons[0];
    assert_eq!(name, &EntityName::new("PlayerSendMessage"));
    assert_eq!(send.kind, IconKind::Action);
    assert_eq!(send.material, "WRITABLE_BOOK");
    assert_eq!(send.amount, 1);
    assert!(send.has_glint);
    assert_eq!(
        send.works_with,
        Some(vec!["player".to_string(), "entity".to_string()])
    );
    assert_eq!(send.additional_info, Some(vec!["info.merging".to_string()]));

    let (_, give) = &icons[1];
    assert_eq!(give.material, "CHEST");
    assert_eq!(give.amount, 3);
    assert!(!give.has_glint);
    assert_eq!(give.works_with, Some(Vec::new()));
}

/// A missing material drops that icon only.
#[test]
fn test_missing_material_is_an_error_for_that_icon() {
    let mut diagnostics = Diagnostics::new();

    extract_action_icons(ACTION_MENU, &mut diagnostics);

    let errors: Vec<_> = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].subject, "Broken");
}

#[test]
fn test_trigger_icons_carry_category_and_cancellable() {
    let menu = r#"
class PlayerEventsMenu : Menu("creative_plus.category.player_event") {
    init {
        trigger(Triggers.PLAYER_JOIN, ItemStack(Material.OAK_DOOR),
            workWithKeys = listOf("player"))
        trigger(Triggers.PLAYER_CHAT, ItemStack(Material.PAPER), true)
    }
}
"#;
    let mut diagnostics = Diagnostics::new();

    let icons = extract_trigger_icons(menu, &mut diagnostics);

    assert_eq!(icons.len(), 2);
    assert_eq!(icons[0].0.as_str(), "PLAYER_JOIN");
    assert_eq!(icons[0].1.kind, IconKind::Event);
    assert_eq!(icons[0].1.category.as_deref(), Some("player"));
    assert_eq!(icons[0].1.cancellable, Some(false));
    assert_eq!(icons[1].1.cancellable, Some(true));
    assert!(diagnostics.is_empty());
}

#[test]
fn test_game_value_icons_with_head_texture() {
    let menu = format!(
        r#"
fun values() {{
    addGameValue(GameValues.PLAYER_HEALTH, ItemStack(Material.APPLE), "player", "entity")
    addGameValue(GameValues.PLAYER_HEAD_VALUE, ItemStack(Material.PLAYER_HEAD).texture("{HEAD_PAYLOAD}"), "player")
    addQuestion()
}}
"#
    );
    let mut diagnostics = Diagnostics::new();

    let icons = extract_game_value_icons(&menu, &mut diagnostics);

    assert_eq!(icons.len(), 2);
    assert_eq!(icons[0].1.works_with, Some(vec!["player".to_string(), "entity".to_string()]));
    assert_eq!(icons[0].1.texture, None);

    let head = &icons[1].1;
    assert_eq!(head.material, "PLAYER_HEAD");
    assert_eq!(head.texture.as_deref(), Some("abc"));
    assert_eq!(head.works_with, Some(vec!["player".to_string()]));
}

#[test]
fn test_decode_head_texture() {
    assert_eq!(decode_head_texture(HEAD_PAYLOAD).expect("payload decodes"), "abc");
    let unpadded = HEAD_PAYLOAD.trim_end_matches('=');
    assert_eq!(decode_head_texture(unpadded).expect("unpadded payload decodes"), "abc");
}

#[test]
fn test_decode_head_texture_failures() {
    // not base64
    assert!(decode_head_texture("%%%").is_err());
    // {"textures":{}}
    assert!(decode_head_texture("eyJ0ZXh0dXJlcyI6e319").is_err());
    // empty url
    assert!(decode_head_texture("eyJ0ZXh0dXJlcyI6eyJTS0lOIjp7InVybCI6IiJ9fX0=").is_err());
}

/// Legacy or broken payloads never stop icon generation.
#[test]
fn test_unparseable_texture_falls_back_to_default_skin() {
    let name = EntityName::new("PLAYER_HEAD_VALUE");
    let mut diagnostics = Diagnostics::new();

    let texture = head_texture_or_default(&name, Some("not a payload"), &mut diagnostics);
    let missing = head_texture_or_default(&name, None, &mut diagnostics);

    assert_eq!(texture, DEFAULT_SKIN);
    assert_eq!(missing, DEFAULT_SKIN);
    assert!(!diagnostics.has_errors());
    assert_eq!(diagnostics.count(Severity::Info), 2);
}
