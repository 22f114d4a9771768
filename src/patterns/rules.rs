//! The extraction rule table, tuned to the plugin's Kotlin formatting.

use super::{not_member_access, Rule};
use std::sync::LazyLock;

/// `object PlayerSendMessage : Action("player_send_message")`
pub static ACTION_NAME: LazyLock<Rule> = LazyLock::new(|| {
    Rule::new(
        "action_name",
        r#"(?s)object\s*(?P<name>.*?)\s*:.*?"(?P<id>.*?)""#,
        &["name", "id"],
    )
});

/// `val text by textList("text") { parsing = (9..35) description = 0 }`
pub static ACTION_ARGUMENT: LazyLock<Rule> = LazyLock::new(|| {
    Rule::new(
        "action_argument",
        r#"by (?P<kind>[a-z]*)(?P<plural>List)?<?(?P<enum>\w*)>?\("(?P<id>.*?)"(?:(?:,\s*(?P<default>false))|(?:.*))\)\s*\{(?P<body>(?s:.*?))\}"#,
        &["kind", "plural", "enum", "id", "default", "body"],
    )
});

pub static ARGUMENT_VALUE_SLOTS: LazyLock<Rule> = LazyLock::new(|| {
    Rule::new(
        "argument_value_slots",
        r"parsing\s*=\s*(?P<slots>.*)",
        &["slots"],
    )
});

pub static ARGUMENT_DESCRIPTION_SLOTS: LazyLock<Rule> = LazyLock::new(|| {
    Rule::new(
        "argument_description_slots",
        r"descriptions?\s*=\s*(?P<slots>.*)",
        &["slots"],
    )
});

/// A single slot or an optionally parenthesised inclusive range `a..b`.
pub static SLOT: LazyLock<Rule> = LazyLock::new(|| {
    Rule::new(
        "slot",
        r"\(?(?P<lo>\d+)\.\.(?P<hi>\d+)\)?|(?P<single>\d+)",
        &["lo", "hi", "single"],
    )
});

/// Header of `enum class Name(...) {`; the body end is found by the enum builder.
pub static ENUM_HEADER: LazyLock<Rule> = LazyLock::new(|| {
    Rule::new(
        "enum_header",
        r"(?s)enum\s*class\s*(?P<name>\w+)\s*(?:\(.*?\))?\s*\{",
        &["name"],
    )
});

pub static ENUM_MEMBER: LazyLock<Rule> = LazyLock::new(|| {
    Rule::new(
        "enum_member",
        r"(?m)(?:^|,)\s*\b(?P<member>[A-Z_]\w*)\b(?:\(.*?\))?",
        &["member"],
    )
    .guard(|text, captures| {
        let Some(member) = captures.name("member") else {
            return false;
        };
        !member.as_str().starts_with("ItemStack")
            && !member.as_str().starts_with("BlockDirection")
            && !text[member.end()..].starts_with(')')
    })
});

pub static MENU_ACTION: LazyLock<Rule> = LazyLock::new(|| {
    Rule::new("menu_action", r"(?s)action\(\s*(?P<name>.*?),", &["name", "span"])
        .guard(not_member_access)
        .span_until(r"action|open|subcategory")
});

pub static MENU_TRIGGER: LazyLock<Rule> = LazyLock::new(|| {
    Rule::new(
        "menu_trigger",
        r"(?s)trigger\(\s*Triggers\.(?P<name>.*?),",
        &["name", "span"],
    )
    .guard(not_member_access)
    .span_until(r"trigger|open|subcategory")
});

pub static MENU_GAME_VALUE: LazyLock<Rule> = LazyLock::new(|| {
    Rule::new(
        "menu_game_value",
        r"(?s)addGameValue\(\s*GameValues\.(?P<name>.*?),",
        &["name", "span"],
    )
    .guard(not_member_access)
    .span_until(r"add(?:G|Q)")
});

pub static MENU_MATERIAL: LazyLock<Rule> = LazyLock::new(|| {
    Rule::new("menu_material", r"Material\.(?P<material>\w+)", &["material"])
});

/// `ItemStack(Material.X, 3)`; the one-argument form has no amount.
pub static MENU_AMOUNT: LazyLock<Rule> = LazyLock::new(|| {
    Rule::new(
        "menu_amount",
        r"ItemStack\(\s*Material\.\w+\s*,\s*(?P<amount>\d+)\s*\)",
        &["amount"],
    )
});

pub static MENU_WORKS_WITH: LazyLock<Rule> = LazyLock::new(|| {
    Rule::new(
        "menu_works_with",
        r"workWithKeys\s*=\s*(?P<list>.*?)\)",
        &["list"],
    )
});

pub static MENU_ADDITIONAL_INFO: LazyLock<Rule> = LazyLock::new(|| {
    Rule::new(
        "menu_additional_info",
        r"additionalInfoKeys\s*=\s*(?P<list>.*?)\)",
        &["list"],
    )
});

/// Base64 skin payload of a player head: `texture = "..."` or `texture("...")`.
pub static MENU_TEXTURE: LazyLock<Rule> = LazyLock::new(|| {
    Rule::new(
        "menu_texture",
        r#"(?i)texture\w*\s*[=(]\s*"(?P<payload>[^"]*)""#,
        &["payload"],
    )
});

pub static MENU_TRIGGER_CATEGORY: LazyLock<Rule> = LazyLock::new(|| {
    Rule::new(
        "menu_trigger_category",
        r"creative_plus.category.(?P<category>.*)_event",
        &["category"],
    )
});

/// `val PLAYER_JOIN = register(...("player_join")`
pub static REGISTERED_EVENT: LazyLock<Rule> = LazyLock::new(|| {
    Rule::new(
        "registered_event",
        r#"val\s*(?P<name>.*?)\s*=\s*register.*\("(?P<id>.*)"\)"#,
        &["name", "id"],
    )
});

/// `val PLAYER_HEALTH = register("player_health", ValueTypes.NUMBER`
pub static REGISTERED_GAME_VALUE: LazyLock<Rule> = LazyLock::new(|| {
    Rule::new(
        "registered_game_value",
        r#"val\s*(?P<name>.*?)\s*=\s*register\("(?P<id>.*)",\s*ValueTypes\.(?P<type>\w*)"#,
        &["name", "id", "type"],
    )
});

pub static STRING_LITERAL: LazyLock<Rule> =
    LazyLock::new(|| Rule::new("string_literal", r#"(?s)"(?P<value>.*?)""#, &["value"]));

/// Every rule, in the order the pipeline first needs them.
pub fn all() -> Vec<&'static Rule> {
    vec![
        &*ACTION_NAME,
        &*ACTION_ARGUMENT,
        &*ARGUMENT_VALUE_SLOTS,
        &*ARGUMENT_DESCRIPTION_SLOTS,
        &*SLOT,
        &*ENUM_HEADER,
        &*ENUM_MEMBER,
        &*MENU_ACTION,
        &*MENU_TRIGGER,
        &*MENU_GAME_VALUE,
        &*MENU_MATERIAL,
        &*MENU_AMOUNT,
        &*MENU_WORKS_WITH,
        &*MENU_ADDITIONAL_INFO,
        &*MENU_TEXTURE,
        &*MENU_TRIGGER_CATEGORY,
        &*REGISTERED_EVENT,
        &*REGISTERED_GAME_VALUE,
        &*STRING_LITERAL,
    ]
}
