use justmc_data::diagnostics::Severity;
use justmc_data::enums::EnumTable;
use justmc_data::extract::assemble_actions;
use justmc_data::model::{
    ActionCategory, ActionType, ArgumentKind, ArgumentType, EntityId, EntityName, NumberSize,
    ValueType,
};
use justmc_data::patch::Patches;
use justmc_data::source::SourceFile;

fn action_files() -> Vec<SourceFile> {
    vec![
        SourceFile::new("Broken1.kt", include_str!("fixtures/cache/actions/Broken1.kt")),
        SourceFile::new("Broken2.kt", include_str!("fixtures/cache/actions/Broken2.kt")),
        SourceFile::new("Mystery.kt", include_str!("fixtures/cache/actions/Mystery.kt")),
        SourceFile::new(
            "PlayerGiveItems.kt",
            include_str!("fixtures/cache/actions/PlayerGiveItems.kt"),
        ),
        SourceFile::new(
            "PlayerSendMessage.kt",
            include_str!("fixtures/cache/actions/PlayerSendMessage.kt"),
        ),
        SourceFile::new(
            "SetVariableAppendList.kt",
            include_str!("fixtures/cache/actions/SetVariableAppendList.kt"),
        ),
    ]
}

fn menu_files() -> Vec<SourceFile> {
    vec![SourceFile::new(
        "PlayerActionsMenu.kt",
        include_str!("fixtures/cache/menu/actions/PlayerActionsMenu.kt"),
    )]
}

fn global_enums() -> EnumTable {
    serde_json::from_str(include_str!("fixtures/patches/enums.json")).expect("enum fixture")
}

fn patches() -> Patches {
    Patches::from_json(include_str!("fixtures/patches/actions.json")).expect("patch fixture")
}

fn errors_for(diagnostics: &justmc_data::diagnostics::Diagnostics, subject: &str) -> usize {
    diagnostics
        .for_subject(subject)
        .filter(|d| d.severity == Severity::Error)
        .count()
}

/// Two files without an action declaration are two errors; the rest is still extracted.
#[test]
fn test_bad_files_do_not_stop_other_actions() {
    let assembled = assemble_actions(&action_files(), &menu_files(), &patches(), &global_enums());

    assert_eq!(errors_for(&assembled.diagnostics, "Broken1.kt"), 1);
    assert_eq!(errors_for(&assembled.diagnostics, "Broken2.kt"), 1);
    assert_eq!(errors_for(&assembled.diagnostics, "mystery_thing"), 1);

    let categories: Vec<_> = assembled.entities.keys().copied().collect();
    assert_eq!(categories, vec![ActionCategory::Player, ActionCategory::SetVariable]);

    let player: Vec<_> = assembled.entities[&ActionCategory::Player]
        .iter()
        .map(|action| action.id.as_str())
        .collect();
    assert_eq!(player, vec!["player_give_items", "player_send_message"]);
}

#[test]
fn test_send_message_arguments() {
    let assembled = assemble_actions(&action_files(), &menu_files(), &patches(), &global_enums());
    let action = assembled.entities[&ActionCategory::Player]
        .iter()
        .find(|action| action.id == EntityId::from("player_send_message"))
        .expect("player_send_message is extracted");

    assert_eq!(action.shape.action_type(), ActionType::Basic);
    assert_eq!(action.metadata.description.as_deref(), Some("Sends a message"));

    let args = action.shape.args();
    assert_eq!(args.len(), 3);

    let messages = &args[0];
    assert_eq!(messages.id, "messages");
    assert!(messages.plural);
    assert_eq!(messages.value_slots, (9..=35).collect::<Vec<u32>>());
    assert_eq!(messages.argument_type(), ArgumentType::Text);
    assert_eq!(messages.kind.description_slots(), Some(&[0u32][..]));

    let merging = &args[1];
    assert!(!merging.plural);
    assert_eq!(
        merging.kind,
        ArgumentKind::Enum {
            values: vec![
                "SPACES".to_string(),
                "CONCATENATION".to_string(),
                "SEPARATE_LINES".to_string(),
            ],
            default_value: None,
        }
    );

    let ignore_case = &args[2];
    assert_eq!(ignore_case.value_slots, vec![50]);
    assert_eq!(
        ignore_case.kind,
        ArgumentKind::Enum {
            values: vec!["TRUE".to_string(), "FALSE".to_string()],
            default_value: Some("false".to_string()),
        }
    );
}

#[test]
fn test_number_and_plural_item_arguments() {
    let assembled = assemble_actions(&action_files(), &menu_files(), &patches(), &global_enums());
    let action = &assembled.entities[&ActionCategory::Player][0];
    let args = action.shape.args();

    assert_eq!(args[0].argument_type(), ArgumentType::Item);
    assert!(args[0].plural);
    assert_eq!(
        args[1].kind,
        ArgumentKind::Number {
            description_slots: vec![44],
            size: NumberSize::Int,
            min: None,
            max: None,
            default_value: None,
        }
    );
    assert!(!args[1].plural);
}

#[test]
fn test_list_argument_completed_by_patch() {
    let assembled = assemble_actions(&action_files(), &menu_files(), &patches(), &global_enums());
    let action = &assembled.entities[&ActionCategory::SetVariable][0];

    assert_eq!(action.metadata.name.as_deref(), Some("Append to list"));
    let args = action.shape.args();
    assert_eq!(args.len(), 3);
    assert_eq!(args[1].argument_type(), ArgumentType::Any);
    assert!(args[1].plural);
    assert_eq!(args[1].value_slots, vec![12, 13, 14, 15, 16]);
    assert_eq!(
        args[2].kind,
        ArgumentKind::List {
            description_slots: vec![3],
            element_type: ValueType::Text,
        }
    );
    assert_eq!(errors_for(&assembled.diagnostics, "set_variable_append_list"), 0);
}

/// Without a patch the list argument has no element type and is dropped with an error.
#[test]
fn test_list_argument_without_element_type_is_an_error() {
    let assembled = assemble_actions(
        &action_files(),
        &menu_files(),
        &Patches::default(),
        &global_enums(),
    );
    let action = &assembled.entities[&ActionCategory::SetVariable][0];

    assert_eq!(action.shape.args().len(), 2);
    let errors: Vec<_> = assembled
        .diagnostics
        .for_subject("set_variable_append_list")
        .filter(|d| d.severity == Severity::Error)
        .collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("`list`"));
    assert!(errors[0].message.contains("elementType"));
}

#[test]
fn test_unknown_enum_drops_argument() {
    let assembled = assemble_actions(
        &action_files(),
        &menu_files(),
        &patches(),
        &EnumTable::new(),
    );
    let action = assembled.entities[&ActionCategory::Player]
        .iter()
        .find(|action| action.id == EntityId::from("player_send_message"))
        .expect("player_send_message is extracted");

    let ids: Vec<_> = action.shape.args().iter().map(|arg| arg.id.as_str()).collect();
    assert_eq!(ids, vec!["messages", "merging"]);
    assert!(assembled
        .diagnostics
        .for_subject("player_send_message")
        .any(|d| d.severity == Severity::Error && d.message.contains("`Boolean`")));
}

#[test]
fn test_icons_joined_by_name_and_patched() {
    let assembled = assemble_actions(&action_files(), &menu_files(), &patches(), &global_enums());

    let send = &assembled.icons[&EntityName::new("PlayerSendMessage")];
    assert_eq!(send.id, EntityId::from("player_send_message"));
    assert_eq!(send.material, "BOOK");
    assert!(send.has_glint);
    assert_eq!(send.works_with, Some(vec!["player".to_string()]));
    assert_eq!(send.additional_info, Some(vec!["info.merging".to_string()]));

    let give = &assembled.icons[&EntityName::new("PlayerGiveItems")];
    assert_eq!(give.amount, 3);

    // listed in the menu but never declared as an action
    let orphan = &assembled.icons[&EntityName::new("OrphanAction")];
    assert_eq!(orphan.id, EntityId::from("orphanaction"));

    assert!(assembled
        .diagnostics
        .for_subject("set_variable_append_list")
        .any(|d| d.severity == Severity::Warn && d.message.contains("icon")));
}

#[test]
fn test_args_patch_must_be_an_object() {
    let patches = Patches::from_json(r#"{ "player_give_items": { "args": [1, 2] } }"#)
        .expect("patch parses");

    let assembled = assemble_actions(&action_files(), &menu_files(), &patches, &global_enums());

    let action = &assembled.entities[&ActionCategory::Player][0];
    assert_eq!(action.shape.args().len(), 2);
    assert!(assembled
        .diagnostics
        .for_subject("player_give_items")
        .any(|d| d.severity == Severity::Warn));
}

#[test]
fn test_type_patch_to_conditional_shape() {
    let patches = Patches::from_json(
        r#"{ "player_give_items": { "type": "basic_with_conditional" } }"#,
    )
    .expect("patch parses");

    let assembled = assemble_actions(&action_files(), &menu_files(), &patches, &global_enums());

    let action = &assembled.entities[&ActionCategory::Player][0];
    assert_eq!(action.shape.action_type(), ActionType::BasicWithConditional);
    assert!(action.shape.args().is_empty());
}
