use justmc_data::model::{
    Action, ActionArgument, ActionCategory, ActionShape, ActionType, ArgumentKind, ArgumentType,
    GameValue, GameValueKind, Icon, IconKind, ValueType,
};
use serde_json::json;

#[test]
fn test_category_from_id_uses_priority_order() {
    let cases = [
        ("controller_something", Some(ActionCategory::Controller)),
        ("control_wait", Some(ActionCategory::Control)),
        ("player_send_message", Some(ActionCategory::Player)),
        ("if_player_is_sneaking", Some(ActionCategory::IfPlayer)),
        ("entity_remove", Some(ActionCategory::Entity)),
        ("set_variable_add", Some(ActionCategory::SetVariable)),
        ("else", Some(ActionCategory::Else)),
        ("call_function", Some(ActionCategory::CallFunction)),
        ("unknown_action", None),
    ];

    for (id, expected) in cases {
        assert_eq!(ActionCategory::from_id(id), expected, "id: {id}");
    }
}

#[test]
fn test_category_default_type() {
    assert_eq!(ActionCategory::IfGame.default_type(), ActionType::Container);
    assert_eq!(ActionCategory::Repeat.default_type(), ActionType::Container);
    assert_eq!(ActionCategory::Player.default_type(), ActionType::Basic);
    assert_eq!(ActionCategory::SetVariable.default_type(), ActionType::Basic);
}

#[test]
fn test_category_order_matches_priority() {
    let mut sorted = ActionCategory::PRIORITY;
    sorted.sort();
    assert_eq!(sorted, ActionCategory::PRIORITY);
}

#[test]
fn test_list_argument_requires_element_type() {
    let missing = json!({
        "id": "values",
        "plural": false,
        "type": "list",
        "valueSlots": [9],
        "descriptionSlots": [0]
    });
    assert!(serde_json::from_value::<ActionArgument>(missing).is_err());

    let complete = json!({
        "id": "values",
        "plural": false,
        "type": "list",
        "valueSlots": [9],
        "descriptionSlots": [0],
        "elementType": "text"
    });
    let argument: ActionArgument =
        serde_json::from_value(complete).expect("complete list argument");
    assert_eq!(argument.argument_type(), ArgumentType::List);
    assert_eq!(
        argument.kind,
        ArgumentKind::List {
            description_slots: vec![0],
            element_type: ValueType::Text,
        }
    );
}

#[test]
fn test_enum_argument_has_no_description_slots() {
    let argument: ActionArgument = serde_json::from_value(json!({
        "id": "direction",
        "type": "enum",
        "valueSlots": [40],
        "values": ["NORTH", "SOUTH"],
        "defaultValue": "NORTH"
    }))
    .expect("enum argument");

    assert_eq!(argument.kind.description_slots(), None);
    let written = serde_json::to_value(&argument).expect("serializes");
    assert_eq!(written["values"], json!(["NORTH", "SOUTH"]));
    assert!(written.get("descriptionSlots").is_none());
}

#[test]
fn test_action_serialized_shape() {
    let action = Action {
        id: "player_send_message".into(),
        category: ActionCategory::Player,
        shape: ActionShape::Basic { args: Vec::new() },
        metadata: Default::default(),
    };

    let written = serde_json::to_value(&action).expect("serializes");

    assert_eq!(
        written,
        json!({
            "id": "player_send_message",
            "category": "player",
            "type": "basic",
            "args": []
        })
    );
}

#[test]
fn test_conditional_action_has_no_args() {
    let action: Action = serde_json::from_value(json!({
        "id": "if_player_is_sneaking",
        "category": "if_player",
        "type": "container_with_conditional",
        "name": "Is sneaking"
    }))
    .expect("conditional action");

    assert_eq!(action.shape.action_type(), ActionType::ContainerWithConditional);
    assert!(action.shape.args().is_empty());
    assert_eq!(action.metadata.name.as_deref(), Some("Is sneaking"));
}

#[test]
fn test_dictionary_game_value() {
    let value: GameValue = serde_json::from_value(json!({
        "id": "event_data",
        "type": "dictionary",
        "keyType": "text",
        "valueType": "number",
        "worksWith": ["player"]
    }))
    .expect("dictionary game value");

    assert_eq!(
        value.kind,
        GameValueKind::Dictionary {
            key_type: ValueType::Text,
            value_type: ValueType::Number,
        }
    );
    assert_eq!(value.works_with, vec!["player"]);
}

#[test]
fn test_icon_defaults() {
    let icon: Icon = serde_json::from_value(json!({
        "id": "player_join",
        "type": "event",
        "material": "OAK_DOOR"
    }))
    .expect("minimal icon");

    assert_eq!(icon.kind, IconKind::Event);
    assert_eq!(icon.amount, 1);
    assert!(!icon.has_glint);
    assert_eq!(icon.texture, None);
}
