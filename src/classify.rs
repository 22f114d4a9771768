//! Maps the plugin's internal type tokens onto the public vocabulary.

use crate::model::{ArgumentType, NumberSize, ValueType};

/// Resolves a value type, accepting the source's synonyms
/// (`string`, `array`, `map`, and the integer-family names).
pub fn value_type_from_internal(token: &str) -> Option<ValueType> {
    let token = token.to_lowercase();
    match token.as_str() {
        "string" => Some(ValueType::Text),
        "array" => Some(ValueType::List),
        "map" => Some(ValueType::Dictionary),
        "int" | "long" | "float" | "double" => Some(ValueType::Number),
        other => ValueType::parse(other),
    }
}

/// Resolves an argument type: the public vocabulary itself first, then
/// `boolean` as a two-valued enum, then the value-type synonyms.
///
/// `union` is never produced here; the action menu cannot express one, so a
/// union-typed slot accepts anything.
pub fn argument_type_from_internal(token: &str) -> Option<ArgumentType> {
    let lowered = token.to_lowercase();
    match ArgumentType::parse(&lowered) {
        Some(ArgumentType::Union) => Some(ArgumentType::Any),
        Some(argument_type) => Some(argument_type),
        None if lowered == "boolean" => Some(ArgumentType::Enum),
        None => value_type_from_internal(token).map(ArgumentType::from),
    }
}

pub fn number_size_from_internal(token: &str) -> Option<NumberSize> {
    match token.to_lowercase().as_str() {
        "int" => Some(NumberSize::Int),
        "long" => Some(NumberSize::Long),
        "float" => Some(NumberSize::Float),
        "double" => Some(NumberSize::Double),
        _ => None,
    }
}
