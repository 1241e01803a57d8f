// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::str::FromStr;

use serde_json::Value;

use super::FieldValue;

/// The `type` attribute of an input. Parsing is case insensitive, so `"CheckBox"` is a
/// [`InputType::Checkbox`]. Anything this crate doesn't treat specially lands in
/// [`InputType::Other`] and behaves like text.
///
/// - <https://docs.rs/strum_macros/latest/strum_macros/derive.EnumString.html>
#[derive(Clone, Debug, PartialEq, Eq, strum_macros::EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum InputType {
    Text,
    Checkbox,
    Radio,
    Select,
    Textarea,
    #[strum(default)]
    Other(String),
}

impl InputType {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        // The default variant makes this infallible.
        Self::from_str(raw).unwrap_or_else(|_| InputType::Other(raw.to_string()))
    }

    #[must_use]
    pub fn is_checkbox(&self) -> bool { matches!(self, InputType::Checkbox) }
}

/// The element a [`ChangeEvent`] came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputTarget {
    pub name: String,
    pub input_type: InputType,
    /// Nominal value for checkboxes, the typed text for everything else.
    pub value: String,
    /// Only meaningful for checkboxes.
    pub checked: bool,
}

/// A change event delivered by the host to [`crate::ConnectedForm::update_field`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangeEvent {
    pub target: InputTarget,
}

impl ChangeEvent {
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            target: InputTarget {
                name: name.into(),
                input_type: InputType::Text,
                value: value.into(),
                checked: false,
            },
        }
    }

    #[must_use]
    pub fn checkbox(name: impl Into<String>, value: impl Into<String>, checked: bool) -> Self {
        Self {
            target: InputTarget {
                name: name.into(),
                input_type: InputType::Checkbox,
                value: value.into(),
                checked,
            },
        }
    }

    /// For hosts that only have the raw `type` attribute at hand.
    #[must_use]
    pub fn from_raw(
        name: impl Into<String>,
        raw_type: &str,
        value: impl Into<String>,
        checked: bool,
    ) -> Self {
        Self {
            target: InputTarget {
                name: name.into(),
                input_type: InputType::parse(raw_type),
                value: value.into(),
                checked,
            },
        }
    }

    /// A checked checkbox yields its nominal value, an unchecked one `Flag(false)`.
    /// Every other input yields its raw value.
    #[must_use]
    pub fn effective_value(&self) -> FieldValue {
        let target = &self.target;
        match (target.input_type.is_checkbox(), target.checked) {
            (true, true) => FieldValue::Text(target.value.clone()),
            (true, false) => FieldValue::Flag(false),
            (false, _) => FieldValue::Text(target.value.clone()),
        }
    }
}

/// A submit event whose default browser behavior (navigation, page reload) can be
/// suppressed.
pub trait SubmitEvent {
    fn prevent_default(&mut self);
}

/// Records whether [`SubmitEvent::prevent_default`] was called.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FormSubmitEvent {
    pub default_prevented: bool,
}

impl SubmitEvent for FormSubmitEvent {
    fn prevent_default(&mut self) { self.default_prevented = true; }
}

/// The argument the host hands to an extra handler, see
/// [`crate::ConnectedForm::invoke_handler`].
#[derive(Clone, Debug, Default, PartialEq)]
pub enum HandlerEvent {
    #[default]
    Empty,
    Change(ChangeEvent),
    /// An input lost focus.
    Blur { name: String },
    /// Anything else the presentation layer wants to pass along.
    Payload(Value),
}

impl HandlerEvent {
    #[must_use]
    pub fn blur(name: impl Into<String>) -> Self { HandlerEvent::Blur { name: name.into() } }

    /// The input this event is about. A string payload counts as a field name.
    #[must_use]
    pub fn field_name(&self) -> Option<&str> {
        match self {
            HandlerEvent::Change(event) => Some(event.target.name.as_str()),
            HandlerEvent::Blur { name } => Some(name.as_str()),
            HandlerEvent::Payload(Value::String(name)) => Some(name.as_str()),
            HandlerEvent::Payload(_) | HandlerEvent::Empty => None,
        }
    }
}

impl From<ChangeEvent> for HandlerEvent {
    fn from(event: ChangeEvent) -> Self { HandlerEvent::Change(event) }
}

impl From<Value> for HandlerEvent {
    fn from(payload: Value) -> Self { HandlerEvent::Payload(payload) }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::assert_eq2;

    #[test_case("checkbox", InputType::Checkbox)]
    #[test_case("CheckBox", InputType::Checkbox)]
    #[test_case("CHECKBOX", InputType::Checkbox)]
    #[test_case("text", InputType::Text)]
    #[test_case("Radio", InputType::Radio)]
    #[test_case("email", InputType::Other("email".to_string()))]
    fn test_parse_input_type(raw: &str, expected: InputType) {
        assert_eq2!(InputType::parse(raw), expected);
    }

    #[test_case(ChangeEvent::text("foo", "baz"), FieldValue::from("baz"))]
    #[test_case(ChangeEvent::checkbox("foo", "checkbox", true), FieldValue::from("checkbox"))]
    #[test_case(ChangeEvent::checkbox("foo", "checkbox", false), FieldValue::Flag(false))]
    #[test_case(ChangeEvent::from_raw("foo", "CheckBox", "on", true), FieldValue::from("on"))]
    #[test_case(ChangeEvent::from_raw("foo", "CheckBox", "on", false), FieldValue::Flag(false))]
    #[test_case(ChangeEvent::from_raw("foo", "email", "a@b.c", true), FieldValue::from("a@b.c"))]
    fn test_effective_value(event: ChangeEvent, expected: FieldValue) {
        assert_eq2!(event.effective_value(), expected);
    }

    #[test_case(HandlerEvent::Empty, None)]
    #[test_case(HandlerEvent::from(ChangeEvent::text("foo", "baz")), Some("foo"))]
    #[test_case(HandlerEvent::blur("bar"), Some("bar"))]
    #[test_case(HandlerEvent::from(serde_json::json!("qux")), Some("qux"))]
    #[test_case(HandlerEvent::from(serde_json::json!({"row": 1})), None)]
    fn test_handler_event_field_name(event: HandlerEvent, expected: Option<&str>) {
        assert_eq2!(event.field_name(), expected);
    }

    #[test]
    fn test_prevent_default() {
        let mut event = FormSubmitEvent::default();
        assert!(!event.default_prevented);
        event.prevent_default();
        assert!(event.default_prevented);
    }
}
