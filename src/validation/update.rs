use std::{fmt, ops::Deref};

use serde::{
    Deserialize, Deserializer,
    de::{MapAccess, Visitor},
};
use serde_json::Value;

use super::{
    Category, DueDate, Priority, Status, TodoField, ValidationError, text_value, validate_date,
    validate_enum, validate_todo_text,
};

/// A JSON object body with its keys kept in the order the client sent them.
///
/// A repeated key keeps the position of its first occurrence and the value of
/// its last one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdatePayload {
    entries: Vec<(String, Value)>,
}

impl UpdatePayload {
    fn insert(&mut self, key: String, value: Value) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'de> Deserialize<'de> for UpdatePayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PayloadVisitor;

        impl<'de> Visitor<'de> for PayloadVisitor {
            type Value = UpdatePayload;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut payload = UpdatePayload::default();
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    payload.insert(key, value);
                }
                Ok(payload)
            }
        }

        deserializer.deserialize_map(PayloadVisitor)
    }
}

/// One validated column assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoChange {
    Status(Status),
    Priority(Priority),
    Todo(String),
    Category(Category),
    DueDate(DueDate),
}

impl TodoChange {
    pub fn field(&self) -> TodoField {
        match self {
            TodoChange::Status(_) => TodoField::Status,
            TodoChange::Priority(_) => TodoField::Priority,
            TodoChange::Todo(_) => TodoField::Todo,
            TodoChange::Category(_) => TodoField::Category,
            TodoChange::DueDate(_) => TodoField::DueDate,
        }
    }
}

/// Validated assignments in payload order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoChanges(Vec<TodoChange>);

impl TodoChanges {
    /// The field the response reports back to the client.
    pub fn first_field(&self) -> Option<TodoField> {
        self.0.first().map(TodoChange::field)
    }
}

impl Deref for TodoChanges {
    type Target = [TodoChange];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<TodoChange>> for TodoChanges {
    fn from(changes: Vec<TodoChange>) -> Self {
        Self(changes)
    }
}

/// Resolves one payload key against the update allow-list.
fn update_field(key: &str) -> Result<TodoField, ValidationError> {
    TodoField::from_update_key(key).ok_or_else(|| ValidationError::InvalidProperty(key.to_string()))
}

/// Checks a batch of keys without looking at their values. Fails on the first
/// key outside the update allow-list.
pub fn validate_update_keys<'a>(
    keys: impl IntoIterator<Item = &'a str>,
) -> Result<(), ValidationError> {
    keys.into_iter().try_for_each(|key| update_field(key).map(|_| ()))
}

/// Walks the payload in order, checking the key and then its value, and
/// stops at the first failure.
pub fn parse_update(payload: UpdatePayload) -> Result<TodoChanges, ValidationError> {
    let mut changes = Vec::with_capacity(payload.len());
    for (key, value) in &payload.entries {
        let field = update_field(key)?;
        changes.push(parse_change(field, value)?);
    }
    Ok(TodoChanges(changes))
}

fn parse_change(field: TodoField, value: &Value) -> Result<TodoChange, ValidationError> {
    let text = text_value(field, value)?;
    let change = match field {
        TodoField::Status => TodoChange::Status(validate_enum(text)?),
        TodoField::Priority => TodoChange::Priority(validate_enum(text)?),
        TodoField::Category => TodoChange::Category(validate_enum(text)?),
        TodoField::DueDate => TodoChange::DueDate(validate_date(text)?),
        TodoField::Todo => TodoChange::Todo(validate_todo_text(text)?.to_string()),
    };
    Ok(change)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(body: &str) -> UpdatePayload {
        serde_json::from_str(body).expect("payload should deserialize")
    }

    #[test]
    fn unknown_key_is_reported_by_name() {
        let body = payload(r#"{"foo": 1}"#);
        assert_eq!(
            validate_update_keys(body.keys()),
            Err(ValidationError::InvalidProperty("foo".to_string()))
        );
        assert_eq!(
            parse_update(body),
            Err(ValidationError::InvalidProperty("foo".to_string()))
        );
    }

    #[test]
    fn allow_listed_keys_pass() {
        let body = payload(
            r#"{"status": "DONE", "priority": "LOW", "todo": "x", "category": "HOME", "dueDate": "2024-01-01"}"#,
        );
        assert_eq!(validate_update_keys(body.keys()), Ok(()));
    }

    #[test]
    fn keeps_payload_order() {
        let changes = parse_update(payload(
            r#"{"dueDate": "2024-3-5", "status": "DONE", "todo": "  walk the dog "}"#,
        ))
        .expect("payload should validate");

        let due_date: DueDate = "2024-03-05".parse().expect("date should parse");
        assert_eq!(
            &*changes,
            &[
                TodoChange::DueDate(due_date),
                TodoChange::Status(Status::Done),
                TodoChange::Todo("  walk the dog ".to_string()),
            ]
        );
        assert_eq!(changes.first_field(), Some(TodoField::DueDate));
    }

    #[test]
    fn stops_at_first_failure_in_payload_order() {
        let err = parse_update(payload(r#"{"priority": "URGENT", "foo": 1}"#)).unwrap_err();
        assert_eq!(err, ValidationError::InvalidFieldValue(TodoField::Priority));

        let err = parse_update(payload(r#"{"foo": 1, "priority": "URGENT"}"#)).unwrap_err();
        assert_eq!(err, ValidationError::InvalidProperty("foo".to_string()));
    }

    #[test]
    fn value_types_are_checked() {
        assert_eq!(
            parse_update(payload(r#"{"status": 3}"#)),
            Err(ValidationError::InvalidFieldValue(TodoField::Status))
        );
        assert_eq!(
            parse_update(payload(r#"{"dueDate": "2024-02-30"}"#)),
            Err(ValidationError::InvalidDate)
        );
        assert_eq!(
            parse_update(payload(r#"{"dueDate": null}"#)),
            Err(ValidationError::InvalidDate)
        );
        assert_eq!(
            parse_update(payload(r#"{"todo": "   "}"#)),
            Err(ValidationError::InvalidFieldValue(TodoField::Todo))
        );
    }

    #[test]
    fn repeated_key_keeps_first_position_and_last_value() {
        let body = payload(r#"{"status": "DONE", "priority": "LOW", "status": "TO DO"}"#);
        assert_eq!(body.keys().collect::<Vec<_>>(), ["status", "priority"]);

        let changes = parse_update(body).expect("payload should validate");
        assert_eq!(
            &*changes,
            &[
                TodoChange::Status(Status::ToDo),
                TodoChange::Priority(Priority::Low),
            ]
        );
    }

    #[test]
    fn empty_object_parses_to_no_changes() {
        let changes = parse_update(payload("{}")).expect("empty payload should parse");
        assert!(changes.is_empty());
        assert_eq!(changes.first_field(), None);
    }

    #[test]
    fn non_object_bodies_are_rejected() {
        assert!(serde_json::from_str::<UpdatePayload>("[1, 2]").is_err());
        assert!(serde_json::from_str::<UpdatePayload>(r#""status""#).is_err());
    }
}
