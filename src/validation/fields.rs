use std::fmt;

use serde_json::Value;

use super::ValidationError;

/// The columns a todo exposes, named the way clients send them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TodoField {
    Todo,
    Priority,
    Status,
    Category,
    DueDate,
}

impl TodoField {
    /// Keys an update payload may carry, in the order they are documented.
    pub const UPDATE_ALLOW_LIST: [TodoField; 5] = [
        TodoField::Status,
        TodoField::Priority,
        TodoField::Todo,
        TodoField::Category,
        TodoField::DueDate,
    ];

    pub fn key(self) -> &'static str {
        match self {
            TodoField::Todo => "todo",
            TodoField::Priority => "priority",
            TodoField::Status => "status",
            TodoField::Category => "category",
            TodoField::DueDate => "dueDate",
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            TodoField::Todo => "todo",
            TodoField::Priority => "priority",
            TodoField::Status => "status",
            TodoField::Category => "category",
            TodoField::DueDate => "due_date",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TodoField::Todo => "Todo",
            TodoField::Priority => "Priority",
            TodoField::Status => "Status",
            TodoField::Category => "Category",
            TodoField::DueDate => "Due Date",
        }
    }

    pub fn invalid_message(self) -> &'static str {
        match self {
            TodoField::Todo => "Invalid Todo Text",
            TodoField::Priority => "Invalid Todo Priority",
            TodoField::Status => "Invalid Todo Status",
            TodoField::Category => "Invalid Todo Category",
            TodoField::DueDate => "Invalid Due Date",
        }
    }

    pub fn updated_message(self) -> String {
        format!("{} Updated", self.label())
    }

    pub fn from_update_key(key: &str) -> Option<Self> {
        Self::UPDATE_ALLOW_LIST
            .into_iter()
            .find(|field| field.key() == key)
    }

    /// The error a malformed value for this field reports.
    pub fn invalid(self) -> ValidationError {
        match self {
            TodoField::DueDate => ValidationError::InvalidDate,
            field => ValidationError::InvalidFieldValue(field),
        }
    }
}

/// Borrows a JSON value as the string every todo field is sent as.
pub fn text_value(field: TodoField, value: &Value) -> Result<&str, ValidationError> {
    value.as_str().ok_or_else(|| field.invalid())
}

/// Todo text is free form and kept exactly as sent, but it cannot be blank.
pub fn validate_todo_text(text: &str) -> Result<&str, ValidationError> {
    if text.trim().is_empty() {
        return Err(TodoField::Todo.invalid());
    }
    Ok(text)
}

impl fmt::Display for TodoField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A closed set of accepted values for one todo field.
pub trait FieldDomain: Copy + Sized + 'static {
    const FIELD: TodoField;
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;
}

/// Matches `value` exactly (case included) against the domain of `T`.
pub fn validate_enum<T: FieldDomain>(value: &str) -> Result<T, ValidationError> {
    T::ALL
        .iter()
        .copied()
        .find(|candidate| candidate.as_str() == value)
        .ok_or(ValidationError::InvalidFieldValue(T::FIELD))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    ToDo,
    InProgress,
    Done,
}

impl FieldDomain for Status {
    const FIELD: TodoField = TodoField::Status;
    const ALL: &'static [Self] = &[Status::ToDo, Status::InProgress, Status::Done];

    fn as_str(self) -> &'static str {
        match self {
            Status::ToDo => "TO DO",
            Status::InProgress => "IN PROGRESS",
            Status::Done => "DONE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl FieldDomain for Priority {
    const FIELD: TodoField = TodoField::Priority;
    const ALL: &'static [Self] = &[Priority::High, Priority::Medium, Priority::Low];

    fn as_str(self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Work,
    Home,
    Learning,
}

impl FieldDomain for Category {
    const FIELD: TodoField = TodoField::Category;
    const ALL: &'static [Self] = &[Category::Work, Category::Home, Category::Learning];

    fn as_str(self) -> &'static str {
        match self {
            Category::Work => "WORK",
            Category::Home => "HOME",
            Category::Learning => "LEARNING",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
