use serde::Deserialize;
use serde_json::Value;

use super::{
    Category, DueDate, Priority, Status, TodoField, ValidationError, text_value, validate_date,
    validate_enum, validate_todo_text,
};

/// Query string of `GET /todos/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListTodosQuery {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub search_q: Option<String>,
}

/// Validated list filters. `None` means the filter was not supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoFilter {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub category: Option<Category>,
    pub search: Option<String>,
}

/// Checks status, then priority, then category. An empty value counts as
/// supplied and has to be valid like any other.
pub fn validate_filter(query: &ListTodosQuery) -> Result<TodoFilter, ValidationError> {
    let status = query.status.as_deref().map(validate_enum::<Status>).transpose()?;
    let priority = query.priority.as_deref().map(validate_enum::<Priority>).transpose()?;
    let category = query.category.as_deref().map(validate_enum::<Category>).transpose()?;

    Ok(TodoFilter {
        status,
        priority,
        category,
        search: query.search_q.clone(),
    })
}

/// Body of `POST /todos/`. Values stay untyped until validation so a wrong
/// JSON type is reported against the field it was sent for.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    pub todo: Option<Value>,
    pub category: Option<Value>,
    pub priority: Option<Value>,
    pub status: Option<Value>,
    pub due_date: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub todo: String,
    pub category: Category,
    pub priority: Priority,
    pub status: Status,
    pub due_date: DueDate,
}

/// All five fields are required. Values are checked in the order status,
/// priority, category, due date, todo text.
pub fn validate_new_todo(request: &CreateTodoRequest) -> Result<NewTodo, ValidationError> {
    let status = validate_enum(required(&request.status, TodoField::Status)?)?;
    let priority = validate_enum(required(&request.priority, TodoField::Priority)?)?;
    let category = validate_enum(required(&request.category, TodoField::Category)?)?;
    let due_date = validate_date(required(&request.due_date, TodoField::DueDate)?)?;

    let todo = validate_todo_text(required(&request.todo, TodoField::Todo)?)?;

    Ok(NewTodo {
        todo: todo.to_string(),
        category,
        priority,
        status,
        due_date,
    })
}

/// A missing key and an explicit `null` both count as missing.
fn required(value: &Option<Value>, field: TodoField) -> Result<&str, ValidationError> {
    let value = value.as_ref().ok_or(ValidationError::MissingField(field))?;
    text_value(field, value)
}
