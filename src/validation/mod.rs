//! Request validation.
//!
//! Everything in here runs before a statement is built, so a request that
//! fails validation never reaches the store.

mod date;
mod fields;
mod request;
mod update;

use thiserror::Error;

pub use date::{DueDate, validate_date};
pub use fields::{
    Category, FieldDomain, Priority, Status, TodoField, text_value, validate_enum, validate_todo_text,
};
pub use request::{CreateTodoRequest, ListTodosQuery, NewTodo, TodoFilter, validate_filter, validate_new_todo};
pub use update::{TodoChange, TodoChanges, UpdatePayload, parse_update, validate_update_keys};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{}", .0.invalid_message())]
    InvalidFieldValue(TodoField),
    #[error("Invalid Due Date")]
    InvalidDate,
    #[error("Invalid Property: {0}")]
    InvalidProperty(String),
    #[error("Missing Field: {}", .0.key())]
    MissingField(TodoField),
    #[error("No Fields To Update")]
    EmptyUpdate,
}
