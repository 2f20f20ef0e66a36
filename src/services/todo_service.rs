use tracing::info;

use crate::{
    db::{dao::TodoDao, entities::todo},
    error::AppError,
    validation::{DueDate, NewTodo, TodoChanges, TodoField, TodoFilter, ValidationError},
};

/// Todo operations over already validated input.
#[derive(Clone)]
pub struct TodoService {
    todo_dao: TodoDao,
}

impl TodoService {
    pub fn new(todo_dao: TodoDao) -> Self {
        Self { todo_dao }
    }

    pub async fn list(&self, filter: &TodoFilter) -> Result<Vec<todo::Model>, AppError> {
        Ok(self.todo_dao.find_all(filter).await?)
    }

    pub async fn require(&self, id: i32) -> Result<todo::Model, AppError> {
        Ok(self.todo_dao.find_by_id(id).await?)
    }

    pub async fn agenda(&self, date: DueDate) -> Result<Vec<todo::Model>, AppError> {
        Ok(self.todo_dao.find_by_due_date(date).await?)
    }

    pub async fn create(&self, todo: &NewTodo) -> Result<(), AppError> {
        let id = self.todo_dao.insert(todo).await?;
        info!(id, due_date = %todo.due_date, "todo created");
        Ok(())
    }

    /// Applies `changes` and returns the field the response should name.
    pub async fn update(&self, id: i32, changes: &TodoChanges) -> Result<TodoField, AppError> {
        self.todo_dao.update(id, changes).await?;
        let field = changes
            .first_field()
            .ok_or(ValidationError::EmptyUpdate)?;
        info!(id, changed = changes.len(), "todo updated");
        Ok(field)
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.todo_dao.delete(id).await?;
        info!(id, "todo deleted");
        Ok(())
    }
}
