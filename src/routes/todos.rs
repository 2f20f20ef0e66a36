use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    routing::get,
};
use serde::Serialize;

use crate::{
    db::entities::todo,
    error::AppError,
    response::ApiResult,
    services::{ServiceContext, todo_service::TodoService},
    state::AppState,
    validation::{
        CreateTodoRequest, DueDate, ListTodosQuery, UpdatePayload, parse_update, validate_filter,
        validate_new_todo,
    },
};

const CREATED_MESSAGE: &str = "Todo Successfully Added";
const DELETED_MESSAGE: &str = "Todo Deleted";

/// List entry; the due date is reported as `dueDate`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    pub id: i32,
    pub todo: String,
    pub priority: String,
    pub status: String,
    pub category: String,
    pub due_date: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/todos/", get(list_todos).post(create_todo))
        .route(
            "/todos/{todo_id}/",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .with_state(state)
}

async fn list_todos(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListTodosQuery>,
) -> ApiResult<Json<Vec<TodoResponse>>> {
    let filter = validate_filter(&query)?;
    let service = todo_service_from_state(state.as_ref());
    let todos = service.list(&filter).await?;
    Ok(Json(todos.into_iter().map(TodoResponse::from).collect()))
}

async fn get_todo(
    State(state): State<Arc<AppState>>,
    Path(todo_id): Path<i32>,
) -> ApiResult<Json<todo::Model>> {
    let service = todo_service_from_state(state.as_ref());
    let todo = service.require(todo_id).await?;
    Ok(Json(todo))
}

async fn create_todo(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> ApiResult<&'static str> {
    let Json(body) = payload.map_err(invalid_body)?;
    let todo = validate_new_todo(&body)?;
    let service = todo_service_from_state(state.as_ref());
    service.create(&todo).await?;
    Ok(CREATED_MESSAGE)
}

async fn update_todo(
    State(state): State<Arc<AppState>>,
    Path(todo_id): Path<i32>,
    payload: Result<Json<UpdatePayload>, JsonRejection>,
) -> ApiResult<String> {
    let Json(body) = payload.map_err(invalid_body)?;
    let changes = parse_update(body)?;
    let service = todo_service_from_state(state.as_ref());
    let field = service.update(todo_id, &changes).await?;
    Ok(field.updated_message())
}

async fn delete_todo(
    State(state): State<Arc<AppState>>,
    Path(todo_id): Path<i32>,
) -> ApiResult<&'static str> {
    let service = todo_service_from_state(state.as_ref());
    service.delete(todo_id).await?;
    Ok(DELETED_MESSAGE)
}

fn invalid_body(rejection: JsonRejection) -> AppError {
    AppError::bad_request(format!("Invalid Request Body: {}", rejection.body_text()))
}

impl From<todo::Model> for TodoResponse {
    fn from(model: todo::Model) -> Self {
        // rows written elsewhere may hold a non-canonical date
        let due_date = DueDate::parse(&model.due_date)
            .map(|date| date.to_string())
            .unwrap_or(model.due_date);
        Self {
            id: model.id,
            todo: model.todo,
            priority: model.priority,
            status: model.status,
            category: model.category,
            due_date,
        }
    }
}

fn todo_service_from_state(state: &AppState) -> TodoService {
    ServiceContext::from_state(state).todo()
}
