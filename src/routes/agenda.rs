use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;

use crate::{
    db::entities::todo,
    response::ApiResult,
    services::ServiceContext,
    state::AppState,
    validation::{ValidationError, validate_date},
};

#[derive(Debug, Deserialize)]
pub struct AgendaQuery {
    pub date: Option<String>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/agenda/", get(agenda))
        .with_state(state)
}

/// Raw rows due on the requested date.
async fn agenda(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AgendaQuery>,
) -> ApiResult<Json<Vec<todo::Model>>> {
    let date = query
        .date
        .as_deref()
        .ok_or(ValidationError::InvalidDate)
        .and_then(validate_date)?;
    let service = ServiceContext::from_state(state.as_ref()).todo();
    let todos = service.agenda(date).await?;
    Ok(Json(todos))
}
