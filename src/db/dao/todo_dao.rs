use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, ExecResult};
use tracing::debug;

use super::{DaoLayerError, DaoResult};
use crate::db::entities::prelude::Todo;
use crate::db::entities::todo;
use crate::db::query::{self, SqlQuery};
use crate::validation::{DueDate, NewTodo, TodoChange, TodoFilter};

const ENTITY: &str = "todo";

/// Runs built statements against the `todo` table. Each method issues exactly
/// one statement.
#[derive(Clone)]
pub struct TodoDao {
    db: DatabaseConnection,
}

impl TodoDao {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    pub async fn find_all(&self, filter: &TodoFilter) -> DaoResult<Vec<todo::Model>> {
        self.fetch_all(query::filter_query(filter)).await
    }

    pub async fn find_by_id(&self, id: i32) -> DaoResult<todo::Model> {
        let query = query::lookup_by_id(id);
        debug!(sql = query.sql(), "fetching todo");
        Todo::find()
            .from_raw_sql(query.into_statement())
            .one(&self.db)
            .await?
            .ok_or(DaoLayerError::NotFound { entity: ENTITY, id })
    }

    pub async fn find_by_due_date(&self, date: DueDate) -> DaoResult<Vec<todo::Model>> {
        self.fetch_all(query::lookup_by_date(date)).await
    }

    /// Returns the id SQLite assigned to the new row.
    pub async fn insert(&self, todo: &NewTodo) -> DaoResult<u64> {
        let result = self.execute(query::insert(todo)).await?;
        Ok(result.last_insert_id())
    }

    pub async fn update(&self, id: i32, changes: &[TodoChange]) -> DaoResult<()> {
        let query = query::update(id, changes)?;
        let result = self.execute(query).await?;
        if result.rows_affected() == 0 {
            return Err(DaoLayerError::NotFound { entity: ENTITY, id });
        }
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> DaoResult<()> {
        let result = self.execute(query::delete_by_id(id)).await?;
        if result.rows_affected() == 0 {
            return Err(DaoLayerError::NotFound { entity: ENTITY, id });
        }
        Ok(())
    }

    async fn fetch_all(&self, query: SqlQuery) -> DaoResult<Vec<todo::Model>> {
        debug!(sql = query.sql(), params = query.params().len(), "fetching todos");
        Ok(Todo::find()
            .from_raw_sql(query.into_statement())
            .all(&self.db)
            .await?)
    }

    async fn execute(&self, query: SqlQuery) -> DaoResult<ExecResult> {
        debug!(sql = query.sql(), params = query.params().len(), "executing");
        Ok(self.db.execute_raw(query.into_statement()).await?)
    }
}
