//! Parameterized SQL for the `todo` table.
//!
//! Client values only ever travel in [`SqlQuery::params`]. The SQL text is
//! assembled from fixed fragments and allow-listed column names.

use sea_orm::{DbBackend, Statement, Value};

use crate::validation::{DueDate, FieldDomain, NewTodo, TodoChange, TodoFilter, ValidationError};

const TODO_COLUMNS: &str = "id, todo, priority, status, category, due_date";

/// SQL text with `?` placeholders plus the values bound to them, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlQuery {
    sql: String,
    params: Vec<Value>,
}

impl SqlQuery {
    pub fn new(initial_sql: impl Into<String>) -> Self {
        Self {
            sql: initial_sql.into(),
            params: Vec::new(),
        }
    }

    /// Appends trusted SQL text.
    pub fn push(&mut self, sql: &str) -> &mut Self {
        self.sql.push_str(sql);
        self
    }

    /// Appends a placeholder and binds `value` to it.
    pub fn push_bind(&mut self, value: impl Into<Value>) -> &mut Self {
        self.sql.push('?');
        self.params.push(value.into());
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    pub fn into_statement(self) -> Statement {
        Statement::from_sql_and_values(DbBackend::Sqlite, self.sql, self.params)
    }
}

fn select_todos() -> SqlQuery {
    SqlQuery::new(format!("SELECT {TODO_COLUMNS} FROM todo WHERE 1 = 1"))
}

/// One `AND` clause per supplied filter, always in the order status,
/// priority, category, search.
pub fn filter_query(filter: &TodoFilter) -> SqlQuery {
    let mut query = select_todos();
    if let Some(status) = filter.status {
        query.push(" AND status = ").push_bind(status.as_str());
    }
    if let Some(priority) = filter.priority {
        query.push(" AND priority = ").push_bind(priority.as_str());
    }
    if let Some(category) = filter.category {
        query.push(" AND category = ").push_bind(category.as_str());
    }
    if let Some(term) = filter.search.as_deref() {
        query.push(" AND todo LIKE ").push_bind(format!("%{term}%"));
    }
    query
}

pub fn lookup_by_id(id: i32) -> SqlQuery {
    let mut query = SqlQuery::new(format!("SELECT {TODO_COLUMNS} FROM todo WHERE id = "));
    query.push_bind(id);
    query
}

pub fn lookup_by_date(date: DueDate) -> SqlQuery {
    let mut query = SqlQuery::new(format!("SELECT {TODO_COLUMNS} FROM todo WHERE due_date = "));
    query.push_bind(date.to_string());
    query
}

pub fn insert(todo: &NewTodo) -> SqlQuery {
    let mut query =
        SqlQuery::new("INSERT INTO todo (todo, category, priority, status, due_date) VALUES (");
    query
        .push_bind(todo.todo.clone())
        .push(", ")
        .push_bind(todo.category.as_str())
        .push(", ")
        .push_bind(todo.priority.as_str())
        .push(", ")
        .push_bind(todo.status.as_str())
        .push(", ")
        .push_bind(todo.due_date.to_string())
        .push(")");
    query
}

/// `SET` clauses follow the order of `changes`; the id predicate comes last.
pub fn update(id: i32, changes: &[TodoChange]) -> Result<SqlQuery, ValidationError> {
    if changes.is_empty() {
        return Err(ValidationError::EmptyUpdate);
    }

    let mut query = SqlQuery::new("UPDATE todo SET ");
    for (index, change) in changes.iter().enumerate() {
        if index > 0 {
            query.push(", ");
        }
        query
            .push(change.field().column())
            .push(" = ")
            .push_bind(change_value(change));
    }
    query.push(" WHERE id = ").push_bind(id);
    Ok(query)
}

pub fn delete_by_id(id: i32) -> SqlQuery {
    let mut query = SqlQuery::new("DELETE FROM todo WHERE id = ");
    query.push_bind(id);
    query
}

fn change_value(change: &TodoChange) -> Value {
    match change {
        TodoChange::Status(status) => status.as_str().into(),
        TodoChange::Priority(priority) => priority.as_str().into(),
        TodoChange::Category(category) => category.as_str().into(),
        TodoChange::Todo(text) => text.clone().into(),
        TodoChange::DueDate(date) => date.to_string().into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{Category, Priority, Status};

    fn date(value: &str) -> DueDate {
        value.parse().expect("test date should parse")
    }

    #[test]
    fn no_filters_selects_everything() {
        let query = filter_query(&TodoFilter::default());
        assert_eq!(
            query.sql(),
            "SELECT id, todo, priority, status, category, due_date FROM todo WHERE 1 = 1"
        );
        assert!(query.params().is_empty());
    }

    #[test]
    fn every_filter_combination_adds_one_clause_each_in_fixed_order() {
        let clauses = [
            " AND status = ?",
            " AND priority = ?",
            " AND category = ?",
            " AND todo LIKE ?",
        ];

        for mask in 0u8..16 {
            let filter = TodoFilter {
                status: (mask & 1 != 0).then_some(Status::Done),
                priority: (mask & 2 != 0).then_some(Priority::High),
                category: (mask & 4 != 0).then_some(Category::Work),
                search: (mask & 8 != 0).then(|| "milk".to_string()),
            };
            let query = filter_query(&filter);

            let expected: String = clauses
                .iter()
                .enumerate()
                .filter(|(bit, _)| mask & (1 << bit) != 0)
                .map(|(_, clause)| *clause)
                .collect();
            assert_eq!(
                query.sql(),
                format!("SELECT {TODO_COLUMNS} FROM todo WHERE 1 = 1{expected}"),
                "mask {mask:04b}"
            );
            assert_eq!(query.sql().matches(" AND ").count(), query.params().len());
            assert_eq!(query.params().len(), mask.count_ones() as usize);
        }
    }

    #[test]
    fn filter_params_follow_clause_order() {
        let query = filter_query(&TodoFilter {
            status: Some(Status::InProgress),
            priority: None,
            category: Some(Category::Learning),
            search: Some("rust".to_string()),
        });
        assert_eq!(
            query.params(),
            &[
                Value::from("IN PROGRESS"),
                Value::from("LEARNING"),
                Value::from("%rust%"),
            ]
        );
    }

    #[test]
    fn search_term_is_bound_not_inlined() {
        let term = "x' OR '1'='1";
        let query = filter_query(&TodoFilter {
            search: Some(term.to_string()),
            ..Default::default()
        });
        assert!(!query.sql().contains(term));
        assert_eq!(query.params(), &[Value::from(format!("%{term}%"))]);
    }

    #[test]
    fn empty_search_term_still_counts_as_a_filter() {
        let query = filter_query(&TodoFilter {
            search: Some(String::new()),
            ..Default::default()
        });
        assert!(query.sql().ends_with(" AND todo LIKE ?"));
        assert_eq!(query.params(), &[Value::from("%%")]);
    }

    #[test]
    fn lookups_bind_a_single_value() {
        let by_id = lookup_by_id(42);
        assert!(by_id.sql().ends_with("FROM todo WHERE id = ?"));
        assert_eq!(by_id.params(), &[Value::from(42)]);

        let by_date = lookup_by_date(date("2021-4-2"));
        assert!(by_date.sql().ends_with("FROM todo WHERE due_date = ?"));
        assert_eq!(by_date.params(), &[Value::from("2021-04-02")]);
    }

    #[test]
    fn insert_uses_table_column_order() {
        let query = insert(&NewTodo {
            todo: "Buy milk".to_string(),
            category: Category::Home,
            priority: Priority::Medium,
            status: Status::ToDo,
            due_date: date("2024-3-5"),
        });
        assert_eq!(
            query.sql(),
            "INSERT INTO todo (todo, category, priority, status, due_date) VALUES (?, ?, ?, ?, ?)"
        );
        assert_eq!(
            query.params(),
            &[
                Value::from("Buy milk"),
                Value::from("HOME"),
                Value::from("MEDIUM"),
                Value::from("TO DO"),
                Value::from("2024-03-05"),
            ]
        );
    }

    #[test]
    fn update_keeps_caller_order_and_ends_with_id() {
        let query = update(
            9,
            &[
                TodoChange::DueDate(date("2022-12-1")),
                TodoChange::Status(Status::Done),
            ],
        )
        .expect("non-empty update should build");
        assert_eq!(query.sql(), "UPDATE todo SET due_date = ?, status = ? WHERE id = ?");
        assert_eq!(
            query.params(),
            &[Value::from("2022-12-01"), Value::from("DONE"), Value::from(9)]
        );
    }

    #[test]
    fn single_field_update_touches_one_column() {
        let query = update(3, &[TodoChange::Status(Status::Done)]).expect("update should build");
        assert_eq!(query.sql(), "UPDATE todo SET status = ? WHERE id = ?");
    }

    #[test]
    fn empty_update_is_rejected() {
        assert_eq!(update(1, &[]), Err(ValidationError::EmptyUpdate));
    }

    #[test]
    fn delete_binds_id() {
        let query = delete_by_id(5);
        assert_eq!(query.sql(), "DELETE FROM todo WHERE id = ?");
        assert_eq!(query.params(), &[Value::from(5)]);
    }
}
