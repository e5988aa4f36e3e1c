use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use shared::TodoStatus;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::debug;

use crate::domain::models::Todo;
use crate::storage::connection::DbConnection;
use crate::storage::traits::TodoStorage;

const SELECT_COLUMNS: &str =
    "SELECT id, name, description, created_at, updated_at, start_date_at, due_date_at, status FROM todos";

/// SQL-backed repository for todo operations
#[derive(Clone)]
pub struct TodoRepository {
    db: DbConnection,
}

impl TodoRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TodoStorage for TodoRepository {
    async fn store_todo(&self, todo: &Todo) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO todos (id, name, description, created_at, updated_at, start_date_at, due_date_at, status)
            VALUES ($1, $2, $3, $4, CAST($5 AS TEXT), CAST($6 AS TEXT), CAST($7 AS TEXT), $8)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(&todo.id)
        .bind(&todo.name)
        .bind(&todo.description)
        .bind(encode_timestamp(&todo.created_at))
        .bind(todo.updated_at.as_ref().map(encode_timestamp))
        .bind(todo.start_date_at.as_ref().map(encode_timestamp))
        .bind(todo.due_date_at.as_ref().map(encode_timestamp))
        .bind(todo.status.as_str())
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_todos(&self, status: Option<TodoStatus>) -> Result<Vec<Todo>> {
        debug!("Listing todos with status filter {:?}", status);

        let rows = match status {
            Some(status) => {
                let sql = format!("{SELECT_COLUMNS} WHERE status = $1 ORDER BY created_at ASC, id ASC");
                sqlx::query(&sql)
                    .bind(status.as_str())
                    .fetch_all(self.db.pool())
                    .await?
            }
            None => {
                let sql = format!("{SELECT_COLUMNS} ORDER BY created_at ASC, id ASC");
                sqlx::query(&sql).fetch_all(self.db.pool()).await?
            }
        };

        rows.iter().map(todo_from_row).collect()
    }

    async fn get_todo(&self, todo_id: &str) -> Result<Option<Todo>> {
        let sql = format!("{SELECT_COLUMNS} WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(todo_id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(todo_from_row).transpose()
    }

    async fn update_todo(&self, todo: &Todo) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE todos
            SET name = $1,
                description = $2,
                updated_at = CAST($3 AS TEXT),
                start_date_at = CAST($4 AS TEXT),
                due_date_at = CAST($5 AS TEXT),
                status = $6
            WHERE id = $7
            "#,
        )
        .bind(&todo.name)
        .bind(&todo.description)
        .bind(todo.updated_at.as_ref().map(encode_timestamp))
        .bind(todo.start_date_at.as_ref().map(encode_timestamp))
        .bind(todo.due_date_at.as_ref().map(encode_timestamp))
        .bind(todo.status.as_str())
        .bind(&todo.id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_todo(&self, todo_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(todo_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Fixed-width RFC 3339 so that text ordering matches time ordering
fn encode_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn decode_timestamp(column: &str, value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .with_context(|| format!("Invalid timestamp in column {column}: {value:?}"))
}

fn decode_optional_timestamp(row: &AnyRow, column: &str) -> Result<Option<DateTime<Utc>>> {
    let value: Option<String> = row.try_get(column)?;
    value.map(|v| decode_timestamp(column, &v)).transpose()
}

fn todo_from_row(row: &AnyRow) -> Result<Todo> {
    let status: String = row.try_get("status")?;
    let created_at: String = row.try_get("created_at")?;

    Ok(Todo {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        created_at: decode_timestamp("created_at", &created_at)?,
        updated_at: decode_optional_timestamp(row, "updated_at")?,
        start_date_at: decode_optional_timestamp(row, "start_date_at")?,
        due_date_at: decode_optional_timestamp(row, "due_date_at")?,
        status: status
            .parse()
            .context("Invalid status stored in todos table")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    async fn setup_test() -> TodoRepository {
        let db = DbConnection::in_memory().await.expect("Failed to create test database");
        TodoRepository::new(db)
    }

    fn sample_todo(id: &str, created_at: DateTime<Utc>) -> Todo {
        Todo {
            id: id.to_string(),
            name: format!("name {id}"),
            description: String::new(),
            created_at,
            updated_at: None,
            start_date_at: None,
            due_date_at: None,
            status: TodoStatus::Idle,
        }
    }

    #[tokio::test]
    async fn test_store_and_get_todo() {
        let repo = setup_test().await;
        let mut todo = sample_todo("abcd", Utc::now());
        todo.due_date_at = Some("2024-06-30T23:59:59.123456789Z".parse().unwrap());

        assert!(repo.store_todo(&todo).await.expect("Failed to store todo"));

        let stored = repo.get_todo("abcd").await.expect("Failed to get todo");
        assert_eq!(stored, Some(todo));
    }

    #[tokio::test]
    async fn test_store_duplicate_id_is_rejected() {
        let repo = setup_test().await;
        let todo = sample_todo("abcd", Utc::now());

        assert!(repo.store_todo(&todo).await.unwrap());

        let mut duplicate = sample_todo("abcd", Utc::now());
        duplicate.name = "other".to_string();
        assert!(!repo.store_todo(&duplicate).await.unwrap());

        let stored = repo.get_todo("abcd").await.unwrap().unwrap();
        assert_eq!(stored.name, todo.name);
    }

    #[tokio::test]
    async fn test_get_nonexistent_todo() {
        let repo = setup_test().await;
        let result = repo.get_todo("missing").await.expect("Query failed");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_list_todos_orders_and_filters() {
        let repo = setup_test().await;
        let base = Utc::now();

        let mut done = sample_todo("bbbb", base + Duration::seconds(1));
        done.status = TodoStatus::Done;
        let idle = sample_todo("aaaa", base);
        let mut in_process = sample_todo("cccc", base + Duration::seconds(2));
        in_process.status = TodoStatus::InProcess;

        for todo in [&done, &idle, &in_process] {
            repo.store_todo(todo).await.unwrap();
        }

        let all = repo.list_todos(None).await.unwrap();
        let ids: Vec<&str> = all.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["aaaa", "bbbb", "cccc"]);

        let only_done = repo.list_todos(Some(TodoStatus::Done)).await.unwrap();
        assert_eq!(only_done, vec![done]);

        let only_in_process = repo.list_todos(Some(TodoStatus::InProcess)).await.unwrap();
        assert_eq!(only_in_process, vec![in_process]);
    }

    #[tokio::test]
    async fn test_update_todo() {
        let repo = setup_test().await;
        let mut todo = sample_todo("abcd", Utc::now());
        todo.start_date_at = Some(Utc::now());
        repo.store_todo(&todo).await.unwrap();

        todo.name = "renamed".to_string();
        todo.status = TodoStatus::Done;
        todo.start_date_at = None;
        todo.updated_at = Some(Utc::now());
        assert!(repo.update_todo(&todo).await.unwrap());

        let stored = repo.get_todo("abcd").await.unwrap();
        assert_eq!(stored, Some(todo));
    }

    #[tokio::test]
    async fn test_update_nonexistent_todo() {
        let repo = setup_test().await;
        let todo = sample_todo("abcd", Utc::now());
        assert!(!repo.update_todo(&todo).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_todo() {
        let repo = setup_test().await;
        repo.store_todo(&sample_todo("abcd", Utc::now())).await.unwrap();

        let deleted = repo.delete_todo("abcd").await.expect("Failed to delete todo");
        assert!(deleted, "Todo should have been deleted");
        assert!(repo.get_todo("abcd").await.unwrap().is_none());

        let deleted_again = repo.delete_todo("abcd").await.expect("Failed to re-delete todo");
        assert!(!deleted_again, "Todo should not exist to be deleted");
    }

    #[test]
    fn test_timestamp_encoding_is_fixed_width() {
        let whole: DateTime<Utc> = "2024-05-01T10:00:05Z".parse().unwrap();
        let fraction: DateTime<Utc> = "2024-05-01T10:00:05.5Z".parse().unwrap();

        assert_eq!(encode_timestamp(&whole), "2024-05-01T10:00:05.000000000Z");
        assert!(encode_timestamp(&whole) < encode_timestamp(&fraction));
        assert_eq!(decode_timestamp("created_at", &encode_timestamp(&fraction)).unwrap(), fraction);
    }
}
