//! Message log operations.

use tracing::debug;

use super::errors::StoreResult;
use super::models::{bind_field, row_to_record, FieldValue, Record};
use super::pool::{log_failure, Store};

impl Store {
    /// Every row of `Messages`
    pub async fn list_messages(&self) -> StoreResult<Vec<Record>> {
        let rows = sqlx::query("SELECT * from Messages")
            .fetch_all(self.pool())
            .await
            .and_then(|rows| rows.iter().map(row_to_record).collect::<Result<Vec<_>, _>>());

        log_failure("list_messages", rows)
    }

    /// Append a message; true iff a row was written
    pub async fn insert_message(&self, message: &str) -> StoreResult<bool> {
        let result = sqlx::query("INSERT INTO Messages (message) VALUES (?)")
            .bind(message)
            .execute(self.pool())
            .await;

        let changed = log_failure("insert_message", result)?.rows_affected() > 0;
        debug!(changed, "insert_message");
        Ok(changed)
    }

    /// Replace the text of message `id`; true iff a row was changed
    pub async fn update_message(&self, id: &FieldValue, message: &str) -> StoreResult<bool> {
        let id = Some(id.clone());
        let query = sqlx::query("Update Messages SET message = ? WHERE id = ?").bind(message);
        let result = bind_field(query, &id).execute(self.pool()).await;

        let changed = log_failure("update_message", result)?.rows_affected() > 0;
        debug!(changed, "update_message");
        Ok(changed)
    }

    /// Remove message `id`; true iff a row was deleted
    pub async fn delete_message(&self, id: &str) -> StoreResult<bool> {
        let result = sqlx::query("Delete from Messages WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await;

        let changed = log_failure("delete_message", result)?.rows_affected() > 0;
        debug!(changed, "delete_message");
        Ok(changed)
    }
}
