//! Visit statistics operations over the `estadistica` table.
//!
//! The table is keyed by a caller-supplied `id`; nothing here allocates keys.

use sqlx::sqlite::SqliteArguments;
use sqlx::query::Query;
use sqlx::Sqlite;

use super::errors::StoreResult;
use super::models::{bind_field, row_to_record, EstadisticaFields, NewEstadistica, Record};
use super::pool::{log_failure, Store};

const INSERT_ESTADISTICA: &str = "INSERT INTO estadistica (id, fecha_ingreso, hora_ingreso, pais, ciudad, tiempo, ruta, dispositivo) VALUES (?, ?, ?, ?, ?, ?, ?, ?)";

const UPDATE_ESTADISTICA: &str = "Update estadistica SET fecha_ingreso = ?, hora_ingreso = ?, pais = ?, ciudad = ?, tiempo = ?, ruta = ?, dispositivo = ? WHERE id = ?";

fn bind_fields<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    fields: &'q EstadisticaFields,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for value in fields.values() {
        query = bind_field(query, value);
    }
    query
}

impl Store {
    /// Full scan of `estadistica`
    pub async fn list_estadisticas(&self) -> StoreResult<Vec<Record>> {
        let rows = sqlx::query("SELECT * FROM estadistica")
            .fetch_all(self.pool())
            .await
            .and_then(|rows| rows.iter().map(row_to_record).collect::<Result<Vec<_>, _>>());

        log_failure("list_estadisticas", rows)
    }

    /// The row with key `id`, if any
    pub async fn get_estadistica(&self, id: &str) -> StoreResult<Option<Record>> {
        let row = sqlx::query("SELECT * FROM estadistica WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .and_then(|row| row.as_ref().map(row_to_record).transpose());

        log_failure("get_estadistica", row)
    }

    /// Insert a complete record; true iff a row was written
    pub async fn insert_estadistica(&self, estadistica: NewEstadistica) -> StoreResult<bool> {
        let (id, fields) = estadistica.into_parts();

        let query = bind_field(sqlx::query(INSERT_ESTADISTICA), &id);
        let result = bind_fields(query, &fields).execute(self.pool()).await;

        Ok(log_failure("insert_estadistica", result)?.rows_affected() > 0)
    }

    /// Replace every non-key column of row `id`; true iff a row was changed
    pub async fn update_estadistica(&self, id: &str, fields: &EstadisticaFields) -> StoreResult<bool> {
        let result = bind_fields(sqlx::query(UPDATE_ESTADISTICA), fields)
            .bind(id)
            .execute(self.pool())
            .await;

        Ok(log_failure("update_estadistica", result)?.rows_affected() > 0)
    }

    /// Remove row `id`; true iff a row was deleted
    pub async fn delete_estadistica(&self, id: &str) -> StoreResult<bool> {
        let result = sqlx::query("Delete FROM estadistica WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await;

        Ok(log_failure("delete_estadistica", result)?.rows_affected() > 0)
    }
}
