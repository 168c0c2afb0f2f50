//! Result store operations.
//!
//! The store is keyed by the normalized (lowercased) query and holds the
//! serialized analytics payload exactly as it was first computed.

use super::connection::CacheDb;
use crate::Error;
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

impl CacheDb {
    /// Get the stored payload for a normalized query.
    ///
    /// Returns None if the query has never been computed.
    pub async fn lookup_result(&self, query: &str) -> Result<Option<String>, Error> {
        let query = query.to_string();
        self.conn
            .call(move |conn| -> Result<Option<String>, Error> {
                let mut stmt = conn.prepare("SELECT result FROM results WHERE query = ?1")?;

                let result = stmt.query_row(params![query], |row| row.get(0));

                match result {
                    Ok(json) => Ok(Some(json)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Insert or replace the stored payload for a normalized query.
    ///
    /// Uses UPSERT semantics: last write wins. Concurrent writers for the same
    /// key may race; either outcome is acceptable.
    pub async fn upsert_result(&self, query: &str, result_json: &str) -> Result<(), Error> {
        let query = query.to_string();
        let result_json = result_json.to_string();
        let created_at = chrono::Utc::now().to_rfc3339();

        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT INTO results (query, result, created_at)
                    VALUES (?1, ?2, ?3)
                    ON CONFLICT(query) DO UPDATE SET
                        result = excluded.result,
                        created_at = excluded.created_at",
                    params![query, result_json, created_at],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Number of stored results.
    pub async fn result_count(&self) -> Result<u64, Error> {
        self.conn
            .call(|conn| -> Result<u64, Error> {
                let count: i64 = conn.query_row("SELECT COUNT(*) FROM results", [], |row| row.get(0))?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }

    /// Delete every stored result.
    ///
    /// Returns the number of deleted entries. This is the only invalidation the
    /// store supports.
    pub async fn clear_results(&self) -> Result<u64, Error> {
        self.conn
            .call(|conn| -> Result<u64, Error> {
                let deleted = conn.execute("DELETE FROM results", [])?;
                Ok(deleted as u64)
            })
            .await
            .map_err(Error::from)
    }
}
