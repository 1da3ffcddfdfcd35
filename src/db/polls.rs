use tokio_postgres::Row;
use tracing::info;

use super::Database;
use crate::error::ApiError;
use crate::models::poll::{PollData, PollDataRequest};

fn poll_from_row(row: &Row) -> PollData {
    PollData {
        id: row.get(0),
        title: row.get(1),
        created_at: row.get(2),
    }
}

impl Database {
    pub async fn create_poll(&self, request: PollDataRequest) -> Result<PollData, ApiError> {
        request.validate().map_err(ApiError::Validation)?;

        let title = request.get_normalized_title();
        let client = self.get_connection().await?;

        let row = client
            .query_one(
                "INSERT INTO poll_data (title) VALUES ($1) RETURNING id, title, created_at",
                &[&title],
            )
            .await
            .map_err(ApiError::from)?;

        let poll = poll_from_row(&row);
        info!("Created poll with id: {}", poll.id);
        Ok(poll)
    }

    pub async fn get_poll_by_id(&self, poll_id: i64) -> Result<PollData, ApiError> {
        let client = self.get_connection().await?;

        let row = client
            .query_opt("SELECT id, title, created_at FROM poll_data WHERE id = $1", &[&poll_id])
            .await
            .map_err(ApiError::from)?;

        row.as_ref()
            .map(poll_from_row)
            .ok_or_else(|| ApiError::not_found(format!("Poll with id {}", poll_id)))
    }

    pub async fn get_all_polls(&self) -> Result<Vec<PollData>, ApiError> {
        let client = self.get_connection().await?;

        let rows = client
            .query(
                "SELECT id, title, created_at FROM poll_data ORDER BY created_at DESC, id DESC",
                &[],
            )
            .await
            .map_err(ApiError::from)?;

        Ok(rows.iter().map(poll_from_row).collect())
    }

    /// The title is the only editable column, so PUT and PATCH coincide.
    pub async fn update_poll(&self, poll_id: i64, request: PollDataRequest) -> Result<PollData, ApiError> {
        request.validate().map_err(ApiError::Validation)?;

        let title = request.get_normalized_title();
        let client = self.get_connection().await?;

        let row = client
            .query_opt(
                "UPDATE poll_data SET title = $1 WHERE id = $2 RETURNING id, title, created_at",
                &[&title, &poll_id],
            )
            .await
            .map_err(ApiError::from)?;

        let poll = row
            .as_ref()
            .map(poll_from_row)
            .ok_or_else(|| ApiError::not_found(format!("Poll with id {}", poll_id)))?;

        info!("Updated poll with id: {}", poll.id);
        Ok(poll)
    }

    pub async fn delete_poll(&self, poll_id: i64) -> Result<(), ApiError> {
        let client = self.get_connection().await?;

        let rows_affected = client
            .execute("DELETE FROM poll_data WHERE id = $1", &[&poll_id])
            .await
            .map_err(ApiError::from)?;

        if rows_affected == 0 {
            return Err(ApiError::not_found(format!("Poll with id {}", poll_id)));
        }

        info!("Deleted poll with id: {}", poll_id);
        Ok(())
    }
}
