use postgres_types::ToSql;
use tokio_postgres::Row;
use tracing::info;

use super::Database;
use crate::error::ApiError;
use crate::models::person::{CreatePersonRequest, Person, UpdatePersonRequest};

fn person_from_row(row: &Row) -> Person {
    Person {
        id: row.get(0),
        first_name: row.get(1),
        last_name: row.get(2),
    }
}

impl Database {
    pub async fn create_person(&self, request: CreatePersonRequest) -> Result<Person, ApiError> {
        request.validate().map_err(ApiError::Validation)?;

        let first_name = request.first_name.trim();
        let last_name = request.last_name.trim();
        let client = self.get_connection().await?;

        let row = client
            .query_one(
                "INSERT INTO persons (first_name, last_name) VALUES ($1, $2) RETURNING id, first_name, last_name",
                &[&first_name, &last_name],
            )
            .await
            .map_err(ApiError::from)?;

        let person = person_from_row(&row);
        info!("Created person with id: {}", person.id);
        Ok(person)
    }

    pub async fn get_person_by_id(&self, person_id: i64) -> Result<Person, ApiError> {
        let client = self.get_connection().await?;

        let row = client
            .query_opt(
                "SELECT id, first_name, last_name FROM persons WHERE id = $1",
                &[&person_id],
            )
            .await
            .map_err(ApiError::from)?;

        row.as_ref()
            .map(person_from_row)
            .ok_or_else(|| ApiError::not_found(format!("Person with id {}", person_id)))
    }

    pub async fn get_all_persons(&self) -> Result<Vec<Person>, ApiError> {
        let client = self.get_connection().await?;

        let rows = client
            .query("SELECT id, first_name, last_name FROM persons ORDER BY id", &[])
            .await
            .map_err(ApiError::from)?;

        Ok(rows.iter().map(person_from_row).collect())
    }

    pub async fn update_person(&self, person_id: i64, request: UpdatePersonRequest) -> Result<Person, ApiError> {
        request.validate().map_err(ApiError::Validation)?;

        let first_name = request.first_name.as_deref().map(str::trim);
        let last_name = request.last_name.as_deref().map(str::trim);

        let mut assignments = Vec::new();
        let mut params: Vec<&(dyn ToSql + Sync)> = Vec::new();

        if let Some(ref first_name) = first_name {
            params.push(first_name);
            assignments.push(format!("first_name = ${}", params.len()));
        }

        if let Some(ref last_name) = last_name {
            params.push(last_name);
            assignments.push(format!("last_name = ${}", params.len()));
        }

        params.push(&person_id);
        let query = format!(
            "UPDATE persons SET {} WHERE id = ${} RETURNING id, first_name, last_name",
            assignments.join(", "),
            params.len()
        );

        let client = self.get_connection().await?;
        let row = client
            .query_opt(&query, &params)
            .await
            .map_err(ApiError::from)?;

        let person = row
            .as_ref()
            .map(person_from_row)
            .ok_or_else(|| ApiError::not_found(format!("Person with id {}", person_id)))?;

        info!("Updated person with id: {}", person.id);
        Ok(person)
    }

    pub async fn delete_person(&self, person_id: i64) -> Result<(), ApiError> {
        let client = self.get_connection().await?;

        let rows_affected = client
            .execute("DELETE FROM persons WHERE id = $1", &[&person_id])
            .await
            .map_err(ApiError::from)?;

        if rows_affected == 0 {
            return Err(ApiError::not_found(format!("Person with id {}", person_id)));
        }

        info!("Deleted person with id: {}", person_id);
        Ok(())
    }
}
