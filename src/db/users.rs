use postgres_types::ToSql;
use tokio_postgres::Row;
use tracing::info;

use super::Database;
use crate::error::ApiError;
use crate::models::user::{CreateUserRequest, UpdateUserRequest, User};

const USER_COLUMNS: &str = "id, username, email, password, profile_picture, created_at, updated_at";

fn user_from_row(row: &Row) -> User {
    User {
        id: row.get(0),
        username: row.get(1),
        email: row.get(2),
        password: row.get(3),
        profile_picture: row.get(4),
        created_at: row.get(5),
        updated_at: row.get(6),
    }
}

impl Database {
    /// Username and email uniqueness is left to the table's UNIQUE
    /// constraints; a clash surfaces as `ApiError::Conflict`.
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<User, ApiError> {
        request.validate().map_err(ApiError::Validation)?;

        let username = request.get_normalized_username();
        let email = request.get_normalized_email();
        let profile_picture = request.get_normalized_profile_picture();

        let client = self.get_connection().await?;
        let query = format!(
            "INSERT INTO users (username, email, password, profile_picture) VALUES ($1, $2, $3, $4) RETURNING {}",
            USER_COLUMNS
        );

        let row = client
            .query_one(&query, &[&username, &email, &request.password, &profile_picture])
            .await
            .map_err(ApiError::from)?;

        let user = user_from_row(&row);
        info!("Created user with id: {}", user.id);
        Ok(user)
    }

    pub async fn get_user_by_id(&self, user_id: i64) -> Result<User, ApiError> {
        let client = self.get_connection().await?;
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);

        let row = client
            .query_opt(&query, &[&user_id])
            .await
            .map_err(ApiError::from)?;

        row.as_ref()
            .map(user_from_row)
            .ok_or_else(|| ApiError::not_found(format!("User with id {}", user_id)))
    }

    pub async fn get_all_users(&self) -> Result<Vec<User>, ApiError> {
        let client = self.get_connection().await?;
        let query = format!("SELECT {} FROM users ORDER BY created_at DESC, id DESC", USER_COLUMNS);

        let rows = client.query(&query, &[]).await.map_err(ApiError::from)?;

        Ok(rows.iter().map(user_from_row).collect())
    }

    /// Replaces every editable column (PUT semantics).
    pub async fn replace_user(&self, user_id: i64, request: CreateUserRequest) -> Result<User, ApiError> {
        request.validate().map_err(ApiError::Validation)?;

        let username = request.get_normalized_username();
        let email = request.get_normalized_email();
        let profile_picture = request.get_normalized_profile_picture();

        let client = self.get_connection().await?;
        let query = format!(
            "UPDATE users SET username = $1, email = $2, password = $3, profile_picture = $4, updated_at = NOW() \
             WHERE id = $5 RETURNING {}",
            USER_COLUMNS
        );

        let row = client
            .query_opt(
                &query,
                &[&username, &email, &request.password, &profile_picture, &user_id],
            )
            .await
            .map_err(ApiError::from)?;

        let user = row
            .as_ref()
            .map(user_from_row)
            .ok_or_else(|| ApiError::not_found(format!("User with id {}", user_id)))?;

        info!("Replaced user with id: {}", user.id);
        Ok(user)
    }

    /// Updates only the supplied columns (PATCH semantics).
    pub async fn update_user(&self, user_id: i64, request: UpdateUserRequest) -> Result<User, ApiError> {
        request.validate().map_err(ApiError::Validation)?;

        let username = request.get_normalized_username();
        let email = request.get_normalized_email();
        let profile_picture = request.get_normalized_profile_picture();

        let mut assignments = Vec::new();
        let mut params: Vec<&(dyn ToSql + Sync)> = Vec::new();

        if let Some(ref username) = username {
            params.push(username);
            assignments.push(format!("username = ${}", params.len()));
        }

        if let Some(ref email) = email {
            params.push(email);
            assignments.push(format!("email = ${}", params.len()));
        }

        if let Some(ref password) = request.password {
            params.push(password);
            assignments.push(format!("password = ${}", params.len()));
        }

        if let Some(ref profile_picture) = profile_picture {
            params.push(profile_picture);
            assignments.push(format!("profile_picture = ${}", params.len()));
        }

        assignments.push("updated_at = NOW()".to_string());
        params.push(&user_id);

        let query = format!(
            "UPDATE users SET {} WHERE id = ${} RETURNING {}",
            assignments.join(", "),
            params.len(),
            USER_COLUMNS
        );

        let client = self.get_connection().await?;
        let row = client
            .query_opt(&query, &params)
            .await
            .map_err(ApiError::from)?;

        let user = row
            .as_ref()
            .map(user_from_row)
            .ok_or_else(|| ApiError::not_found(format!("User with id {}", user_id)))?;

        info!("Updated user with id: {}", user.id);
        Ok(user)
    }

    pub async fn delete_user(&self, user_id: i64) -> Result<(), ApiError> {
        let client = self.get_connection().await?;

        let rows_affected = client
            .execute("DELETE FROM users WHERE id = $1", &[&user_id])
            .await
            .map_err(ApiError::from)?;

        if rows_affected == 0 {
            return Err(ApiError::not_found(format!("User with id {}", user_id)));
        }

        info!("Deleted user with id: {}", user_id);
        Ok(())
    }
}
