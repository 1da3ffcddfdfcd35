use anyhow::anyhow;
use postgres_types::ToSql;
use tokio_postgres::Row;
use tracing::info;

use super::Database;
use crate::error::ApiError;
use crate::models::product::{Price, Product, ProductChanges};

// NUMERIC travels as text in both directions so no decimal crate is needed
const PRODUCT_COLUMNS: &str = "id, title, content, price::TEXT";

fn product_from_row(row: &Row) -> Result<Product, ApiError> {
    let raw_price: String = row.get(3);
    let price = raw_price
        .parse::<Price>()
        .map_err(|e| ApiError::Internal(anyhow!("Stored price '{}' is unreadable: {}", raw_price, e)))?;

    Ok(Product {
        id: Some(row.get(0)),
        title: row.get(1),
        content: row.get(2),
        price,
    })
}

impl Database {
    /// Inserts an unsaved product and returns it with its new id.
    pub async fn create_product(&self, product: Product) -> Result<Product, ApiError> {
        let price = product.price.to_string();
        let client = self.get_connection().await?;

        let query = format!(
            "INSERT INTO products (title, content, price) VALUES ($1, $2, $3::TEXT::NUMERIC) RETURNING {}",
            PRODUCT_COLUMNS
        );

        let row = client
            .query_one(&query, &[&product.title, &product.content, &price])
            .await
            .map_err(ApiError::from)?;

        let created = product_from_row(&row)?;
        info!("Created product with id: {:?}", created.id);
        Ok(created)
    }

    pub async fn get_product_by_id(&self, product_id: i64) -> Result<Product, ApiError> {
        let client = self.get_connection().await?;
        let query = format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS);

        let row = client
            .query_opt(&query, &[&product_id])
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::not_found(format!("Product with id {}", product_id)))?;

        product_from_row(&row)
    }

    pub async fn get_all_products(&self) -> Result<Vec<Product>, ApiError> {
        let client = self.get_connection().await?;
        let query = format!("SELECT {} FROM products ORDER BY id", PRODUCT_COLUMNS);

        let rows = client.query(&query, &[]).await.map_err(ApiError::from)?;

        rows.iter().map(product_from_row).collect()
    }

    pub async fn update_product(&self, product_id: i64, changes: ProductChanges) -> Result<Product, ApiError> {
        if changes.is_empty() {
            return Err(ApiError::validation("At least one field must be provided for update"));
        }

        let price = changes.price.map(|p| p.to_string());

        let mut assignments = Vec::new();
        let mut params: Vec<&(dyn ToSql + Sync)> = Vec::new();

        if let Some(ref title) = changes.title {
            params.push(title);
            assignments.push(format!("title = ${}", params.len()));
        }

        if let Some(ref content) = changes.content {
            params.push(content);
            assignments.push(format!("content = ${}", params.len()));
        }

        if let Some(ref price) = price {
            params.push(price);
            assignments.push(format!("price = ${}::TEXT::NUMERIC", params.len()));
        }

        params.push(&product_id);
        let query = format!(
            "UPDATE products SET {} WHERE id = ${} RETURNING {}",
            assignments.join(", "),
            params.len(),
            PRODUCT_COLUMNS
        );

        let client = self.get_connection().await?;
        let row = client
            .query_opt(&query, &params)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::not_found(format!("Product with id {}", product_id)))?;

        let product = product_from_row(&row)?;
        info!("Updated product with id: {}", product_id);
        Ok(product)
    }

    pub async fn delete_product(&self, product_id: i64) -> Result<(), ApiError> {
        let client = self.get_connection().await?;

        let rows_affected = client
            .execute("DELETE FROM products WHERE id = $1", &[&product_id])
            .await
            .map_err(ApiError::from)?;

        if rows_affected == 0 {
            return Err(ApiError::not_found(format!("Product with id {}", product_id)));
        }

        info!("Deleted product with id: {}", product_id);
        Ok(())
    }
}
