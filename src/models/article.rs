use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Una fila completa de la tabla articles
#[derive(Debug, Serialize, FromRow)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub url: String,
    pub source_id: i64,
    pub publish_date: NaiveDate,
    pub review_status: String, // Normal | Under Review
    pub created_at: Option<DateTime<Utc>>,
}

// Lo que recibimos del Frontend al crear un artículo
#[derive(Debug, Deserialize)]
pub struct CreateArticleSchema {
    pub title: String,
    pub content: String,
    pub url: String,
    pub source_id: i64,
    pub publish_date: NaiveDate,
}
