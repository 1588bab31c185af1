use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Una fila completa de la tabla reports
#[derive(Debug, Serialize, FromRow)]
pub struct Report {
    pub id: i64,
    pub user_id: i64,
    pub article_id: i64,
    pub reason: Option<String>,
    pub status: String, // Pending | Reviewed
    pub report_date: DateTime<Utc>,
}

// Vista con joins para el listado (nombre del reportero y título del artículo)
#[derive(Debug, Serialize, FromRow)]
pub struct ReportView {
    pub id: i64,
    pub reporter: String,
    pub article_title: String,
    pub reason: Option<String>,
    pub status: String,
    pub report_date: DateTime<Utc>,
}

// Lo que recibimos del Frontend al reportar un artículo
#[derive(Debug, Deserialize)]
pub struct CreateReportSchema {
    pub user_id: i64,
    pub article_id: i64,
    pub reason: Option<String>,
}
