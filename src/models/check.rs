use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Una fila de la tabla credibility_checks. Inmutable una vez creada:
// no existe ruta de UPDATE ni DELETE para los chequeos.
#[derive(Debug, Serialize, FromRow)]
pub struct CredibilityCheck {
    pub id: i64,
    pub article_id: i64,
    pub fact_check_score: Option<f64>,
    pub final_verdict: String, // Real | Fake | Unverified
    pub checked_by: Option<i64>,
    pub check_date: DateTime<Utc>,
}

// Vista con joins para el listado (título del artículo y nombre del checker)
#[derive(Debug, Serialize, FromRow)]
pub struct CheckView {
    pub id: i64,
    pub article_title: String,
    pub fact_check_score: Option<f64>,
    pub final_verdict: String,
    pub checked_by: Option<String>,
    pub check_date: DateTime<Utc>,
}

// Lo que recibimos del Frontend al registrar un chequeo
#[derive(Debug, Deserialize)]
pub struct CreateCheckSchema {
    pub article_id: i64,
    pub fact_check_score: Option<f64>, // null cuenta como 0 en el promedio
    pub final_verdict: String,
    pub checked_by: i64,
}
