use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Una fila completa de la tabla sources. trust_rating es un valor DERIVADO:
// lo recalcula el backend después de cada chequeo de credibilidad.
#[derive(Debug, Serialize, FromRow)]
pub struct Source {
    pub id: i64,
    pub name: String,
    pub domain: String,
    pub trust_rating: f64,
    pub created_at: Option<DateTime<Utc>>,
}

// Lo que recibimos del Frontend al crear una fuente
#[derive(Debug, Deserialize)]
pub struct CreateSourceSchema {
    pub name: String,
    pub domain: String,
    pub trust: Option<f64>, // opcional, default 50.0
}
