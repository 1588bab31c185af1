use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use crate::{
    db::DbPool,
    error::ApiError,
    models::source::{CreateSourceSchema, Source},
    trust,
};

// GET /api/sources
pub async fn list_sources_handler(State(pool): State<DbPool>) -> impl IntoResponse {
    let result = sqlx::query_as::<_, Source>(
        "SELECT id, name, domain, trust_rating, created_at FROM sources ORDER BY name",
    )
    .fetch_all(&pool)
    .await;

    match result {
        Ok(sources) => (StatusCode::OK, Json(sources)).into_response(),
        Err(e) => {
            tracing::error!("Error listando fuentes: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error interno").into_response()
        }
    }
}

// POST /api/sources
pub async fn create_source_handler(
    State(pool): State<DbPool>,
    Json(body): Json<CreateSourceSchema>,
) -> Result<impl IntoResponse, ApiError> {
    // El trust inicial es opcional; si viene tiene que ser un porcentaje válido
    let trust = body.trust.unwrap_or(50.0);
    if !(0.0..=100.0).contains(&trust) {
        return Err(ApiError::validation(
            "trust",
            format!("El trust {} está fuera del rango [0, 100]", trust),
        ));
    }

    let source = sqlx::query_as::<_, Source>(
        "INSERT INTO sources (name, domain, trust_rating)
         VALUES ($1, $2, $3)
         RETURNING id, name, domain, trust_rating, created_at",
    )
    .bind(&body.name)
    .bind(&body.domain)
    .bind(trust)
    .fetch_one(&pool)
    .await?;

    Ok((StatusCode::CREATED, Json(source)))
}

// GET /api/sources/:id/avg_credibility
// Misma fórmula que el recálculo del trust rating; 0.0 si no hay chequeos
pub async fn avg_credibility_handler(
    Path(source_id): Path<i64>,
    State(pool): State<DbPool>,
) -> Result<impl IntoResponse, ApiError> {
    let exists = sqlx::query_scalar::<_, i64>("SELECT id FROM sources WHERE id = $1")
        .bind(source_id)
        .fetch_optional(&pool)
        .await?;

    if exists.is_none() {
        return Err(ApiError::not_found(format!("Fuente {} no encontrada", source_id)));
    }

    let score = trust::average_credibility(&pool, source_id).await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "source_id": source_id, "avg_credibility": score })),
    ))
}
