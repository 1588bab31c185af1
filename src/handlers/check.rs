use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
};
use crate::{
    db::DbPool,
    error::ApiError,
    models::check::{CheckView, CreateCheckSchema},
    trust,
};

// GET /api/credibility (vista con título del artículo y nombre del checker)
pub async fn list_checks_handler(State(pool): State<DbPool>) -> impl IntoResponse {
    let result = sqlx::query_as::<_, CheckView>(
        "SELECT c.id, a.title AS article_title, c.fact_check_score,
                c.final_verdict, u.name AS checked_by, c.check_date
         FROM credibility_checks c
         JOIN articles a ON c.article_id = a.id
         LEFT JOIN users u ON c.checked_by = u.id
         ORDER BY c.id ASC",
    )
    .fetch_all(&pool)
    .await;

    match result {
        Ok(checks) => (StatusCode::OK, Json(checks)).into_response(),
        Err(e) => {
            tracing::error!("Error listando chequeos: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error interno").into_response()
        }
    }
}

// POST /api/credibility
// ÚNICA ruta de inserción de chequeos: valida, autoriza por rol, inserta y
// recalcula el trust rating de la fuente en la misma transacción
pub async fn create_check_handler(
    State(pool): State<DbPool>,
    Json(body): Json<CreateCheckSchema>,
) -> Result<impl IntoResponse, ApiError> {
    let check = trust::record_check(&pool, body).await?;

    tracing::info!(
        "Chequeo {} registrado para el artículo {} (veredicto {})",
        check.id,
        check.article_id,
        check.final_verdict
    );

    Ok((StatusCode::CREATED, Json(check)))
}
