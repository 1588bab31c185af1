use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use crate::{
    db::DbPool,
    error::ApiError,
    models::report::{CreateReportSchema, Report, ReportView},
};

// Con esta cantidad de reportes el artículo pasa a 'Under Review'
const REVIEW_THRESHOLD: i64 = 3;

// GET /api/reports (vista con nombre del reportero y título del artículo)
pub async fn list_reports_handler(State(pool): State<DbPool>) -> impl IntoResponse {
    let result = sqlx::query_as::<_, ReportView>(
        "SELECT r.id, u.name AS reporter, a.title AS article_title,
                r.reason, r.status, r.report_date
         FROM reports r
         JOIN users u ON r.user_id = u.id
         JOIN articles a ON r.article_id = a.id
         ORDER BY r.id ASC",
    )
    .fetch_all(&pool)
    .await;

    match result {
        Ok(reports) => (StatusCode::OK, Json(reports)).into_response(),
        Err(e) => {
            tracing::error!("Error listando reportes: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error interno").into_response()
        }
    }
}

// POST /api/reports
// El insert y el posible pase a 'Under Review' van en la misma transacción
pub async fn create_report_handler(
    State(pool): State<DbPool>,
    Json(body): Json<CreateReportSchema>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = pool.begin().await?;

    let user = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE id = $1")
        .bind(body.user_id)
        .fetch_optional(&mut *tx)
        .await?;

    if user.is_none() {
        return Err(ApiError::not_found(format!("Usuario {} no encontrado", body.user_id)));
    }

    let article = sqlx::query_scalar::<_, i64>("SELECT id FROM articles WHERE id = $1")
        .bind(body.article_id)
        .fetch_optional(&mut *tx)
        .await?;

    if article.is_none() {
        return Err(ApiError::not_found(format!("Artículo {} no encontrado", body.article_id)));
    }

    let report = sqlx::query_as::<_, Report>(
        "INSERT INTO reports (user_id, article_id, reason)
         VALUES ($1, $2, $3)
         RETURNING id, user_id, article_id, reason, status, report_date",
    )
    .bind(body.user_id)
    .bind(body.article_id)
    .bind(&body.reason)
    .fetch_one(&mut *tx)
    .await?;

    // Recontamos sobre el estado post-insert; al llegar al umbral el
    // artículo queda bajo revisión
    let total_reports = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM reports WHERE article_id = $1",
    )
    .bind(body.article_id)
    .fetch_one(&mut *tx)
    .await?;

    if total_reports >= REVIEW_THRESHOLD {
        sqlx::query("UPDATE articles SET review_status = 'Under Review' WHERE id = $1")
            .bind(body.article_id)
            .execute(&mut *tx)
            .await?;
        tracing::info!("Artículo {} pasa a revisión ({} reportes)", body.article_id, total_reports);
    }

    tx.commit().await?;

    Ok((StatusCode::CREATED, Json(report)))
}

// POST /api/reports/:id/review (solo staff: fact-checker o admin)
pub async fn mark_report_reviewed_handler(
    Path(report_id): Path<i64>,
    State(pool): State<DbPool>,
) -> Result<impl IntoResponse, ApiError> {
    let result = sqlx::query("UPDATE reports SET status = 'Reviewed' WHERE id = $1")
        .bind(report_id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found(format!("Reporte {} no encontrado", report_id)));
    }

    Ok((
        StatusCode::OK,
        Json(json!({ "message": format!("Reporte {} marcado como revisado", report_id) })),
    ))
}
