use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use crate::{
    db::DbPool,
    error::ApiError,
    models::article::{Article, CreateArticleSchema},
    trust,
};

// GET /api/articles (los más nuevos primero)
pub async fn list_articles_handler(State(pool): State<DbPool>) -> impl IntoResponse {
    let result = sqlx::query_as::<_, Article>(
        "SELECT id, title, content, url, source_id, publish_date, review_status, created_at
         FROM articles
         ORDER BY created_at DESC",
    )
    .fetch_all(&pool)
    .await;

    match result {
        Ok(articles) => (StatusCode::OK, Json(articles)).into_response(),
        Err(e) => {
            tracing::error!("Error listando artículos: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error interno").into_response()
        }
    }
}

// POST /api/articles
pub async fn create_article_handler(
    State(pool): State<DbPool>,
    Json(body): Json<CreateArticleSchema>,
) -> Result<impl IntoResponse, ApiError> {
    // La fuente tiene que existir antes de colgarle un artículo
    let source = sqlx::query_scalar::<_, i64>("SELECT id FROM sources WHERE id = $1")
        .bind(body.source_id)
        .fetch_optional(&pool)
        .await?;

    if source.is_none() {
        return Err(ApiError::not_found(format!("Fuente {} no encontrada", body.source_id)));
    }

    let article = sqlx::query_as::<_, Article>(
        "INSERT INTO articles (title, content, url, source_id, publish_date)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id, title, content, url, source_id, publish_date, review_status, created_at",
    )
    .bind(&body.title)
    .bind(&body.content)
    .bind(&body.url)
    .bind(body.source_id)
    .bind(body.publish_date)
    .fetch_one(&pool)
    .await?;

    Ok((StatusCode::CREATED, Json(article)))
}

// GET /api/articles/:id/report_count
pub async fn report_count_handler(
    Path(article_id): Path<i64>,
    State(pool): State<DbPool>,
) -> Result<impl IntoResponse, ApiError> {
    let exists = sqlx::query_scalar::<_, i64>("SELECT id FROM articles WHERE id = $1")
        .bind(article_id)
        .fetch_optional(&pool)
        .await?;

    if exists.is_none() {
        return Err(ApiError::not_found(format!("Artículo {} no encontrado", article_id)));
    }

    let count = trust::report_count(&pool, article_id).await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "article_id": article_id, "report_count": count })),
    ))
}
