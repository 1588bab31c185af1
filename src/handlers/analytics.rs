use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use crate::db::DbPool;

#[derive(Debug, Serialize, FromRow)]
pub struct TopSource {
    pub id: i64,
    pub name: String,
    pub domain: String,
    pub trust_rating: f64,
}

#[derive(Debug, Serialize, FromRow)]
pub struct ActiveReporter {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub total_reports: i64,
}

#[derive(Debug, Serialize, FromRow)]
pub struct UnderReviewArticle {
    pub id: i64,
    pub title: String,
    pub source_name: String,
    pub review_status: String,
    pub total_reports: i64,
}

#[derive(Debug, Serialize, FromRow)]
pub struct ArticleReportCount {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub source_name: String,
    pub publish_date: NaiveDate,
    pub review_status: String,
    pub total_reports: i64,
    pub credibility_verdict: Option<String>,
}

// GET /api/analytics/top_trusted_sources
pub async fn top_trusted_sources_handler(State(pool): State<DbPool>) -> impl IntoResponse {
    let result = sqlx::query_as::<_, TopSource>(
        "SELECT id, name, domain, trust_rating
         FROM sources
         ORDER BY trust_rating DESC, name ASC
         LIMIT 10",
    )
    .fetch_all(&pool)
    .await;

    match result {
        Ok(sources) => (StatusCode::OK, Json(sources)).into_response(),
        Err(e) => {
            tracing::error!("Error en top de fuentes: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error interno").into_response()
        }
    }
}

// GET /api/analytics/active_reporters
pub async fn active_reporters_handler(State(pool): State<DbPool>) -> impl IntoResponse {
    let result = sqlx::query_as::<_, ActiveReporter>(
        "SELECT u.id, u.name, u.email, u.role, COUNT(r.id) AS total_reports
         FROM users u
         JOIN reports r ON r.user_id = u.id
         GROUP BY u.id, u.name, u.email, u.role
         ORDER BY total_reports DESC, u.name ASC
         LIMIT 10",
    )
    .fetch_all(&pool)
    .await;

    match result {
        Ok(reporters) => (StatusCode::OK, Json(reporters)).into_response(),
        Err(e) => {
            tracing::error!("Error en reporteros activos: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error interno").into_response()
        }
    }
}

// GET /api/analytics/under_review_articles
pub async fn under_review_articles_handler(State(pool): State<DbPool>) -> impl IntoResponse {
    let result = sqlx::query_as::<_, UnderReviewArticle>(
        "SELECT a.id, a.title, s.name AS source_name, a.review_status,
                COUNT(r.id) AS total_reports
         FROM articles a
         JOIN sources s ON a.source_id = s.id
         LEFT JOIN reports r ON r.article_id = a.id
         WHERE a.review_status = 'Under Review'
         GROUP BY a.id, a.title, s.name, a.review_status
         ORDER BY total_reports DESC",
    )
    .fetch_all(&pool)
    .await;

    match result {
        Ok(articles) => (StatusCode::OK, Json(articles)).into_response(),
        Err(e) => {
            tracing::error!("Error en artículos bajo revisión: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error interno").into_response()
        }
    }
}

// GET /api/analytics/articles_with_report_count
// Incluye el veredicto del chequeo más reciente (null si nunca fue chequeado)
pub async fn articles_with_report_count_handler(State(pool): State<DbPool>) -> impl IntoResponse {
    let result = sqlx::query_as::<_, ArticleReportCount>(
        "SELECT a.id, a.title, a.url, s.name AS source_name, a.publish_date,
                a.review_status, COUNT(r.id) AS total_reports,
                (SELECT c.final_verdict
                 FROM credibility_checks c
                 WHERE c.article_id = a.id
                 ORDER BY c.check_date DESC, c.id DESC
                 LIMIT 1) AS credibility_verdict
         FROM articles a
         JOIN sources s ON a.source_id = s.id
         LEFT JOIN reports r ON r.article_id = a.id
         GROUP BY a.id, a.title, a.url, s.name, a.publish_date, a.review_status
         ORDER BY a.created_at DESC",
    )
    .fetch_all(&pool)
    .await;

    match result {
        Ok(articles) => (StatusCode::OK, Json(articles)).into_response(),
        Err(e) => {
            tracing::error!("Error en conteo de reportes por artículo: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error interno").into_response()
        }
    }
}
