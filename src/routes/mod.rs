use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use crate::{
    db::DbPool,
    handlers::{analytics, article, auth, check, report, source, user},
    utils::jwt::staff_middleware,
};

pub fn create_routes(pool: DbPool) -> Router {
    // 1. Rutas Públicas (Todo el mundo)
    let public_routes = Router::new()
        .route("/ping", get(|| async { "pong" }))
        .route("/api/auth/register", post(auth::register_handler))
        .route("/api/auth/login", post(auth::login_handler))
        .route("/api/users", get(user::list_users_handler))
        .route("/api/sources", get(source::list_sources_handler).post(source::create_source_handler))
        .route("/api/sources/:id/avg_credibility", get(source::avg_credibility_handler))
        .route("/api/articles", get(article::list_articles_handler).post(article::create_article_handler))
        .route("/api/articles/:id/report_count", get(article::report_count_handler))
        .route("/api/reports", get(report::list_reports_handler).post(report::create_report_handler))
        // La autorización del chequeo es por el rol del usuario `checked_by`,
        // validado contra la base dentro de la propia operación
        .route("/api/credibility", get(check::list_checks_handler).post(check::create_check_handler))
        .route("/api/analytics/top_trusted_sources", get(analytics::top_trusted_sources_handler))
        .route("/api/analytics/active_reporters", get(analytics::active_reporters_handler))
        .route("/api/analytics/under_review_articles", get(analytics::under_review_articles_handler))
        .route("/api/analytics/articles_with_report_count", get(analytics::articles_with_report_count_handler));

    // 2. Rutas de STAFF (fact-checker o admin) - Requieren token
    let staff_routes = Router::new()
        .route("/api/reports/:id/review", post(report::mark_report_reviewed_handler))
        .route_layer(middleware::from_fn(staff_middleware));

    // Fusionamos todo
    Router::new()
        .merge(public_routes)
        .merge(staff_routes)
        .with_state(pool)
}
