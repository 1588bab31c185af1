use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use crate::{db::DbPool, models::user::UserListItem};

// GET /api/users (para los dropdowns del frontend: id, nombre y rol)
pub async fn list_users_handler(State(pool): State<DbPool>) -> impl IntoResponse {
    let result = sqlx::query_as::<_, UserListItem>(
        "SELECT id, name, role FROM users ORDER BY name",
    )
    .fetch_all(&pool)
    .await;

    match result {
        Ok(users) => (StatusCode::OK, Json(users)).into_response(),
        Err(e) => {
            tracing::error!("Error listando usuarios: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error interno").into_response()
        }
    }
}
