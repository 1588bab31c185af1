use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

// Taxonomía de errores de la API. Cada variante mapea a un status HTTP
// distinto y ningún camino de error comparte representación con el éxito.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    // Entrada malformada o fuera de rango (el cliente puede corregirla)
    #[error("{message}")]
    Validation { field: &'static str, message: String },

    // Referencia a un id que no existe
    #[error("{0}")]
    NotFound(String),

    // El rol del usuario no alcanza; siempre devolvemos el rol real
    #[error("El rol '{user_role}' no está autorizado para esta operación")]
    PermissionDenied { user_role: String },

    // Falla de base de datos: la operación completa se reintenta como unidad
    #[error("Error de base de datos")]
    Storage(#[from] sqlx::Error),
}

impl ApiError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation { field, message: message.into() }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation { field, ref message } => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": message, "field": field })),
            )
                .into_response(),
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
            }
            ApiError::PermissionDenied { ref user_role } => (
                StatusCode::FORBIDDEN,
                Json(json!({ "error": self.to_string(), "user_role": user_role })),
            )
                .into_response(),
            ApiError::Storage(e) => {
                tracing::error!("Error de base de datos: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Error de base de datos" })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn permission_denied_surfaces_actual_role() {
        let (status, body) =
            body_json(ApiError::PermissionDenied { user_role: "user".to_string() }).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["user_role"], "user");
    }

    #[tokio::test]
    async fn validation_reports_offending_field() {
        let (status, body) =
            body_json(ApiError::validation("fact_check_score", "El puntaje debe estar entre 0 y 1")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["field"], "fact_check_score");
    }

    #[tokio::test]
    async fn not_found_maps_to_404() {
        let (status, body) = body_json(ApiError::not_found("Artículo no encontrado")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Artículo no encontrado");
    }

    #[tokio::test]
    async fn storage_maps_to_500() {
        let (status, _) = body_json(ApiError::Storage(sqlx::Error::PoolClosed)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
