use axum::{
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{Authorization, authorization::Bearer};
use axum_extra::TypedHeader;
use jsonwebtoken::{decode, DecodingKey, Validation};
use crate::models::user::Claims;

// Esta función se ejecuta ANTES de llegar al handler protegido:
// exige un token válido con rol de staff (fact-checker o admin)
pub async fn staff_middleware(
    // Axum extrae automáticamente el header "Authorization: Bearer <token>"
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    mut request: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    // 1. Obtener el token del header
    let token = auth.token();

    // 2. Obtener el secreto
    let secret = std::env::var("JWT_SECRET").map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    // 3. Decodificar y verificar firma
    let validation = Validation::default();
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    );

    match token_data {
        Ok(data) => {
            // 4. VERIFICACIÓN EXTRA: ¿Es staff?
            if data.claims.role == "fact-checker" || data.claims.role == "admin" {
                // Adjuntamos claims por si se necesitan aguas abajo
                request.extensions_mut().insert(data.claims);
                Ok(next.run(request).await)
            } else {
                // Un usuario común no puede revisar reportes
                Err(StatusCode::FORBIDDEN)
            }
        }
        Err(_) => {
            // Token falso, expirado o manipulado
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}
