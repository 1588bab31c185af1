use axum::{
    extract::{State, Json},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::headers::{Authorization, authorization::Bearer};
use axum_extra::TypedHeader;
use jsonwebtoken::{encode, EncodingKey, Header};
use chrono::{Utc, Duration};
use crate::{
    db::DbPool,
    models::user::{User, LoginPayload, RegisterPayload, AuthResponse, Claims},
    utils::security::{hash_password, verify_password},
};

const VALID_ROLES: [&str; 3] = ["user", "fact-checker", "admin"];

// POST /api/auth/register
// El primer usuario se permite sin token y queda como admin (bootstrap).
// Después: cualquiera puede registrarse como 'user'; crear un fact-checker
// o un admin exige token de admin.
pub async fn register_handler(
    State(pool): State<DbPool>,
    // Token opcional: solo lo exigimos para roles elevados
    maybe_auth: Option<TypedHeader<Authorization<Bearer>>>,
    Json(payload): Json<RegisterPayload>,
) -> impl IntoResponse {
    let requested_role = payload.role.clone().unwrap_or_else(|| "user".to_string());
    if !VALID_ROLES.contains(&requested_role.as_str()) {
        return (StatusCode::BAD_REQUEST, "Rol inválido: debe ser user, fact-checker o admin").into_response();
    }

    // Contamos usuarios existentes para decidir si es bootstrap
    let user_count = match sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
    {
        Ok(count) => count,
        Err(e) => {
            tracing::error!("Error contando usuarios: {:?}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    // Si ya hay usuarios y piden un rol elevado, exigimos token admin
    if user_count > 0 && requested_role != "user" {
        let TypedHeader(auth_header) = match maybe_auth {
            Some(h) => h,
            None => return (StatusCode::FORBIDDEN, "Solo un admin puede crear fact-checkers o admins").into_response(),
        };

        let secret = std::env::var("JWT_SECRET").expect("JWT_SECRET debe estar en .env");
        let token = auth_header.token();
        let validation = jsonwebtoken::Validation::default();
        let token_data = jsonwebtoken::decode::<Claims>(
            token,
            &jsonwebtoken::DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        );

        match token_data {
            Ok(data) => {
                if data.claims.role != "admin" {
                    return (StatusCode::FORBIDDEN, "Solo un admin puede crear fact-checkers o admins").into_response();
                }
            }
            Err(_) => return StatusCode::UNAUTHORIZED.into_response(),
        }
    }

    // 1. Hashear la contraseña (nunca guardarla plana)
    let hashed_password = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "Error de seguridad").into_response(),
    };

    // Rol: el primer usuario se vuelve admin automáticamente
    let role = if user_count == 0 { "admin".to_string() } else { requested_role };

    // 2. Insertar en Base de Datos
    let result = sqlx::query_as::<_, User>(
        "INSERT INTO users (name, email, password_hash, role)
         VALUES ($1, $2, $3, $4)
         RETURNING id, name, email, password_hash, role",
    )
    .bind(&payload.name)
    .bind(&payload.email)
    .bind(&hashed_password)
    .bind(&role)
    .fetch_one(&pool)
    .await;

    match result {
        Ok(_) => (StatusCode::CREATED, "Usuario creado exitosamente").into_response(),
        Err(e) => {
            tracing::error!("Error creando usuario: {:?}", e);
            // Probablemente el email ya existe
            (StatusCode::CONFLICT, "El usuario o email ya existe").into_response()
        }
    }
}

// POST /api/auth/login
pub async fn login_handler(
    State(pool): State<DbPool>,
    Json(payload): Json<LoginPayload>,
) -> impl IntoResponse {
    // 1. Buscar usuario por email
    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, email, password_hash, role FROM users WHERE email = $1",
    )
    .bind(&payload.email)
    .fetch_optional(&pool)
    .await
    .unwrap_or(None);

    let user = match user {
        Some(u) => u,
        None => return (StatusCode::UNAUTHORIZED, "Credenciales inválidas").into_response(),
    };

    // 2. Verificar contraseña (Argon2)
    let is_valid = verify_password(&payload.password, &user.password_hash);

    if !is_valid {
        return (StatusCode::UNAUTHORIZED, "Credenciales inválidas").into_response();
    }

    // 3. Generar JWT Token
    // Calculamos expiración (ej: 24 horas desde ahora)
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(24))
        .expect("Fecha inválida")
        .timestamp() as usize;

    let claims = Claims {
        sub: user.email.clone(),
        exp: expiration,
        iat: Utc::now().timestamp() as usize,
        user_id: user.id,
        role: user.role,
    };

    let secret = std::env::var("JWT_SECRET").expect("JWT_SECRET debe estar en .env");

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes())
    ).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR);

    match token {
        Ok(t) => (StatusCode::OK, Json(AuthResponse {
            token: t,
            token_type: "Bearer".to_string()
        })).into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Error generando token").into_response(),
    }
}
