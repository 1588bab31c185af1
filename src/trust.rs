use sqlx::PgConnection;

use crate::{
    db::DbPool,
    error::ApiError,
    models::check::{CreateCheckSchema, CredibilityCheck},
};

// Roles que pueden registrar chequeos de credibilidad
const AUTHORIZED_ROLES: [&str; 2] = ["fact-checker", "admin"];

// Veredicto final de un chequeo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Real,
    Fake,
    Unverified,
}

impl Verdict {
    pub fn parse(value: &str) -> Result<Self, ApiError> {
        match value {
            "Real" => Ok(Self::Real),
            "Fake" => Ok(Self::Fake),
            "Unverified" => Ok(Self::Unverified),
            other => Err(ApiError::validation(
                "final_verdict",
                format!("Veredicto inválido '{}'; debe ser Real, Fake o Unverified", other),
            )),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Real => "Real",
            Self::Fake => "Fake",
            Self::Unverified => "Unverified",
        }
    }
}

// El puntaje es opcional (cuenta como 0 en el promedio) pero si viene
// tiene que caer en [0, 1] inclusive
pub fn validate_score(score: Option<f64>) -> Result<(), ApiError> {
    match score {
        Some(s) if !(0.0..=1.0).contains(&s) => Err(ApiError::validation(
            "fact_check_score",
            format!("El puntaje {} está fuera del rango [0, 1]", s),
        )),
        _ => Ok(()),
    }
}

// Fórmula del trust rating: promedio de los puntajes (null cuenta como 0),
// expresado como porcentaje redondeado a 2 decimales. None si no hay chequeos.
pub fn trust_rating_from_scores(scores: &[Option<f64>]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    let sum: f64 = scores.iter().map(|s| s.unwrap_or(0.0)).sum();
    let pct = sum / scores.len() as f64 * 100.0;
    Some((pct * 100.0).round() / 100.0)
}

// Todos los puntajes de chequeo de una fuente, pasando por sus artículos
async fn source_scores(
    conn: &mut PgConnection,
    source_id: i64,
) -> Result<Vec<Option<f64>>, sqlx::Error> {
    sqlx::query_scalar::<_, Option<f64>>(
        "SELECT c.fact_check_score
         FROM credibility_checks c
         JOIN articles a ON c.article_id = a.id
         WHERE a.source_id = $1",
    )
    .bind(source_id)
    .fetch_all(conn)
    .await
}

// Recalcula el trust rating de una fuente a partir del estado actual de sus
// chequeos. Determinista e idempotente: correrla dos veces da lo mismo.
// Si la fuente no tiene chequeos, el rating queda como está (default 50.0).
pub async fn recompute_trust(
    conn: &mut PgConnection,
    source_id: i64,
) -> Result<Option<f64>, sqlx::Error> {
    let scores = source_scores(conn, source_id).await?;

    let rating = match trust_rating_from_scores(&scores) {
        Some(r) => r,
        None => return Ok(None),
    };

    sqlx::query("UPDATE sources SET trust_rating = $1 WHERE id = $2")
        .bind(rating)
        .bind(source_id)
        .execute(conn)
        .await?;

    Ok(Some(rating))
}

// Proyección de lectura: mismo cálculo que recompute_trust pero sin escribir.
// Devuelve 0.0 cuando la fuente todavía no tiene chequeos.
pub async fn average_credibility(pool: &DbPool, source_id: i64) -> Result<f64, ApiError> {
    let mut conn = pool.acquire().await?;
    let scores = source_scores(&mut *conn, source_id).await?;
    Ok(trust_rating_from_scores(&scores).unwrap_or(0.0))
}

pub async fn report_count(pool: &DbPool, article_id: i64) -> Result<i64, ApiError> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM reports WHERE article_id = $1",
    )
    .bind(article_id)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

// Operación central: valida, autoriza, inserta el chequeo y recalcula el
// trust rating de la fuente dueña del artículo, todo en UNA transacción.
// O se ven ambos efectos o ninguno.
pub async fn record_check(
    pool: &DbPool,
    body: CreateCheckSchema,
) -> Result<CredibilityCheck, ApiError> {
    let verdict = Verdict::parse(&body.final_verdict)?;
    validate_score(body.fact_check_score)?;

    let mut tx = pool.begin().await?;

    let source_id = sqlx::query_scalar::<_, i64>(
        "SELECT source_id FROM articles WHERE id = $1",
    )
    .bind(body.article_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| ApiError::not_found(format!("Artículo {} no encontrado", body.article_id)))?;

    let role = sqlx::query_scalar::<_, String>(
        "SELECT role FROM users WHERE id = $1",
    )
    .bind(body.checked_by)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| ApiError::not_found(format!("Usuario {} no encontrado", body.checked_by)))?;

    if !AUTHORIZED_ROLES.contains(&role.as_str()) {
        return Err(ApiError::PermissionDenied { user_role: role });
    }

    let check = sqlx::query_as::<_, CredibilityCheck>(
        "INSERT INTO credibility_checks (article_id, fact_check_score, final_verdict, checked_by)
         VALUES ($1, $2, $3, $4)
         RETURNING id, article_id, fact_check_score, final_verdict, checked_by, check_date",
    )
    .bind(body.article_id)
    .bind(body.fact_check_score)
    .bind(verdict.as_str())
    .bind(body.checked_by)
    .fetch_one(&mut *tx)
    .await?;

    // El promedio se recorre completo sobre el estado post-insert dentro de
    // la misma transacción: estable ante intercalados y seguro de reintentar
    recompute_trust(&mut *tx, source_id).await?;

    tx.commit().await?;

    Ok(check)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_check_sets_rating_to_its_percentage() {
        assert_eq!(trust_rating_from_scores(&[Some(0.8)]), Some(80.0));
    }

    #[test]
    fn rating_is_the_mean_of_all_checks() {
        assert_eq!(trust_rating_from_scores(&[Some(0.8), Some(0.4)]), Some(60.0));
    }

    #[test]
    fn null_scores_count_as_zero() {
        assert_eq!(trust_rating_from_scores(&[Some(0.6), None]), Some(30.0));
    }

    #[test]
    fn no_checks_leaves_rating_untouched() {
        assert_eq!(trust_rating_from_scores(&[]), None);
    }

    #[test]
    fn rating_rounds_to_two_decimals() {
        // (0.1 + 0.2 + 0.3) / 3 = 0.2 exacto; un caso con residuo:
        assert_eq!(trust_rating_from_scores(&[Some(1.0), Some(0.0), Some(0.0)]), Some(33.33));
        assert_eq!(trust_rating_from_scores(&[Some(1.0), Some(1.0), Some(0.0)]), Some(66.67));
    }

    #[test]
    fn formula_is_idempotent_over_the_same_set() {
        let scores = [Some(0.8), Some(0.4), None];
        assert_eq!(trust_rating_from_scores(&scores), trust_rating_from_scores(&scores));
    }

    #[test]
    fn score_boundaries_are_inclusive() {
        assert!(validate_score(Some(0.0)).is_ok());
        assert!(validate_score(Some(1.0)).is_ok());
        assert!(validate_score(None).is_ok());
        assert!(validate_score(Some(-0.0001)).is_err());
        assert!(validate_score(Some(1.0001)).is_err());
    }

    #[test]
    fn only_known_verdicts_parse() {
        assert_eq!(Verdict::parse("Real").unwrap(), Verdict::Real);
        assert_eq!(Verdict::parse("Fake").unwrap(), Verdict::Fake);
        assert_eq!(Verdict::parse("Unverified").unwrap(), Verdict::Unverified);
        assert!(Verdict::parse("real").is_err());
        assert!(Verdict::parse("Dubious").is_err());
    }

    #[test]
    fn authorized_roles_are_the_staff_pair() {
        assert!(AUTHORIZED_ROLES.contains(&"fact-checker"));
        assert!(AUTHORIZED_ROLES.contains(&"admin"));
        assert!(!AUTHORIZED_ROLES.contains(&"user"));
    }
}
