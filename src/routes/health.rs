use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use crate::models::health::HealthResponse;
use rocket::serde::json::Json;
use rocket::{State, get};
use rocket_okapi::openapi;
use sqlx::PgPool;

/// Liveness plus a database round-trip. 503 when the database does not answer.
#[openapi(tag = "Health")]
#[get("/")]
pub async fn healthcheck(pool: &State<PgPool>) -> Result<Json<HealthResponse>, AppError> {
    let repo = PostgresRepository { pool: pool.inner().clone() };
    repo.ping().await.map_err(|_| AppError::Unavailable)?;
    Ok(Json(HealthResponse { status: "ok" }))
}

pub fn routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![healthcheck]
}
