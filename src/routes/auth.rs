use crate::clock::Clock;
use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use crate::error::json::JsonBody;
use crate::middleware::{ClientIp, UserAgent};
use crate::models::auth::{LoginRequest, LoginResponse};
use crate::service::login::{ClientOrigin, LoginService};
use rocket::serde::json::Json;
use rocket::{State, post};
use rocket_okapi::openapi;
use sqlx::PgPool;
use std::sync::Arc;

const LOGIN_FAILURE: &str = "Server error occurred during login";

/// Record a student login.
/// Returns 400 with a fixed message when a field is missing or the email is malformed;
/// nothing is stored in that case.
#[openapi(tag = "Auth")]
#[post("/login", data = "<payload>")]
pub async fn login(
    pool: &State<PgPool>,
    clock: &State<Arc<dyn Clock>>,
    client_ip: ClientIp,
    user_agent: UserAgent,
    payload: JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let form = payload.to_form()?;

    let repo = PostgresRepository { pool: pool.inner().clone() };
    let origin = ClientOrigin {
        ip_address: client_ip.0,
        user_agent: user_agent.0,
    };
    let session = LoginService::new(&repo, clock.inner().as_ref())
        .login(&form, origin)
        .await
        .map_err(|e| e.during(LOGIN_FAILURE))?;

    Ok(Json(LoginResponse::from(&session)))
}

pub fn routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![login]
}
