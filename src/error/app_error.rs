use rocket::http::{ContentType, Status};
use rocket::response::Responder;
use rocket::serde::Serialize;
use rocket::{Request, Response};
use rocket_okapi::OpenApiError;
use rocket_okapi::r#gen::OpenApiGenerator;
use rocket_okapi::okapi::openapi3::Responses;
use rocket_okapi::response::OpenApiResponderInner;
use schemars::JsonSchema;
use std::io::Cursor;
use thiserror::Error;
use tracing::{error, warn};

/// Body of every failed response: `{"success": false, "message": "..."}`.
#[derive(Serialize, Debug, JsonSchema)]
pub struct FailureResponse {
    pub success: bool,
    pub message: String,
}

impl FailureResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    /// `operation` is the client-facing description of what failed; the source stays in the logs.
    #[error("{operation}")]
    Db {
        operation: String,
        #[source]
        source: sqlx::error::Error,
    },
    #[error("Database unavailable")]
    Unavailable,
}

impl AppError {
    pub fn db(operation: impl Into<String>, source: sqlx::error::Error) -> Self {
        Self::Db {
            operation: operation.into(),
            source,
        }
    }

    /// Replaces the client-facing description of a storage failure. Other variants pass through.
    pub fn during(self, operation: &str) -> Self {
        match self {
            AppError::Db { source, .. } => AppError::db(operation, source),
            other => other,
        }
    }

    /// Message sent to the client. Server-side failures only carry the request id for correlation.
    pub fn client_message(&self, request_id: &str) -> String {
        match self {
            AppError::Db { .. } => format!("{}. Reference: {}", self, request_id),
            _ => self.to_string(),
        }
    }
}

impl From<&AppError> for Status {
    fn from(e: &AppError) -> Self {
        match e {
            AppError::BadRequest(_) => Status::BadRequest,
            AppError::NotFound(_) => Status::NotFound,
            AppError::Db { .. } => Status::InternalServerError,
            AppError::Unavailable => Status::ServiceUnavailable,
        }
    }
}

impl<'r> Responder<'r, 'static> for AppError {
    fn respond_to(self, req: &Request<'_>) -> rocket::response::Result<'static> {
        let method = req.method();
        let uri = req.uri();

        let request_id = crate::middleware::request_id_of(req);

        let status = Status::from(&self);
        if status.class().is_server_error() {
            error!(
                error = ?self,
                request_id = %request_id,
                method = %method,
                uri = %uri,
                "request failed"
            );
        } else {
            warn!(
                error = %self,
                request_id = %request_id,
                method = %method,
                uri = %uri,
                "request rejected"
            );
        }

        let body = serde_json::to_string(&FailureResponse::new(self.client_message(&request_id))).map_err(|_| Status::InternalServerError)?;

        Response::build()
            .status(status)
            .header(ContentType::JSON)
            .sized_body(body.len(), Cursor::new(body))
            .ok()
    }
}

impl OpenApiResponderInner for AppError {
    fn responses(_gen: &mut OpenApiGenerator) -> Result<Responses, OpenApiError> {
        use rocket_okapi::okapi::openapi3::{RefOr, Response as OpenApiResponse};
        let mut responses = Responses::default();
        for (code, description) in [
            ("400", "Bad Request"),
            ("404", "Not Found"),
            ("500", "Internal Server Error"),
            ("503", "Service Unavailable"),
        ] {
            responses.responses.insert(
                code.to_string(),
                RefOr::Object(OpenApiResponse {
                    description: description.to_string(),
                    ..Default::default()
                }),
            );
        }
        Ok(responses)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::db("Database error", e)
    }
}
