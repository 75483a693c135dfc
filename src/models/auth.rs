use crate::error::app_error::AppError;
use crate::models::login_session::LoginSession;
use crate::util::format_local_date_time;
use regex::Regex;
use rocket::serde::{Deserialize, Serialize};
use schemars::JsonSchema;
use std::sync::LazyLock;
use validator::{Validate, ValidationError};

pub const MISSING_FIELDS_MESSAGE: &str = "Name, Student ID, and Email are required";
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful";
pub const STUDENT_USER_TYPE: &str = "student";

static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// Raw login body. Every field is optional so that missing and blank values
/// are reported with the same message.
#[derive(Deserialize, Debug, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub name: Option<String>,
    pub student_id: Option<String>,
    pub email: Option<String>,
    /// Accepted for compatibility; the workflow always records a student.
    pub user_type: Option<String>,
}

/// Trimmed login fields that passed validation. `email` is lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub student_id: String,
    #[validate(custom(function = "validate_email_shape"))]
    pub email: String,
}

pub fn validate_email_shape(email: &str) -> Result<(), ValidationError> {
    if EMAIL_SHAPE.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_email"))
    }
}

fn required(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl LoginRequest {
    /// Checks presence on trimmed values first, then the email shape on the email as sent,
    /// so surrounding whitespace is rejected. Storage is never touched on failure.
    #[allow(clippy::result_large_err)]
    pub fn to_form(&self) -> Result<LoginForm, AppError> {
        let (Some(name), Some(student_id), Some(email)) = (required(&self.name), required(&self.student_id), required(&self.email)) else {
            return Err(AppError::BadRequest(MISSING_FIELDS_MESSAGE.to_string()));
        };

        let raw_email = self.email.as_deref().unwrap_or_default();
        validate_email_shape(raw_email).map_err(|_| AppError::BadRequest(INVALID_EMAIL_MESSAGE.to_string()))?;

        let form = LoginForm {
            name: name.to_string(),
            student_id: student_id.to_string(),
            email: email.to_lowercase(),
        };
        form.validate().map_err(|_| AppError::BadRequest(INVALID_EMAIL_MESSAGE.to_string()))?;

        Ok(form)
    }
}

#[derive(Serialize, Debug, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub name: String,
    pub student_id: String,
    pub email: String,
    pub user_type: String,
    pub login_time: String,
    pub session_id: i64,
    pub is_admin: bool,
}

#[derive(Serialize, Debug, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub user_data: UserData,
}

impl From<&LoginSession> for LoginResponse {
    fn from(session: &LoginSession) -> Self {
        Self {
            success: true,
            message: LOGIN_SUCCESS_MESSAGE.to_string(),
            user_data: UserData {
                name: session.name.clone(),
                student_id: session.student_id.clone(),
                email: session.email.clone(),
                user_type: STUDENT_USER_TYPE.to_string(),
                login_time: format_local_date_time(&session.login_time),
                session_id: session.id,
                is_admin: false,
            },
        }
    }
}
