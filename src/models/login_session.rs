use crate::util::format_local_date_time;
use chrono::NaiveDateTime;
use rocket::serde::Serialize;
use schemars::JsonSchema;

/// Status written on every new session. Nothing transitions a session out of it.
pub const ACTIVE_STATUS: &str = "active";

/// One recorded login event. Name and email are copies taken at login time.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct LoginSession {
    pub id: i64,
    pub student_id: String,
    pub name: String,
    pub email: String,
    pub login_time: NaiveDateTime,
    pub logout_time: Option<NaiveDateTime>,
    pub session_status: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Values for a session row that has not been stored yet.
/// A missing `login_time` is filled in by the store with its current local time.
#[derive(Debug, Clone)]
pub struct NewLoginSession {
    pub student_id: String,
    pub name: String,
    pub email: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub login_time: Option<NaiveDateTime>,
}

/// Row of the admin "logged students" listing.
#[derive(Serialize, Debug, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoggedStudentResponse {
    pub id: i64,
    pub name: String,
    pub student_id: String,
    pub email: String,
    pub login_time: String,
    pub status: String,
}

impl From<&LoginSession> for LoggedStudentResponse {
    fn from(session: &LoginSession) -> Self {
        Self {
            id: session.id,
            name: session.name.clone(),
            student_id: session.student_id.clone(),
            email: session.email.clone(),
            login_time: format_local_date_time(&session.login_time),
            status: session.session_status.clone(),
        }
    }
}

#[derive(Serialize, Debug, JsonSchema)]
pub struct LoggedStudentsResponse {
    pub success: bool,
    pub total: usize,
    pub students: Vec<LoggedStudentResponse>,
}

/// Full session detail, used for a single student's history.
#[derive(Serialize, Debug, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginSessionResponse {
    pub id: i64,
    pub name: String,
    pub student_id: String,
    pub email: String,
    pub login_time: String,
    pub logout_time: Option<String>,
    pub status: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl From<&LoginSession> for LoginSessionResponse {
    fn from(session: &LoginSession) -> Self {
        Self {
            id: session.id,
            name: session.name.clone(),
            student_id: session.student_id.clone(),
            email: session.email.clone(),
            login_time: format_local_date_time(&session.login_time),
            logout_time: session.logout_time.as_ref().map(format_local_date_time),
            status: session.session_status.clone(),
            ip_address: session.ip_address.clone(),
            user_agent: session.user_agent.clone(),
        }
    }
}

#[derive(Serialize, Debug, JsonSchema)]
pub struct StudentSessionsResponse {
    pub success: bool,
    pub total: usize,
    pub sessions: Vec<LoginSessionResponse>,
}
