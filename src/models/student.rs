use crate::util::format_local_date_time;
use chrono::NaiveDateTime;
use rocket::serde::Serialize;
use schemars::JsonSchema;

/// A student profile, keyed externally by `student_id`.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Student {
    pub id: i64,
    pub student_id: String,
    pub name: String,
    pub email: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Serialize, Debug, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub id: i64,
    pub name: String,
    pub student_id: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Student> for StudentResponse {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id,
            name: student.name.clone(),
            student_id: student.student_id.clone(),
            email: student.email.clone(),
            created_at: format_local_date_time(&student.created_at),
            updated_at: format_local_date_time(&student.updated_at),
        }
    }
}

#[derive(Serialize, Debug, JsonSchema)]
pub struct StudentProfileResponse {
    pub success: bool,
    pub student: StudentResponse,
}
