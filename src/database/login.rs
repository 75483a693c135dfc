use crate::database::login_session::insert_login_session_with;
use crate::database::postgres_repository::PostgresRepository;
use crate::database::student::upsert_student_with;
use crate::error::app_error::AppError;
use crate::models::login_session::{LoginSession, NewLoginSession};

#[async_trait::async_trait]
pub trait LoginRepository: Send + Sync {
    /// Upserts the student, then appends the session. Either both writes land or neither does.
    async fn record_login(&self, login: &NewLoginSession) -> Result<LoginSession, AppError>;
}

#[async_trait::async_trait]
impl LoginRepository for PostgresRepository {
    async fn record_login(&self, login: &NewLoginSession) -> Result<LoginSession, AppError> {
        let mut tx = self.pool.begin().await?;

        let student = upsert_student_with(&mut *tx, &login.name, &login.student_id, &login.email, login.login_time).await?;
        tracing::debug!(student_id = %student.student_id, student_row = student.id, "student upserted");

        let session = insert_login_session_with(&mut *tx, login).await?;

        tx.commit().await?;

        Ok(session)
    }
}
