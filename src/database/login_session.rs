use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use crate::models::login_session::{ACTIVE_STATUS, LoginSession, NewLoginSession};
use chrono::NaiveDateTime;
use sqlx::PgExecutor;

#[async_trait::async_trait]
pub trait LoginSessionRepository: Send + Sync {
    /// Always appends a new row; existing active sessions of the same student are left alone.
    async fn create_login_session(&self, session: &NewLoginSession) -> Result<LoginSession, AppError>;
    /// Newest `login_time` first.
    async fn list_active_sessions(&self) -> Result<Vec<LoginSession>, AppError>;
    /// Newest `login_time` first.
    async fn list_sessions_for_student(&self, student_id: &str) -> Result<Vec<LoginSession>, AppError>;
    async fn count_active_sessions(&self) -> Result<i64, AppError>;
    /// Both bounds inclusive.
    async fn count_logins_between(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<i64, AppError>;
}

pub(crate) async fn insert_login_session_with<'e, E>(executor: E, session: &NewLoginSession) -> Result<LoginSession, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, LoginSession>(
        r#"
        INSERT INTO login_sessions (student_id, name, email, login_time, session_status, ip_address, user_agent)
        VALUES ($1, $2, $3, COALESCE($4, LOCALTIMESTAMP), $5, $6, $7)
        RETURNING id, student_id, name, email, login_time, logout_time, session_status, ip_address, user_agent
        "#,
    )
    .bind(&session.student_id)
    .bind(&session.name)
    .bind(&session.email)
    .bind(session.login_time)
    .bind(ACTIVE_STATUS)
    .bind(&session.ip_address)
    .bind(&session.user_agent)
    .fetch_one(executor)
    .await
}

#[async_trait::async_trait]
impl LoginSessionRepository for PostgresRepository {
    async fn create_login_session(&self, session: &NewLoginSession) -> Result<LoginSession, AppError> {
        Ok(insert_login_session_with(&self.pool, session).await?)
    }

    async fn list_active_sessions(&self) -> Result<Vec<LoginSession>, AppError> {
        // id breaks login_time ties so repeated reads agree
        let sessions = sqlx::query_as::<_, LoginSession>(
            r#"
            SELECT id, student_id, name, email, login_time, logout_time, session_status, ip_address, user_agent
            FROM login_sessions
            WHERE session_status = $1
            ORDER BY login_time DESC, id DESC
            "#,
        )
        .bind(ACTIVE_STATUS)
        .fetch_all(&self.pool)
        .await?;

        Ok(sessions)
    }

    async fn list_sessions_for_student(&self, student_id: &str) -> Result<Vec<LoginSession>, AppError> {
        let sessions = sqlx::query_as::<_, LoginSession>(
            r#"
            SELECT id, student_id, name, email, login_time, logout_time, session_status, ip_address, user_agent
            FROM login_sessions
            WHERE student_id = $1
            ORDER BY login_time DESC, id DESC
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sessions)
    }

    async fn count_active_sessions(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM login_sessions WHERE session_status = $1")
            .bind(ACTIVE_STATUS)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn count_logins_between(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM login_sessions WHERE login_time >= $1 AND login_time <= $2")
            .bind(start)
            .bind(end)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
