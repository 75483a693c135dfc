use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use crate::models::student::Student;
use chrono::NaiveDateTime;
use sqlx::PgExecutor;

#[async_trait::async_trait]
pub trait StudentRepository: Send + Sync {
    /// Creates the student or overwrites name and email of the existing one with the same `student_id`.
    async fn upsert_student(&self, name: &str, student_id: &str, email: &str, at: NaiveDateTime) -> Result<Student, AppError>;
    async fn get_student_by_student_id(&self, student_id: &str) -> Result<Option<Student>, AppError>;
    async fn count_students(&self) -> Result<i64, AppError>;
}

/// Shared by the standalone upsert and the login transaction.
/// Email uniqueness is left to the `students_email_key` constraint.
pub(crate) async fn upsert_student_with<'e, E>(
    executor: E,
    name: &str,
    student_id: &str,
    email: &str,
    at: Option<NaiveDateTime>,
) -> Result<Student, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Student>(
        r#"
        INSERT INTO students (student_id, name, email, created_at, updated_at)
        VALUES ($1, $2, $3, COALESCE($4, LOCALTIMESTAMP), COALESCE($4, LOCALTIMESTAMP))
        ON CONFLICT (student_id)
        DO UPDATE SET
            name = EXCLUDED.name,
            email = EXCLUDED.email,
            updated_at = EXCLUDED.updated_at
        RETURNING id, student_id, name, email, created_at, updated_at
        "#,
    )
    .bind(student_id)
    .bind(name)
    .bind(email)
    .bind(at)
    .fetch_one(executor)
    .await
}

#[async_trait::async_trait]
impl StudentRepository for PostgresRepository {
    async fn upsert_student(&self, name: &str, student_id: &str, email: &str, at: NaiveDateTime) -> Result<Student, AppError> {
        Ok(upsert_student_with(&self.pool, name, student_id, email, Some(at)).await?)
    }

    async fn get_student_by_student_id(&self, student_id: &str) -> Result<Option<Student>, AppError> {
        let student = sqlx::query_as::<_, Student>(
            r#"
            SELECT id, student_id, name, email, created_at, updated_at
            FROM students
            WHERE student_id = $1
            "#,
        )
        .bind(student_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(student)
    }

    async fn count_students(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM students").fetch_one(&self.pool).await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::postgres_repository::test_support::{migrated_repository, unique};
    use chrono::Local;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn upsert_twice_keeps_one_row_with_latest_values() {
        let repo = migrated_repository().await;
        let student_id = unique("ug");
        let now = Local::now().naive_local();

        let first = repo.upsert_student("Yaw Boateng", &student_id, &format!("{}@st.ug.edu.gh", student_id), now).await.unwrap();
        let second = repo
            .upsert_student("Yaw K. Boateng", &student_id, &format!("yaw.{}@st.ug.edu.gh", student_id), now)
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        let stored = repo.get_student_by_student_id(&student_id).await.unwrap().expect("student stored");
        assert_eq!(stored.name, "Yaw K. Boateng");
        assert_eq!(stored.email, format!("yaw.{}@st.ug.edu.gh", student_id));

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM students WHERE student_id = $1")
            .bind(&student_id)
            .fetch_one(&repo.pool)
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn duplicate_email_under_another_student_id_fails_in_storage() {
        let repo = migrated_repository().await;
        let now = Local::now().naive_local();
        let email = format!("{}@st.ug.edu.gh", unique("shared"));

        repo.upsert_student("Esi", &unique("ug"), &email, now).await.unwrap();
        let result = repo.upsert_student("Efua", &unique("ug"), &email, now).await;

        assert!(matches!(result, Err(AppError::Db { .. })));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn unknown_student_id_is_none() {
        let repo = migrated_repository().await;
        assert!(repo.get_student_by_student_id(&unique("missing")).await.unwrap().is_none());
    }
}
