use crate::clock::Clock;
use crate::database::login_session::LoginSessionRepository;
use crate::database::student::StudentRepository;
use crate::error::app_error::AppError;
use crate::models::dashboard::{DashboardStats, SYSTEM_STATUS_ONLINE};
use crate::models::login_session::{LoggedStudentResponse, LoginSessionResponse};
use crate::models::student::Student;
use crate::util::{day_bounds, format_local_date_time};

/// Read-only views over students and their login sessions.
pub struct AdminService<'a, R> {
    repository: &'a R,
    clock: &'a dyn Clock,
}

impl<'a, R: StudentRepository + LoginSessionRepository> AdminService<'a, R> {
    pub fn new(repository: &'a R, clock: &'a dyn Clock) -> Self {
        AdminService { repository, clock }
    }

    pub async fn logged_students(&self) -> Result<Vec<LoggedStudentResponse>, AppError> {
        let sessions = self.repository.list_active_sessions().await?;
        Ok(sessions.iter().map(LoggedStudentResponse::from).collect())
    }

    /// With `count_today_logins` off, today's count reports the active session count.
    pub async fn dashboard_stats(&self, count_today_logins: bool) -> Result<DashboardStats, AppError> {
        let now = self.clock.now();
        let active_session_count = self.repository.count_active_sessions().await?;
        let total_student_count = self.repository.count_students().await?;

        let today_login_count = if count_today_logins {
            let (start, end) = day_bounds(&now);
            self.repository.count_logins_between(start, end).await?
        } else {
            active_session_count
        };

        Ok(DashboardStats {
            active_session_count,
            total_student_count,
            today_login_count,
            system_status: SYSTEM_STATUS_ONLINE.to_string(),
            last_updated: format_local_date_time(&now),
        })
    }

    pub async fn student(&self, student_id: &str) -> Result<Student, AppError> {
        self.repository
            .get_student_by_student_id(student_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Student not found".to_string()))
    }

    pub async fn student_sessions(&self, student_id: &str) -> Result<Vec<LoginSessionResponse>, AppError> {
        let sessions = self.repository.list_sessions_for_student(student_id).await?;
        Ok(sessions.iter().map(LoginSessionResponse::from).collect())
    }
}
