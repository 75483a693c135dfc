use crate::clock::Clock;
use crate::database::login::LoginRepository;
use crate::error::app_error::AppError;
use crate::models::auth::LoginForm;
use crate::models::login_session::{LoginSession, NewLoginSession};
use tracing::info;

/// Where a login came from. Both values are best-effort.
#[derive(Debug, Clone, Default)]
pub struct ClientOrigin {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

pub struct LoginService<'a, R> {
    repository: &'a R,
    clock: &'a dyn Clock,
}

impl<'a, R: LoginRepository> LoginService<'a, R> {
    pub fn new(repository: &'a R, clock: &'a dyn Clock) -> Self {
        LoginService { repository, clock }
    }

    /// Records one login: the student profile is upserted first, then a new active session is appended.
    pub async fn login(&self, form: &LoginForm, origin: ClientOrigin) -> Result<LoginSession, AppError> {
        let new_session = NewLoginSession {
            student_id: form.student_id.clone(),
            name: form.name.clone(),
            email: form.email.clone(),
            ip_address: origin.ip_address,
            user_agent: origin.user_agent,
            login_time: Some(self.clock.now()),
        };

        let session = self.repository.record_login(&new_session).await?;

        info!(
            student_id = %session.student_id,
            session_id = session.id,
            ip = session.ip_address.as_deref().unwrap_or("-"),
            "student login recorded"
        );

        Ok(session)
    }
}
