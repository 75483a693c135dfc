pub mod auth;
pub mod dashboard;
pub mod health;
pub mod login_session;
pub mod student;
