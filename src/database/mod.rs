pub mod login;
pub mod login_session;
pub mod postgres_repository;
pub mod student;
