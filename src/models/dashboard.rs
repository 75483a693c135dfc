use rocket::serde::Serialize;
use schemars::JsonSchema;

pub const SYSTEM_STATUS_ONLINE: &str = "online";

#[derive(Serialize, Debug, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub active_session_count: i64,
    pub total_student_count: i64,
    pub today_login_count: i64,
    pub system_status: String,
    pub last_updated: String,
}

#[derive(Serialize, Debug, JsonSchema)]
pub struct DashboardStatsResponse {
    pub success: bool,
    pub stats: DashboardStats,
}
