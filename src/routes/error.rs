use crate::error::app_error::FailureResponse;
use rocket::serde::json::Json;
use rocket::{Request, catch};

#[catch(400)]
pub fn bad_request(_: &Request) -> Json<FailureResponse> {
    Json(FailureResponse::new("Malformed request body"))
}

#[catch(404)]
pub fn not_found(_: &Request) -> Json<FailureResponse> {
    Json(FailureResponse::new("Not found"))
}

#[catch(500)]
pub fn internal_error(_: &Request) -> Json<FailureResponse> {
    Json(FailureResponse::new("Internal server error"))
}

#[cfg(test)]
mod tests {
    use crate::build_rocket;
    use crate::test_utils::offline_config;
    use rocket::http::Status;
    use rocket::local::asynchronous::Client;
    use serde_json::Value;

    #[rocket::async_test]
    async fn unknown_route_gets_failure_shape() {
        let client = Client::tracked(build_rocket(offline_config())).await.expect("valid rocket instance");

        let response = client.get("/api/nope").dispatch().await;

        assert_eq!(response.status(), Status::NotFound);
        let json: Value = serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "message": "Not found"}));
    }
}
