mod clock;
mod config;
mod database;
mod db;
mod error;
mod middleware;
mod models;
mod routes;
mod service;
mod util;

#[cfg(test)]
pub mod test_utils;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;

use crate::db::stage_db;
use crate::middleware::RequestLogger;
use crate::routes as app_routes;
use rocket::{Build, Rocket, catchers, http::Method};
use rocket_cors::{AllowedOrigins, CorsOptions};
use rocket_okapi::swagger_ui::{SwaggerUIConfig, make_swagger_ui};
use rocket_okapi::{get_openapi_route, okapi::merge::marge_spec_list};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const API_BASE_PATH: &str = "/api";

fn init_tracing(log_level: &str, json_format: bool) {
    // RUST_LOG takes precedence over the configured level, e.g.
    //   RUST_LOG=student_portal::routes=debug
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).with_target(true).with_line_number(true);

    // try_init: tests build several rockets in one process
    let _ = if json_format { subscriber.json().try_init() } else { subscriber.try_init() };
}

fn build_cors(cors_config: &config::CorsConfig) -> CorsOptions {
    let is_wildcard = cors_config.allowed_origins.len() == 1 && cors_config.allowed_origins[0] == "*";

    if is_wildcard && cors_config.allow_credentials {
        panic!(
            "Invalid CORS configuration: Cannot use wildcard origins (*) with credentials enabled. \
            Either set specific origins or disable credentials."
        );
    }

    let allowed_origins = if cors_config.allowed_origins.is_empty() {
        AllowedOrigins::some_exact::<&str>(&[])
    } else if is_wildcard {
        AllowedOrigins::all()
    } else {
        AllowedOrigins::some_exact(&cors_config.allowed_origins.iter().map(String::as_str).collect::<Vec<_>>())
    };

    CorsOptions {
        allowed_origins,
        allowed_methods: vec![Method::Get, Method::Post, Method::Options, Method::Head]
            .into_iter()
            .map(From::from)
            .collect(),
        allowed_headers: rocket_cors::AllowedHeaders::some(&["Content-Type", "Accept", "X-Requested-With"]),
        allow_credentials: cors_config.allow_credentials,
        ..Default::default()
    }
}

struct RouteSpec {
    path: &'static str,
    routes: Vec<rocket::Route>,
    openapi: rocket_okapi::okapi::openapi3::OpenApi,
}

fn collect_route_specs() -> Vec<RouteSpec> {
    let (auth_routes, auth_openapi) = app_routes::auth::routes();
    let (admin_routes, admin_openapi) = app_routes::admin::routes();
    let (health_routes, health_openapi) = app_routes::health::routes();

    vec![
        RouteSpec {
            path: "/auth",
            routes: auth_routes,
            openapi: auth_openapi,
        },
        RouteSpec {
            path: "/admin",
            routes: admin_routes,
            openapi: admin_openapi,
        },
        RouteSpec {
            path: "/health",
            routes: health_routes,
            openapi: health_openapi,
        },
    ]
}

fn mount_api_routes(mut rocket: Rocket<Build>, enable_swagger: bool) -> Rocket<Build> {
    let route_specs = collect_route_specs();

    if !enable_swagger {
        for spec in route_specs {
            rocket = rocket.mount(format!("{}{}", API_BASE_PATH, spec.path), spec.routes);
        }
        return rocket;
    }

    let mut openapi_list = Vec::new();
    for spec in route_specs {
        rocket = rocket.mount(format!("{}{}", API_BASE_PATH, spec.path), spec.routes);
        openapi_list.push((spec.path, spec.openapi));
    }

    let openapi_docs = match marge_spec_list(&openapi_list) {
        Ok(docs) => docs,
        Err(err) => panic!("Could not merge OpenAPI spec: {}", err),
    };

    let settings = rocket_okapi::settings::OpenApiSettings::default();
    rocket = rocket.mount(API_BASE_PATH, vec![get_openapi_route(openapi_docs, &settings)]);

    let swagger = SwaggerUIConfig {
        url: format!("{}/openapi.json", API_BASE_PATH),
        ..Default::default()
    };
    rocket.mount(format!("{}/docs", API_BASE_PATH), make_swagger_ui(&swagger))
}

pub fn build_rocket(config: Config) -> Rocket<Build> {
    build_rocket_with_clock(config, Arc::new(SystemClock))
}

/// Same as [`build_rocket`] but with the time source used for login timestamps and dashboard stats.
pub fn build_rocket_with_clock(config: Config, clock: Arc<dyn Clock>) -> Rocket<Build> {
    init_tracing(&config.logging.level, config.logging.json_format);

    let cors = build_cors(&config.cors).to_cors().expect("Failed to create CORS fairing");

    let figment = rocket::Config::figment()
        .merge(("address", config.server.address.clone()))
        .merge(("port", config.server.port));

    let rocket = rocket::custom(figment)
        .attach(cors)
        .attach(RequestLogger)
        .attach(stage_db(config.database.clone()))
        .manage(clock)
        .manage(config.clone());

    mount_api_routes(rocket, config.api.enable_swagger).register(
        "/",
        catchers![
            app_routes::error::bad_request,
            app_routes::error::not_found,
            app_routes::error::internal_error
        ],
    )
}
