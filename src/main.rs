mod config;
mod db;
mod errors;
mod handlers;
mod metrics;
mod models;
mod utils;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use actix_web_httpauth::middleware::HttpAuthentication;
use actix_web_prom::PrometheusMetricsBuilder;
use dotenv::dotenv;
use env_logger::Env;
use log::info;
use sqlx::PgPool;
use std::collections::HashMap;
use std::env;

use crate::config::AppConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    // Validate JWT secret
    let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");
    if jwt_secret.is_empty() {
        panic!("JWT_SECRET cannot be empty");
    }

    let app_config = AppConfig::from_env();
    info!("invalid date filters: {:?}", app_config.date_filter_policy);

    // Initialize the database pool
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to the database");

    let bind_address = env::var("BIND_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    info!("Starting server at {}", bind_address);

    // Authentication middleware
    let auth = HttpAuthentication::bearer(crate::utils::jwt::validator);

    // Prometheus middleware
    let mut labels = HashMap::new();
    labels.insert("app".to_string(), "fittrack".to_string());
    let prometheus = PrometheusMetricsBuilder::new("api")
        .endpoint("/metrics")
        .const_labels(labels)
        .build()
        .expect("Failed to create Prometheus metrics");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(prometheus.clone())
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(app_config.clone()))
            .service(
                web::resource("/v1/login").route(web::post().to(handlers::auth::login)),
            )
            .service(
                web::resource("/v1/register").route(web::post().to(handlers::auth::register)),
            )
            .service(
                web::resource("/v1/user")
                    .wrap(auth.clone())
                    .route(web::get().to(handlers::profile::get_profile))
                    .route(web::patch().to(handlers::profile::update_profile))
                    .route(web::delete().to(handlers::profile::delete_profile)),
            )
            .service(
                web::resource("/v1/activities")
                    .wrap(auth.clone())
                    .route(web::get().to(handlers::history::get_history))
                    .route(web::post().to(handlers::activity::create_activity)),
            )
            .service(
                web::resource("/v1/activities/{activity_id}")
                    .wrap(auth.clone())
                    .route(web::get().to(handlers::activity::get_activity))
                    .route(web::patch().to(handlers::activity::update_activity))
                    .route(web::delete().to(handlers::activity::delete_activity)),
            )
            .service(
                web::resource("/v1/metrics")
                    .wrap(auth.clone())
                    .route(web::get().to(handlers::metrics::get_metrics)),
            )
            .service(
                web::resource("/v1/metrics/trends")
                    .wrap(auth.clone())
                    .route(web::get().to(handlers::metrics::get_trends)),
            )
            .service(
                web::resource("/v1/metrics/distribution")
                    .wrap(auth.clone())
                    .route(web::get().to(handlers::metrics::get_distribution)),
            )
    })
    .bind(&bind_address)?
    .run()
    .await
}
