//! # API Route Configuration
//!
//! This module sets up all the HTTP routes for the API.

use actix_web::{error, web, HttpResponse};

use super::handlers;
use crate::models::ApiResponse;

/// Configure all API routes.
///
/// This function is called from main.rs to set up
/// all the endpoint routes.
///
/// ## Route Structure
///
/// ```text
/// /
/// ├── /health              GET - Health check
/// ├── /auth
/// │   ├── /register        POST - Create vendor account
/// │   └── /login           POST - Exchange credentials for a token
/// └── /vendors
///     ├── /                GET - Public listing
///     ├── /me              GET / PATCH / DELETE - Own account
///     └── /{id}            GET - Public profile
/// ```
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Malformed bodies, paths and query strings get the same envelope
        // as every other error
        .app_data(web::JsonConfig::default().error_handler(|err, _req| {
            let message = err.to_string();
            error::InternalError::from_response(
                err,
                HttpResponse::BadRequest()
                    .json(ApiResponse::<()>::error("INVALID_JSON", &message)),
            )
            .into()
        }))
        .app_data(web::PathConfig::default().error_handler(|err, _req| {
            let message = err.to_string();
            error::InternalError::from_response(
                err,
                HttpResponse::BadRequest()
                    .json(ApiResponse::<()>::error("INVALID_PATH", &message)),
            )
            .into()
        }))
        .app_data(web::QueryConfig::default().error_handler(|err, _req| {
            let message = err.to_string();
            error::InternalError::from_response(
                err,
                HttpResponse::BadRequest()
                    .json(ApiResponse::<()>::error("INVALID_QUERY", &message)),
            )
            .into()
        }))

        // Root endpoint - API information
        .route("/", web::get().to(handlers::api_info))

        // Health check endpoint
        .route("/health", web::get().to(handlers::health_check))

        // Authentication endpoints
        .service(
            web::scope("/auth")
                .route("/register", web::post().to(handlers::register))
                .route("/login", web::post().to(handlers::login))
        )

        // Vendor endpoints
        .service(
            web::scope("/vendors")
                .route("", web::get().to(handlers::list_vendors))

                // "me" must be registered before "{id}"
                .route("/me", web::get().to(handlers::get_current_vendor))
                .route("/me", web::patch().to(handlers::update_current_vendor))
                .route("/me", web::delete().to(handlers::delete_current_vendor))

                .route("/{id}", web::get().to(handlers::get_vendor))
        );
}
