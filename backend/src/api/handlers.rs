//! # API Request Handlers
//!
//! This module contains the handler functions for each API endpoint.
//! Each handler:
//! 1. Extracts request data (and the Bearer token where required)
//! 2. Calls the vendor manager
//! 3. Returns a formatted response
//!
//! ## Error Handling
//!
//! All errors are returned as JSON with a stable code:
//!
//! | Code | Status |
//! |------|--------|
//! | `VALIDATION_ERROR` | 400 |
//! | `INVALID_JSON` | 400 |
//! | `INVALID_PATH` | 400 |
//! | `INVALID_QUERY` | 400 |
//! | `INVALID_CREDENTIALS` | 401 |
//! | `UNAUTHORIZED` | 401 |
//! | `VENDOR_NOT_FOUND` | 404 |
//! | `DUPLICATE_EMAIL` | 409 |
//! | `INTERNAL_ERROR` | 500 |

use std::sync::Arc;

use actix_web::http::{header, StatusCode};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use serde_json::json;
use tracing::{error, warn};
use uuid::Uuid;

use crate::models::{
    ApiResponse,
    AuthResponse,
    FieldErrorDetail,
    HealthResponse,
    ListVendorsQuery,
    LoginRequest,
    PublicVendorResponse,
    RegisterVendorRequest,
    UpdateVendorRequest,
    VendorListResponse,
    VendorResponse,
};
use crate::services::{AccountError, Claims, TokenError};
use crate::utils::page_bounds;
use crate::AppState;

/// API information endpoint (root).
///
/// ## Endpoint
///
/// `GET /`
pub async fn api_info(state: web::Data<Arc<AppState>>) -> HttpResponse {
    let info = json!({
        "name": "Vendor Account API",
        "version": env!("CARGO_PKG_VERSION"),
        "tokenLifetimeSeconds": state.config.jwt_lifetime.num_seconds(),
        "endpoints": {
            "health": { "method": "GET", "path": "/health" },
            "auth": {
                "register": { "method": "POST", "path": "/auth/register" },
                "login": { "method": "POST", "path": "/auth/login" }
            },
            "vendors": {
                "list": { "method": "GET", "path": "/vendors" },
                "me": { "methods": ["GET", "PATCH", "DELETE"], "path": "/vendors/me" },
                "profile": { "method": "GET", "path": "/vendors/{id}" }
            }
        }
    });

    HttpResponse::Ok().json(ApiResponse::success(info))
}

/// Health check endpoint.
///
/// ## Endpoint
///
/// `GET /health`
///
/// Returns 503 when the vendor store does not answer.
pub async fn health_check(state: web::Data<Arc<AppState>>) -> HttpResponse {
    let db_healthy = state.vendor_manager.is_store_healthy().await;

    let response = HealthResponse {
        status: if db_healthy { "healthy" } else { "unhealthy" }.to_string(),
        database: db_healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    };

    let status_code = if db_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    HttpResponse::build(status_code).json(ApiResponse::success(response))
}

/// Register a new vendor.
///
/// ## Endpoint
///
/// `POST /auth/register`
///
/// ## Example
///
/// ```bash
/// curl -X POST http://127.0.0.1:8080/auth/register \
///   -H "Content-Type: application/json" \
///   -d '{"name": "Green Grocer", "email": "ann@farm.in", "password": "secret1"}'
/// ```
///
/// Responds 201 with `{ vendor, token }`.
pub async fn register(
    state: web::Data<Arc<AppState>>,
    body: web::Json<RegisterVendorRequest>,
) -> HttpResponse {
    match state.vendor_manager.register(body.into_inner()).await {
        Ok((vendor, token)) => HttpResponse::Created().json(ApiResponse::success(AuthResponse {
            vendor: VendorResponse::from(&vendor),
            token,
        })),
        Err(e) => error_response(&e),
    }
}

/// Log in.
///
/// ## Endpoint
///
/// `POST /auth/login`
///
/// Unknown email and wrong password both answer `INVALID_CREDENTIALS`.
pub async fn login(
    state: web::Data<Arc<AppState>>,
    body: web::Json<LoginRequest>,
) -> HttpResponse {
    match state.vendor_manager.login(body.into_inner()).await {
        Ok((vendor, token)) => HttpResponse::Ok().json(ApiResponse::success(AuthResponse {
            vendor: VendorResponse::from(&vendor),
            token,
        })),
        Err(e) => error_response(&e),
    }
}

/// Public vendor listing.
///
/// ## Endpoint
///
/// `GET /vendors?limit=20&offset=0`
pub async fn list_vendors(
    state: web::Data<Arc<AppState>>,
    query: web::Query<ListVendorsQuery>,
) -> HttpResponse {
    let (limit, offset) = page_bounds(query.limit, query.offset);

    match state.vendor_manager.list_vendors(limit, offset).await {
        Ok(vendors) => HttpResponse::Ok().json(ApiResponse::success(VendorListResponse {
            vendors: vendors.iter().map(PublicVendorResponse::from).collect(),
            offset,
            limit,
        })),
        Err(e) => error_response(&e),
    }
}

/// Public vendor profile.
///
/// ## Endpoint
///
/// `GET /vendors/{id}`
pub async fn get_vendor(
    state: web::Data<Arc<AppState>>,
    path: web::Path<Uuid>,
) -> HttpResponse {
    match state.vendor_manager.get_vendor(path.into_inner()).await {
        Ok(vendor) => HttpResponse::Ok().json(ApiResponse::success(PublicVendorResponse::from(&vendor))),
        Err(e) => error_response(&e),
    }
}

/// The caller's own profile.
///
/// ## Endpoint
///
/// `GET /vendors/me` with `Authorization: Bearer <token>`
pub async fn get_current_vendor(
    state: web::Data<Arc<AppState>>,
    req: HttpRequest,
) -> HttpResponse {
    let claims = match authenticate(&req, &state) {
        Ok(claims) => claims,
        Err(response) => return response,
    };

    match state.vendor_manager.get_vendor(claims.user_id).await {
        Ok(vendor) => HttpResponse::Ok().json(ApiResponse::success(VendorResponse::from(&vendor))),
        Err(e) => error_response(&e),
    }
}

/// Update the caller's own profile.
///
/// ## Endpoint
///
/// `PATCH /vendors/me` with `Authorization: Bearer <token>`
pub async fn update_current_vendor(
    state: web::Data<Arc<AppState>>,
    req: HttpRequest,
    body: web::Json<UpdateVendorRequest>,
) -> HttpResponse {
    let claims = match authenticate(&req, &state) {
        Ok(claims) => claims,
        Err(response) => return response,
    };

    match state
        .vendor_manager
        .update_vendor(claims.user_id, body.into_inner())
        .await
    {
        Ok(vendor) => HttpResponse::Ok().json(ApiResponse::success(VendorResponse::from(&vendor))),
        Err(e) => error_response(&e),
    }
}

/// Delete the caller's own account.
///
/// ## Endpoint
///
/// `DELETE /vendors/me` with `Authorization: Bearer <token>`
///
/// Tokens already issued stay valid until they expire, but every
/// authenticated endpoint answers 404 once the account is gone.
pub async fn delete_current_vendor(
    state: web::Data<Arc<AppState>>,
    req: HttpRequest,
) -> HttpResponse {
    let claims = match authenticate(&req, &state) {
        Ok(claims) => claims,
        Err(response) => return response,
    };

    match state.vendor_manager.delete_vendor(claims.user_id).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success(json!({
            "id": claims.user_id,
            "deleted": true,
        }))),
        Err(e) => error_response(&e),
    }
}

// ============================================
// HELPERS
// ============================================

/// Pull the token out of `Authorization: Bearer <token>`.
fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn authenticate(req: &HttpRequest, state: &AppState) -> Result<Claims, HttpResponse> {
    let Some(token) = bearer_token(req) else {
        return Err(HttpResponse::Unauthorized().json(ApiResponse::<()>::error(
            "UNAUTHORIZED",
            "Missing bearer token",
        )));
    };

    state
        .vendor_manager
        .authenticate(token)
        .map_err(|e| error_response(&e))
}

/// Translate a service error into the JSON error envelope.
fn error_response(e: &AccountError) -> HttpResponse {
    match e {
        AccountError::Validation(v) => HttpResponse::BadRequest().json(
            ApiResponse::<()>::error_with_details(
                "VALIDATION_ERROR",
                &e.to_string(),
                v.errors.iter().map(FieldErrorDetail::from).collect(),
            ),
        ),
        AccountError::DuplicateEmail(_) => HttpResponse::Conflict().json(
            ApiResponse::<()>::error("DUPLICATE_EMAIL", "Email is already registered"),
        ),
        AccountError::VendorNotFound(_) => HttpResponse::NotFound().json(
            ApiResponse::<()>::error("VENDOR_NOT_FOUND", &e.to_string()),
        ),
        AccountError::InvalidCredentials => HttpResponse::Unauthorized().json(
            ApiResponse::<()>::error("INVALID_CREDENTIALS", "Invalid email or password"),
        ),
        AccountError::Token(TokenError::Expired) | AccountError::Token(TokenError::Invalid(_)) => {
            warn!("Rejected session token: {}", e);
            HttpResponse::Unauthorized().json(ApiResponse::<()>::error("UNAUTHORIZED", &e.to_string()))
        }
        AccountError::Token(_) | AccountError::Password(_) | AccountError::DatabaseError(_) => {
            error!("Request failed: {}", e);
            HttpResponse::InternalServerError().json(
                ApiResponse::<()>::error("INTERNAL_ERROR", "Internal server error"),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::configure_routes;
    use crate::config::AppConfig;
    use crate::db::store::mock::MemoryVendorStore;
    use crate::services::password::MIN_COST;
    use crate::services::{PasswordHasher, TokenIssuer, VendorManager};
    use actix_web::{test, App};
    use chrono::Duration;
    use serde_json::Value;

    fn test_state() -> Arc<AppState> {
        let config = AppConfig {
            database_url: "postgres://unused".to_string(),
            jwt_secret: "test-secret".to_string(),
            jwt_lifetime: Duration::days(30),
            bcrypt_cost: MIN_COST,
            server_host: "127.0.0.1".to_string(),
            server_port: 0,
        };
        let vendor_manager = VendorManager::new(
            Arc::new(MemoryVendorStore::new()),
            PasswordHasher::new(config.bcrypt_cost).unwrap(),
            TokenIssuer::from_config(&config).unwrap(),
        );
        Arc::new(AppState { vendor_manager, config })
    }

    macro_rules! test_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(test_state()))
                    .configure(configure_routes),
            )
            .await
        };
    }

    fn register_body(email: &str) -> Value {
        json!({ "name": "Green Grocer", "email": email, "password": "secret1" })
    }

    #[actix_web::test]
    async fn test_register_returns_token_without_password() {
        let app = test_app!();
        let req = test::TestRequest::post()
            .uri("/auth/register")
            .set_json(register_body("ann@farm.in"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert!(body["data"]["token"].as_str().is_some_and(|t| !t.is_empty()));
        assert_eq!(body["data"]["vendor"]["location"]["latitude"], 19.076);
        assert_eq!(body["data"]["vendor"]["location"]["longitude"], 72.8777);
        assert_eq!(body["data"]["vendor"]["rating"], 0.0);
        assert!(!body.to_string().contains("secret1"));
        assert!(!body.to_string().contains("password"));
    }

    #[actix_web::test]
    async fn test_register_validation_details() {
        let app = test_app!();
        let req = test::TestRequest::post()
            .uri("/auth/register")
            .set_json(json!({ "name": "Green Grocer", "password": "secret1" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["details"][0]["field"], "email");
        assert_eq!(body["error"]["details"][0]["message"], "Please provide email");
    }

    #[actix_web::test]
    async fn test_duplicate_register_conflicts() {
        let app = test_app!();
        for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
            let req = test::TestRequest::post()
                .uri("/auth/register")
                .set_json(register_body("ann@farm.in"))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), expected);
        }
    }

    #[actix_web::test]
    async fn test_malformed_json() {
        let app = test_app!();
        let req = test::TestRequest::post()
            .uri("/auth/login")
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "INVALID_JSON");
    }

    #[actix_web::test]
    async fn test_malformed_vendor_id() {
        let app = test_app!();
        let req = test::TestRequest::get().uri("/vendors/not-a-uuid").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "INVALID_PATH");
    }

    #[actix_web::test]
    async fn test_malformed_listing_query() {
        let app = test_app!();
        let req = test::TestRequest::get().uri("/vendors?limit=abc").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "INVALID_QUERY");
    }

    #[actix_web::test]
    async fn test_login_and_profile_flow() {
        let app = test_app!();
        let req = test::TestRequest::post()
            .uri("/auth/register")
            .set_json(register_body("ann@farm.in"))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({ "email": "ann@farm.in", "password": "wrong-pass" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({ "email": "ann@farm.in", "password": "secret1" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let token = body["data"]["token"].as_str().unwrap().to_string();

        let req = test::TestRequest::get().uri("/vendors/me").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get()
            .uri("/vendors/me")
            .insert_header((header::AUTHORIZATION, "Bearer not.a.token"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get()
            .uri("/vendors/me")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["email"], "ann@farm.in");

        let req = test::TestRequest::patch()
            .uri("/vendors/me")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .set_json(json!({ "name": "Ann's Orchard" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["name"], "Ann's Orchard");

        let req = test::TestRequest::delete()
            .uri("/vendors/me")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri("/vendors/me")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_public_listing_hides_email() {
        let app = test_app!();
        for email in ["ann@farm.in", "bob@farm.in"] {
            let req = test::TestRequest::post()
                .uri("/auth/register")
                .set_json(register_body(email))
                .to_request();
            test::call_service(&app, req).await;
        }

        let req = test::TestRequest::get().uri("/vendors?limit=1").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["limit"], 1);
        assert_eq!(body["data"]["vendors"].as_array().map(Vec::len), Some(1));
        assert!(!body.to_string().contains("@farm.in"));

        let id = body["data"]["vendors"][0]["id"].as_str().unwrap().to_string();
        let req = test::TestRequest::get().uri(&format!("/vendors/{}", id)).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["name"], "Green Grocer");
    }

    #[actix_web::test]
    async fn test_health() {
        let app = test_app!();
        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["status"], "healthy");
    }
}
