use actix_web::{web, HttpRequest, HttpResponse, Responder};
use validator::Validate;

use crate::models::{AuthResponse, ErrorResponse, LoginRequest, SignupRequest, User};
use crate::routes::gifts::AppState;
use crate::services::{AuthService, Claims, StoreError};

/// Configure account routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/auth/signup", web::post().to(signup))
        .route("/auth/login", web::post().to(login));
}

/// Check the Authorization header of a request, turning failures into a
/// ready-to-return 401 response
pub(crate) fn authorize(state: &AppState, req: &HttpRequest) -> Result<Claims, HttpResponse> {
    let header = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    state.auth.authenticate(header).map_err(|err| {
        tracing::info!("Rejected unauthorized request: {}", err);
        HttpResponse::Unauthorized().json(ErrorResponse {
            error: "Unauthorized".to_string(),
            message: err.to_string(),
            status_code: 401,
        })
    })
}

/// Create an admin account
///
/// POST /api/v1/auth/signup
///
/// Request body:
/// ```json
/// {
///   "username": "string",
///   "password": "string"
/// }
/// ```
async fn signup(state: web::Data<AppState>, req: web::Json<SignupRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for signup request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let salt = AuthService::generate_salt();
    let password_hash = AuthService::hash_password(&req.password, &salt);

    let user = User {
        username: req.username.clone(),
        password_hash,
        salt,
        created_at: chrono::Utc::now(),
    };

    match state.storage.create_user(&user).await {
        Ok(()) => {}
        Err(StoreError::UsernameTaken(_)) => {
            return HttpResponse::Conflict().json(ErrorResponse {
                error: "Username taken".to_string(),
                message: format!("The username {} is already in use", req.username),
                status_code: 409,
            });
        }
        Err(e) => {
            tracing::error!("Failed to create account for {}: {}", req.username, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to create account".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    }

    match state.auth.issue_token(&req.username) {
        Ok(token) => HttpResponse::Created().json(AuthResponse {
            token,
            username: req.username.clone(),
        }),
        Err(e) => {
            tracing::error!("Failed to issue token for {}: {}", req.username, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to issue token".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Log in to an admin account
///
/// POST /api/v1/auth/login
///
/// A missing account and a wrong password produce the same response so
/// the endpoint does not reveal which usernames exist.
async fn login(state: web::Data<AppState>, req: web::Json<LoginRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let user = match state.storage.get_user(&req.username).await {
        Ok(user) => user,
        Err(e) => {
            tracing::error!("Failed to look up account {}: {}", req.username, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to look up account".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let valid = user
        .as_ref()
        .map(|user| AuthService::verify_password(&req.password, &user.salt, &user.password_hash))
        .unwrap_or(false);

    if !valid {
        tracing::info!("Failed login attempt for {}", req.username);
        return HttpResponse::Unauthorized().json(ErrorResponse {
            error: "Unauthorized".to_string(),
            message: "Invalid credentials".to_string(),
            status_code: 401,
        });
    }

    match state.auth.issue_token(&req.username) {
        Ok(token) => HttpResponse::Ok().json(AuthResponse {
            token,
            username: req.username.clone(),
        }),
        Err(e) => {
            tracing::error!("Failed to issue token for {}: {}", req.username, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to issue token".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
