use actix_web::{web, HttpRequest, HttpResponse, Responder};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::core::Matcher;
use crate::models::{
    CreateGiftRequest, ErrorResponse, Gift, GiftListResponse, HealthResponse, SuggestQuery,
    SuggestResponse,
};
use crate::routes::auth::authorize;
use crate::services::{
    AuthService, CacheKey, CatalogCache, ImageError, ImageStore, PostgresStore, StoreError,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<PostgresStore>,
    pub images: Arc<ImageStore>,
    pub cache: Arc<CatalogCache>,
    pub auth: Arc<AuthService>,
    pub matcher: Matcher,
}

/// Configure all gift-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/gifts/suggest", web::get().to(suggest_gifts))
        .route("/gifts", web::get().to(list_gifts))
        .route("/gifts", web::post().to(create_gift))
        .route("/gifts/{id}", web::delete().to(delete_gift))
        .route("/gifts/{id}/image", web::post().to(upload_gift_image))
        .route("/images/{name}", web::get().to(get_image));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let storage_healthy = state.storage.health_check().await.unwrap_or(false);

    let status = if storage_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Load the catalog, going through the cache when possible
async fn load_catalog(state: &AppState) -> Result<Vec<Gift>, StoreError> {
    let key = CacheKey::catalog();

    if let Ok(gifts) = state.cache.get::<Vec<Gift>>(&key).await {
        return Ok(gifts);
    }

    let gifts = state.storage.list_gifts().await?;

    if let Err(e) = state.cache.set(&key, &gifts).await {
        tracing::warn!("Failed to cache catalog: {}", e);
    }

    Ok(gifts)
}

/// Gift suggestion endpoint
///
/// GET /api/v1/gifts/suggest?sex=female&age=30&national=american&job=engineer
///
/// Every parameter is optional. Unparseable ages are treated as not
/// provided rather than rejected, matching the finder form's behavior.
async fn suggest_gifts(
    state: web::Data<AppState>,
    query: web::Query<SuggestQuery>,
) -> impl Responder {
    let profile = query.into_inner().into_profile();
    let cache_key = CacheKey::suggestions(&profile);

    if let Ok(cached) = state.cache.get::<SuggestResponse>(&cache_key).await {
        tracing::debug!("Serving cached suggestions for {}", cache_key);
        return HttpResponse::Ok().json(cached);
    }

    let gifts = match load_catalog(&state).await {
        Ok(gifts) => gifts,
        Err(e) => {
            tracing::error!("Failed to load catalog: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to load catalog".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let result = state.matcher.suggest(&profile, gifts);

    let response = SuggestResponse {
        gifts: result.gifts,
        total_candidates: result.total_candidates,
    };

    if let Err(e) = state.cache.set(&cache_key, &response).await {
        tracing::warn!("Failed to cache suggestions: {}", e);
    }

    tracing::info!(
        "Returning {} of {} gifts for profile sex={:?} age={:?} national={:?} job={:?}",
        response.gifts.len(),
        response.total_candidates,
        profile.sex,
        profile.age,
        profile.nationality,
        profile.job
    );

    HttpResponse::Ok().json(response)
}

/// Full catalog listing
///
/// GET /api/v1/gifts
async fn list_gifts(state: web::Data<AppState>) -> impl Responder {
    match load_catalog(&state).await {
        Ok(gifts) => HttpResponse::Ok().json(GiftListResponse {
            total: gifts.len(),
            gifts,
        }),
        Err(e) => {
            tracing::error!("Failed to list gifts: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to list gifts".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Create a gift
///
/// POST /api/v1/gifts (requires a valid admin token)
///
/// Request body:
/// ```json
/// {
///   "name": "string",
///   "description": "string",
///   "price": 25.0,
///   "imageUrl": "https://...",
///   "gender": "male,female",
///   "ageMin": 18,
///   "ageMax": 99,
///   "nationalities": "japanese,american",
///   "jobs": "engineer"
/// }
/// ```
async fn create_gift(
    state: web::Data<AppState>,
    http_req: HttpRequest,
    req: web::Json<CreateGiftRequest>,
) -> impl Responder {
    let claims = match authorize(&state, &http_req) {
        Ok(claims) => claims,
        Err(response) => return response,
    };

    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for create_gift request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    if let (Some(min), Some(max)) = (req.age_min, req.age_max) {
        if min > max {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Validation failed".to_string(),
                message: "ageMin must not exceed ageMax".to_string(),
                status_code: 400,
            });
        }
    }

    // Pull the image down first so a bad URL never leaves a half-created gift
    let image = match req.image_url.as_deref().filter(|url| !url.trim().is_empty()) {
        Some(url) => match state.images.fetch_remote(url).await {
            Ok(name) => Some(name),
            Err(e) => {
                tracing::info!("Rejecting gift with unfetchable image {}: {}", url, e);
                return HttpResponse::BadRequest().json(ErrorResponse {
                    error: "Failed to fetch image".to_string(),
                    message: e.to_string(),
                    status_code: 400,
                });
            }
        },
        None => None,
    };

    let gift = Gift {
        id: Uuid::new_v4(),
        name: req.name.clone(),
        description: req.description.clone(),
        price: req.price,
        image,
        criteria: req.criteria(),
        created_at: Some(chrono::Utc::now()),
    };

    if let Err(e) = state.storage.insert_gift(&gift).await {
        tracing::error!("Failed to insert gift: {}", e);
        return HttpResponse::InternalServerError().json(ErrorResponse {
            error: "Failed to create gift".to_string(),
            message: e.to_string(),
            status_code: 500,
        });
    }

    state.cache.clear();

    tracing::info!("{} created gift {} ({})", claims.sub, gift.id, gift.name);

    HttpResponse::Created().json(gift)
}

/// Delete a gift
///
/// DELETE /api/v1/gifts/{id} (requires a valid admin token)
async fn delete_gift(
    state: web::Data<AppState>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
) -> impl Responder {
    let claims = match authorize(&state, &http_req) {
        Ok(claims) => claims,
        Err(response) => return response,
    };

    let id = path.into_inner();

    match state.storage.delete_gift(id).await {
        Ok(image) => {
            state.cache.clear();

            if let Some(name) = image {
                if let Err(e) = state.images.remove(&name).await {
                    tracing::warn!("Failed to remove image {} for gift {}: {}", name, id, e);
                }
            }

            tracing::info!("{} deleted gift {}", claims.sub, id);

            HttpResponse::Ok().json(serde_json::json!({
                "deleted": true,
                "id": id,
            }))
        }
        Err(StoreError::GiftNotFound(_)) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Gift not found".to_string(),
            message: format!("No gift with id {}", id),
            status_code: 404,
        }),
        Err(e) => {
            tracing::error!("Failed to delete gift {}: {}", id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to delete gift".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Upload an image for an existing gift
///
/// POST /api/v1/gifts/{id}/image (requires a valid admin token)
///
/// The body is the raw image bytes; the Content-Type header selects the
/// stored extension.
async fn upload_gift_image(
    state: web::Data<AppState>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Bytes,
) -> impl Responder {
    let claims = match authorize(&state, &http_req) {
        Ok(claims) => claims,
        Err(response) => return response,
    };

    let id = path.into_inner();

    let content_type = match http_req
        .headers()
        .get(actix_web::http::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    {
        Some(value) => value.to_string(),
        None => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Missing Content-Type".to_string(),
                message: "Image uploads must declare an image Content-Type".to_string(),
                status_code: 400,
            });
        }
    };

    // Fetch first so a miss is a clean 404.
    // The old image file is removed once the new one is attached.
    let previous = match state.storage.get_gift(id).await {
        Ok(gift) => gift.image,
        Err(StoreError::GiftNotFound(_)) => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Gift not found".to_string(),
                message: format!("No gift with id {}", id),
                status_code: 404,
            });
        }
        Err(e) => {
            tracing::error!("Failed to load gift {}: {}", id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to load gift".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let name = match state.images.save_upload(&body, &content_type).await {
        Ok(name) => name,
        Err(e @ ImageError::UnsupportedType(_)) => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Unsupported image type".to_string(),
                message: e.to_string(),
                status_code: 400,
            });
        }
        Err(e @ ImageError::TooLarge(_)) => {
            return HttpResponse::PayloadTooLarge().json(ErrorResponse {
                error: "Image too large".to_string(),
                message: e.to_string(),
                status_code: 413,
            });
        }
        Err(e) => {
            tracing::error!("Failed to store image for gift {}: {}", id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to store image".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    if let Err(e) = state.storage.set_gift_image(id, &name).await {
        tracing::error!("Failed to attach image to gift {}: {}", id, e);

        // The stored file is unreachable without a row pointing at it
        if let Err(remove_err) = state.images.remove(&name).await {
            tracing::warn!("Failed to remove unattached image {}: {}", name, remove_err);
        }

        return HttpResponse::InternalServerError().json(ErrorResponse {
            error: "Failed to attach image".to_string(),
            message: e.to_string(),
            status_code: 500,
        });
    }

    if let Some(old) = previous {
        if let Err(e) = state.images.remove(&old).await {
            tracing::warn!("Failed to remove replaced image {}: {}", old, e);
        }
    }

    state.cache.clear();

    tracing::info!("{} attached image {} to gift {}", claims.sub, name, id);

    HttpResponse::Ok().json(serde_json::json!({
        "id": id,
        "image": name,
    }))
}

/// Serve a stored gift image
///
/// GET /api/v1/images/{name}
async fn get_image(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let name = path.into_inner();

    match state.images.open(&name).await {
        Ok((bytes, mime)) => HttpResponse::Ok().content_type(mime).body(bytes),
        Err(ImageError::NotFound(_)) | Err(ImageError::InvalidName(_)) => {
            HttpResponse::NotFound().json(ErrorResponse {
                error: "Image not found".to_string(),
                message: format!("No image named {}", name),
                status_code: 404,
            })
        }
        Err(e) => {
            tracing::error!("Failed to read image {}: {}", name, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to read image".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
