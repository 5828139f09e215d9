//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Json, Multipart, Path, State},
    http::{header, request::Parts, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::state::AppState;
use crate::store::ProductPatch;
use crate::uploads::ImageStore;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        // Health and status
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/status", get(status))
        // Accounts
        .route("/register", post(register))
        .route("/login", post(login))
        // Uploaded images
        .route("/uploads/{filename}", get(get_upload))
        // Products
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        // Testimonials
        .route(
            "/testimonials",
            get(list_testimonials).post(create_testimonial),
        )
        .route("/testimonials/{id}", delete(delete_testimonial))
        .layer(DefaultBodyLimit::max(state.config.max_body_size));

    if state.config.cors_enabled {
        router = router.layer(CorsLayer::permissive());
    }
    if state.config.logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

/// Authenticated user, extracted from the `Authorization: Bearer` header
pub struct AuthUser(pub u64);

impl axum::extract::FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = (StatusCode, Json<Value>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "));

        let Some(token) = token else {
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(json!({"message": "Missing bearer token!"})),
            ));
        };

        match state.tokens.verify(token) {
            Ok(user_id) => Ok(AuthUser(user_id)),
            Err(e) => Err((
                StatusCode::UNAUTHORIZED,
                Json(json!({"message": e.to_string()})),
            )),
        }
    }
}

/// Index banner
async fn index() -> &'static str {
    "Service is online!"
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Status endpoint
async fn status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": state.uptime().as_secs(),
        "users": state.users.count().await,
        "products": state.products.count().await,
        "testimonials": state.testimonials.count().await,
        "security_enabled": state.config.security_enabled,
    }))
}

/// Register/login request body
#[derive(Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

fn missing_credentials(req: &CredentialsRequest) -> Option<&'static str> {
    match (
        req.username.as_deref().unwrap_or(""),
        req.password.as_deref().unwrap_or(""),
    ) {
        ("", "") => Some("Please supply all fields!"),
        ("", _) => Some("Please supply the username field!"),
        (_, "") => Some("Please supply the password field!"),
        _ => None,
    }
}

/// Register a new account
async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CredentialsRequest>,
) -> impl IntoResponse {
    if let Some(message) = missing_credentials(&req) {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"message": message})),
        );
    }

    let username = req.username.unwrap_or_default();
    let password = req.password.unwrap_or_default();

    let password_hash = match crate::auth::hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Password hashing failed: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"message": "Something went wrong!"})),
            );
        },
    };

    match state.users.create(&username, &password_hash).await {
        Ok(user) => {
            tracing::info!("Registered user {} ({})", user.username, user.id);
            (StatusCode::CREATED, Json(json!({"message": "Registered!"})))
        },
        Err(_) => (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Sorry, that username is taken!"})),
        ),
    }
}

/// Log in and receive an access token
async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CredentialsRequest>,
) -> impl IntoResponse {
    if let Some(message) = missing_credentials(&req) {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"message": message})),
        );
    }

    let username = req.username.unwrap_or_default();
    let password = req.password.unwrap_or_default();

    let user = match state.users.find_by_username(&username).await {
        Some(user) if crate::auth::verify_password(&password, &user.password_hash) => user,
        _ => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"message": "Invalid credentials!"})),
            );
        },
    };

    match state.tokens.issue(user.id) {
        Ok(token) => (
            StatusCode::OK,
            Json(json!({"message": "Logged in!", "access_token": token})),
        ),
        Err(e) => {
            tracing::error!("Token issuance failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"message": "Something went wrong!"})),
            )
        },
    }
}

/// Serve a stored image
async fn get_upload(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> impl IntoResponse {
    match state.images.read(&filename).await {
        Ok(bytes) => {
            let content_type = ImageStore::content_type(&filename);
            ([(header::CONTENT_TYPE, content_type)], bytes).into_response()
        },
        Err(crate::error::StoreError::NotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "Image not found!"})),
        )
            .into_response(),
        Err(_) => (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Invalid filename!"})),
        )
            .into_response(),
    }
}

fn product_json(product: &crate::store::Product) -> Value {
    json!({
        "id": product.id,
        "name": product.name,
        "description": product.description,
        "price": product.price,
        "image": product.image_path(),
    })
}

/// List all products
async fn list_products(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let data: Vec<_> = state
        .products
        .list()
        .await
        .iter()
        .map(product_json)
        .collect();

    Json(json!({"message": "OK", "data": data}))
}

/// Get product by id
async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    match state.products.get(id).await {
        Some(product) => (
            StatusCode::OK,
            Json(json!({"message": "OK", "data": product_json(&product)})),
        ),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "Product not found!"})),
        ),
    }
}

/// Multipart product form, all parts optional at parse time
#[derive(Default)]
struct ProductForm {
    name: Option<String>,
    description: Option<String>,
    price: Option<String>,
    image: Option<(String, Vec<u8>)>,
}

async fn read_product_form(mut multipart: Multipart) -> Result<ProductForm, String> {
    let mut form = ProductForm::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| e.to_string())? {
        let part = field.name().unwrap_or_default().to_string();
        match part.as_str() {
            "name" => form.name = Some(field.text().await.map_err(|e| e.to_string())?),
            "description" => {
                form.description = Some(field.text().await.map_err(|e| e.to_string())?)
            },
            "price" => form.price = Some(field.text().await.map_err(|e| e.to_string())?),
            "image" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(|e| e.to_string())?;
                form.image = Some((filename, bytes.to_vec()));
            },
            other => tracing::debug!("Ignoring unknown multipart field: {other}"),
        }
    }

    Ok(form)
}

fn parse_price(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// Create a product (multipart form, authenticated)
async fn create_product(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    multipart: Multipart,
) -> impl IntoResponse {
    let form = match read_product_form(multipart).await {
        Ok(form) => form,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"message": format!("Malformed form data: {e}")})),
            );
        },
    };

    let (Some(name), Some(description), Some(price), Some((filename, bytes))) =
        (form.name, form.description, form.price, form.image)
    else {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"message": "Please supply all fields including the image!"})),
        );
    };

    let Some(price) = parse_price(&price) else {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"message": "Price must be a number!"})),
        );
    };

    let stored_image = match state.images.save(&filename, &bytes).await {
        Ok(name) => name,
        Err(crate::error::StoreError::UnsupportedFormat(_)) => {
            return (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                Json(json!({"message": "Image format not supported!"})),
            );
        },
        Err(e) => {
            tracing::error!("Image save failed: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"message": "Something went wrong!"})),
            );
        },
    };

    let product = state
        .products
        .create(&name, &description, price, &stored_image)
        .await;
    tracing::info!("User {user_id} created product {}", product.id);

    (
        StatusCode::CREATED,
        Json(json!({"message": "Created!", "data": product_json(&product)})),
    )
}

/// Update a product (multipart form, authenticated, all parts optional)
async fn update_product(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<u64>,
    multipart: Multipart,
) -> impl IntoResponse {
    let form = match read_product_form(multipart).await {
        Ok(form) => form,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"message": format!("Malformed form data: {e}")})),
            );
        },
    };

    let price = match form.price {
        Some(raw) => match parse_price(&raw) {
            Some(price) => Some(price),
            None => {
                return (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({"message": "Price must be a number!"})),
                );
            },
        },
        None => None,
    };

    let image = match form.image {
        Some((filename, bytes)) => match state.images.save(&filename, &bytes).await {
            Ok(name) => Some(name),
            Err(crate::error::StoreError::UnsupportedFormat(_)) => {
                return (
                    StatusCode::UNSUPPORTED_MEDIA_TYPE,
                    Json(json!({"message": "Image format not supported!"})),
                );
            },
            Err(e) => {
                tracing::error!("Image save failed: {e}");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"message": "Something went wrong!"})),
                );
            },
        },
        None => None,
    };

    let patch = ProductPatch {
        name: form.name,
        description: form.description,
        price,
        image: image.clone(),
    };

    match state.products.update(id, patch).await {
        Some((previous, updated)) => {
            if image.is_some() {
                state.images.remove(&previous.image).await;
            }
            tracing::info!("User {user_id} updated product {id}");
            (
                StatusCode::OK,
                Json(json!({"message": "Product updated!", "data": product_json(&updated)})),
            )
        },
        None => {
            // The record is gone; don't strand the file we just wrote
            if let Some(name) = image {
                state.images.remove(&name).await;
            }
            (
                StatusCode::NOT_FOUND,
                Json(json!({"message": "Product not found!"})),
            )
        },
    }
}

/// Delete a product (authenticated)
async fn delete_product(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    match state.products.remove(id).await {
        Some(product) => {
            state.images.remove(&product.image).await;
            tracing::info!("User {user_id} deleted product {id}");
            (
                StatusCode::OK,
                Json(json!({"message": "Product deleted!"})),
            )
        },
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "Product not found!"})),
        ),
    }
}

/// List all testimonials, newest first
async fn list_testimonials(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let data: Vec<_> = state
        .testimonials
        .list()
        .await
        .iter()
        .map(|t| {
            json!({
                "id": t.id,
                "name": t.name,
                "description": t.description,
                "rating": t.rating,
                "created_at": t.created_at.to_rfc3339(),
            })
        })
        .collect();

    Json(json!({"message": "OK", "data": data}))
}

/// Testimonial create request
#[derive(Deserialize)]
pub struct CreateTestimonialRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Number or numeric string, matching what catalog frontends send
    #[serde(default)]
    pub rating: Option<Value>,
}

fn parse_rating(raw: &Value) -> Option<i64> {
    match raw {
        // Floats truncate toward zero, so 4.7 counts as 4
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Create a testimonial.
///
/// Free-text fields pass through the XSS detector before any write; the
/// first flagged field aborts the whole operation.
async fn create_testimonial(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateTestimonialRequest>,
) -> impl IntoResponse {
    let (Some(name), Some(description), Some(rating)) = (
        req.name.filter(|s| !s.is_empty()),
        req.description.filter(|s| !s.is_empty()),
        req.rating,
    ) else {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"message": "Please supply all fields (name, description, rating)!"})),
        );
    };

    let Some(rating) = parse_rating(&rating) else {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"message": "Rating must be a number!"})),
        );
    };

    if !(1..=5).contains(&rating) {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"message": "Rating must be between 1 and 5!"})),
        );
    }

    if state.config.security_enabled {
        let fields = [("name", name.as_str()), ("description", description.as_str())];
        if let Some(field) = state.detector.first_flagged_field(&fields) {
            tracing::warn!("Rejected testimonial: field '{field}' flagged by XSS detector");
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "message": format!("Input in field '{field}' was flagged as invalid!")
                })),
            );
        }
    }

    let testimonial = state
        .testimonials
        .create(&name, &description, rating as u8)
        .await;

    (
        StatusCode::CREATED,
        Json(json!({
            "message": "Created!",
            "data": {
                "id": testimonial.id,
                "name": testimonial.name,
                "description": testimonial.description,
                "rating": testimonial.rating,
                "created_at": testimonial.created_at.to_rfc3339(),
            }
        })),
    )
}

/// Delete a testimonial (authenticated)
async fn delete_testimonial(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    match state.testimonials.remove(id).await {
        Some(_) => {
            tracing::info!("User {user_id} deleted testimonial {id}");
            (
                StatusCode::OK,
                Json(json!({"message": "Testimonial deleted!"})),
            )
        },
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "Testimonial not found!"})),
        ),
    }
}
