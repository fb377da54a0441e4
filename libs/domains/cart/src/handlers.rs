use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    IdPath, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi};

use crate::error::CartResult;
use crate::models::{AddToCart, CartItem, UpdateCartItem};
use crate::repository::CartRepository;
use crate::service::{CartService, QuantityUpdate};

pub const TAG: &str = "cart";

/// OpenAPI documentation for the Cart API
#[derive(OpenApi)]
#[openapi(
    paths(list_cart, add_to_cart, update_cart_item, remove_from_cart),
    components(
        schemas(CartItem, AddToCart, UpdateCartItem),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Shopping cart endpoints")
    )
)]
pub struct ApiDoc;

/// Create the cart router with all HTTP endpoints
pub fn router<R: CartRepository + 'static>(service: CartService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_cart).post(add_to_cart))
        .route(
            "/{id}",
            axum::routing::put(update_cart_item).delete(remove_from_cart),
        )
        .with_state(shared_service)
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct CartQuery {
    /// Session whose cart to list
    #[serde(default)]
    pub session_id: String,
}

/// List a session's cart items
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(CartQuery),
    responses(
        (status = 200, description = "Cart items for the session", body = Vec<CartItem>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_cart<R: CartRepository>(
    State(service): State<Arc<CartService<R>>>,
    Query(query): Query<CartQuery>,
) -> CartResult<Json<Vec<CartItem>>> {
    let items = service.list_cart(&query.session_id).await?;
    Ok(Json(items))
}

/// Add a product to a cart
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = AddToCart,
    responses(
        (status = 201, description = "Cart item added or merged", body = CartItem),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_to_cart<R: CartRepository>(
    State(service): State<Arc<CartService<R>>>,
    ValidatedJson(input): ValidatedJson<AddToCart>,
) -> CartResult<impl IntoResponse> {
    let item = service.add_to_cart(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Set a cart item's quantity; zero or less removes it
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Cart item ID")
    ),
    request_body = UpdateCartItem,
    responses(
        (status = 200, description = "Cart item updated or removed", body = CartItem),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_cart_item<R: CartRepository>(
    State(service): State<Arc<CartService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateCartItem>,
) -> CartResult<impl IntoResponse> {
    match service.set_quantity(id, input.quantity).await? {
        QuantityUpdate::Updated(item) => Ok(Json(item).into_response()),
        QuantityUpdate::Removed => {
            Ok(Json(json!({ "message": "Cart item removed" })).into_response())
        }
    }
}

/// Remove a cart item
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Cart item ID")
    ),
    responses(
        (status = 204, description = "Cart item removed"),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn remove_from_cart<R: CartRepository>(
    State(service): State<Arc<CartService<R>>>,
    IdPath(id): IdPath,
) -> CartResult<impl IntoResponse> {
    service.remove_from_cart(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
