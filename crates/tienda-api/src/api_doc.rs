//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use tienda_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tienda Admin API",
        version = "0.1.0",
        description = "Admin API for the Tienda storefront: product drafts, image uploads, and order listing. All endpoints live under /api/admin/."
    ),
    paths(
        handlers::products::list_products,
        handlers::products::get_product_draft,
        handlers::products::create_product,
        handlers::products::update_product,
        handlers::upload::upload_images,
        handlers::orders::list_orders,
        handlers::health::health_check,
    ),
    components(schemas(
        tienda_core::ProductDraft,
        tienda_core::FieldError,
        models::Product,
        models::ProductSummary,
        models::ProductCategory,
        models::Audience,
        models::Size,
        models::OrderSummary,
        handlers::upload::UploadResponse,
        handlers::upload::UploadFailure,
        handlers::health::HealthResponse,
        error::ErrorResponse,
    )),
    tags(
        (name = "products", description = "Product draft editing and listing"),
        (name = "upload", description = "Product image uploads"),
        (name = "orders", description = "Order listing"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
