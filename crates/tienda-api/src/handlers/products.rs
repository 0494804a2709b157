//! Product CRUD handlers.
//!
//! The edit page fetches a draft by slug (the literal slug `new` yields a
//! blank one), then POSTs a new draft or PUTs an update. Validation runs
//! server-side with the same rules the form applies, so a hand-crafted
//! request cannot bypass them.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tienda_core::models::ProductSummary;
use tienda_core::{AppError, ProductDraft};
use uuid::Uuid;

use crate::constants::NEW_DRAFT_SLUG;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::services::editor::{ProductEditorService, StorageUploader, SubmitOutcome};
use crate::state::AppState;

fn editing_session(
    state: &AppState,
    draft: ProductDraft,
) -> ProductEditorService<tienda_db::ProductRepository, StorageUploader> {
    ProductEditorService::new(
        state.db.product_repository.clone(),
        StorageUploader::new(state.assets.storage.clone()),
        draft,
    )
}

#[utoipa::path(
    get,
    path = "/api/admin/products",
    tag = "products",
    responses(
        (status = 200, description = "All products, newest first", body = [ProductSummary]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let products = state.db.product_repository.list().await?;
    Ok(Json(products))
}

#[utoipa::path(
    get,
    path = "/api/admin/products/{slug}",
    tag = "products",
    params(
        ("slug" = String, Path, description = "Product slug, or `new` for a blank draft")
    ),
    responses(
        (status = 200, description = "Editable draft of the product", body = ProductDraft),
        (status = 404, description = "No product with this slug", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_product_draft(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    if slug == NEW_DRAFT_SLUG {
        return Ok(Json(ProductDraft::blank()));
    }

    let product = state
        .db
        .product_repository
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product '{}' not found", slug)))?;

    Ok(Json(ProductDraft::from_product(&product)))
}

#[utoipa::path(
    post,
    path = "/api/admin/products",
    tag = "products",
    request_body = ProductDraft,
    responses(
        (status = 201, description = "Product created", body = ProductDraft),
        (status = 400, description = "Draft failed validation", body = ErrorResponse),
        (status = 409, description = "Slug already in use", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    ValidatedJson(draft): ValidatedJson<ProductDraft>,
) -> Result<impl IntoResponse, HttpAppError> {
    if draft.id.is_some() {
        return Err(HttpAppError(AppError::BadRequest(
            "A new product must not carry an id; use PUT to update".to_string(),
        )));
    }

    let mut session = editing_session(&state, draft);
    match session.submit().await? {
        SubmitOutcome::Created(product) => {
            tracing::info!(slug = %product.slug, "Product created");
            Ok((
                StatusCode::CREATED,
                Json(ProductDraft::from_product(&product)),
            ))
        }
        SubmitOutcome::Rejected(rejection) => Err(HttpAppError(rejection.into())),
        other => Err(HttpAppError(AppError::Internal(format!(
            "Unexpected submit outcome: {:?}",
            other
        )))),
    }
}

#[utoipa::path(
    put,
    path = "/api/admin/products/{id}",
    tag = "products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = ProductDraft,
    responses(
        (status = 200, description = "Product updated", body = ProductDraft),
        (status = 400, description = "Draft failed validation", body = ErrorResponse),
        (status = 404, description = "No product with this id", body = ErrorResponse),
        (status = 409, description = "Slug already in use", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    ValidatedJson(draft): ValidatedJson<ProductDraft>,
) -> Result<impl IntoResponse, HttpAppError> {
    if let Some(body_id) = draft.id {
        if body_id != id {
            return Err(HttpAppError(AppError::BadRequest(
                "Body id does not match path id".to_string(),
            )));
        }
    }

    let mut draft = draft;
    draft.id = Some(id);
    let mut session = editing_session(&state, draft);
    match session.submit().await? {
        SubmitOutcome::Updated(product) => {
            tracing::info!(product_id = %id, slug = %product.slug, "Product updated");
            Ok(Json(ProductDraft::from_product(&product)))
        }
        SubmitOutcome::Rejected(rejection) => Err(HttpAppError(rejection.into())),
        other => Err(HttpAppError(AppError::Internal(format!(
            "Unexpected submit outcome: {:?}",
            other
        )))),
    }
}
