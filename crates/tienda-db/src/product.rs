use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use tienda_core::models::{Product, ProductRow, ProductSummary};
use tienda_core::{AppError, ProductDraft};

/// Repository for the products table: fetch-by-slug, fetch-all, create,
/// update. Domain models returned by this repository carry parsed sizes;
/// the raw TEXT[] columns stay inside [`ProductRow`].
#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

/// Unique constraint protecting the slug column (see migrations).
const SLUG_UNIQUE_CONSTRAINT: &str = "products_slug_key";

fn size_labels(draft: &ProductDraft) -> Vec<String> {
    draft.sizes.iter().map(|s| s.to_string()).collect()
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch one product by its slug.
    #[tracing::instrument(skip(self), fields(db.table = "products", db.operation = "select"))]
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Product>, AppError> {
        let row: Option<ProductRow> = sqlx::query_as::<Postgres, ProductRow>(
            r#"
            SELECT id, title, slug, description, in_stock, price,
                   category, audience, sizes, tags, images,
                   created_at, updated_at
            FROM products
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ProductRow::into_product).transpose()
    }

    /// All products as listing summaries, newest first.
    #[tracing::instrument(skip(self), fields(db.table = "products", db.operation = "select"))]
    pub async fn list(&self) -> Result<Vec<ProductSummary>, AppError> {
        let rows: Vec<ProductRow> = sqlx::query_as::<Postgres, ProductRow>(
            r#"
            SELECT id, title, slug, description, in_stock, price,
                   category, audience, sizes, tags, images,
                   created_at, updated_at
            FROM products
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut summaries = Vec::with_capacity(rows.len());
        for row in rows {
            let product = row.into_product()?;
            summaries.push(ProductSummary::from_product(&product));
        }
        Ok(summaries)
    }

    /// Insert a new product from a validated draft. A slug collision maps
    /// to [`AppError::Conflict`] so the form can surface it as retryable
    /// user input rather than a server fault.
    #[tracing::instrument(
        skip(self, draft),
        fields(db.table = "products", db.operation = "insert", slug = %draft.slug)
    )]
    pub async fn create(&self, draft: &ProductDraft) -> Result<Product, AppError> {
        let id = Uuid::new_v4();
        let now = chrono::Utc::now();

        let row: ProductRow = sqlx::query_as::<Postgres, ProductRow>(
            r#"
            INSERT INTO products (
                id, title, slug, description, in_stock, price,
                category, audience, sizes, tags, images,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12)
            RETURNING id, title, slug, description, in_stock, price,
                      category, audience, sizes, tags, images,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&draft.title)
        .bind(&draft.slug)
        .bind(&draft.description)
        .bind(draft.in_stock)
        .bind(draft.price)
        .bind(draft.category)
        .bind(draft.audience)
        .bind(size_labels(draft))
        .bind(&draft.tags)
        .bind(&draft.images)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.constraint() == Some(SLUG_UNIQUE_CONSTRAINT) => {
                AppError::Conflict(format!("Slug '{}' is already in use", draft.slug))
            }
            _ => AppError::from(e),
        })?;

        row.into_product()
    }

    /// Update an existing product with the full draft payload.
    #[tracing::instrument(
        skip(self, draft),
        fields(db.table = "products", db.operation = "update", product_id = %id)
    )]
    pub async fn update(&self, id: Uuid, draft: &ProductDraft) -> Result<Product, AppError> {
        let now = chrono::Utc::now();

        let row: Option<ProductRow> = sqlx::query_as::<Postgres, ProductRow>(
            r#"
            UPDATE products
            SET title = $2, slug = $3, description = $4, in_stock = $5,
                price = $6, category = $7, audience = $8, sizes = $9,
                tags = $10, images = $11, updated_at = $12
            WHERE id = $1
            RETURNING id, title, slug, description, in_stock, price,
                      category, audience, sizes, tags, images,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&draft.title)
        .bind(&draft.slug)
        .bind(&draft.description)
        .bind(draft.in_stock)
        .bind(draft.price)
        .bind(draft.category)
        .bind(draft.audience)
        .bind(size_labels(draft))
        .bind(&draft.tags)
        .bind(&draft.images)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.constraint() == Some(SLUG_UNIQUE_CONSTRAINT) => {
                AppError::Conflict(format!("Slug '{}' is already in use", draft.slug))
            }
            _ => AppError::from(e),
        })?;

        match row {
            Some(row) => row.into_product(),
            None => Err(AppError::NotFound(format!("Product {} not found", id))),
        }
    }
}
