use sqlx::{PgPool, Postgres};

use tienda_core::models::OrderSummary;
use tienda_core::AppError;

/// Read-only repository for the admin order listing.
#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All orders with the customer joined in, newest first.
    #[tracing::instrument(skip(self), fields(db.table = "orders", db.operation = "select"))]
    pub async fn list(&self) -> Result<Vec<OrderSummary>, AppError> {
        let orders: Vec<OrderSummary> = sqlx::query_as::<Postgres, OrderSummary>(
            r#"
            SELECT o.id,
                   u.name AS customer_name,
                   u.email AS customer_email,
                   o.item_count,
                   o.total,
                   o.is_paid,
                   o.created_at
            FROM orders o
            JOIN users u ON u.id = o.user_id
            ORDER BY o.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }
}
