use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

/// Read-only order summary for the admin dashboard listing.
///
/// The listing endpoint returns these sorted by `created_at` descending;
/// customer name and email come from the joined users table.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct OrderSummary {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub item_count: i32,
    pub total: Decimal,
    pub is_paid: bool,
    pub created_at: DateTime<Utc>,
}
