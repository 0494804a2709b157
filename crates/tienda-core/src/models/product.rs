use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

use crate::AppError;

/// Product category enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "product_category", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Shirts,
    Pants,
    Hoodies,
    Hats,
}

/// Target audience enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "product_audience", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    Men,
    Women,
    Kid,
    Unisex,
}

/// Garment size. Stored in Postgres as TEXT[] via Display/FromStr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Size {
    Xs,
    S,
    M,
    L,
    Xl,
    Xxl,
    Xxxl,
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Size::Xs => "XS",
            Size::S => "S",
            Size::M => "M",
            Size::L => "L",
            Size::Xl => "XL",
            Size::Xxl => "XXL",
            Size::Xxxl => "XXXL",
        };
        f.write_str(s)
    }
}

impl FromStr for Size {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "XS" => Ok(Size::Xs),
            "S" => Ok(Size::S),
            "M" => Ok(Size::M),
            "L" => Ok(Size::L),
            "XL" => Ok(Size::Xl),
            "XXL" => Ok(Size::Xxl),
            "XXXL" => Ok(Size::Xxxl),
            other => Err(AppError::InvalidInput(format!("Unknown size: {}", other))),
        }
    }
}

/// Persisted product record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub in_stock: i32,
    pub price: Decimal,
    pub category: ProductCategory,
    pub audience: Audience,
    pub sizes: Vec<Size>,
    pub tags: Vec<String>,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database row for the products table. Sizes are stored as TEXT[] and
/// parsed into `Size` when building the domain model.
#[derive(Debug)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct ProductRow {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub in_stock: i32,
    pub price: Decimal,
    pub category: ProductCategory,
    pub audience: Audience,
    pub sizes: Vec<String>,
    pub tags: Vec<String>,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductRow {
    /// Build a Product from this row, parsing the stored size labels.
    pub fn into_product(self) -> Result<Product, AppError> {
        let sizes = self
            .sizes
            .iter()
            .map(|s| Size::from_str(s))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AppError::Internal(format!("Corrupt size column: {}", e)))?;
        Ok(Product {
            id: self.id,
            title: self.title,
            slug: self.slug,
            description: self.description,
            in_stock: self.in_stock,
            price: self.price,
            category: self.category,
            audience: self.audience,
            sizes,
            tags: self.tags,
            images: self.images,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Listing-page summary: one row of the product table view.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductSummary {
    pub id: Uuid,
    /// First image reference, if any (listing thumbnail).
    pub image: Option<String>,
    pub title: String,
    pub slug: String,
    pub category: ProductCategory,
    pub audience: Audience,
    pub in_stock: i32,
    pub price: Decimal,
    pub sizes: Vec<Size>,
}

impl ProductSummary {
    pub fn from_product(product: &Product) -> Self {
        ProductSummary {
            id: product.id,
            image: product.images.first().cloned(),
            title: product.title.clone(),
            slug: product.slug.clone(),
            category: product.category,
            audience: product.audience,
            in_stock: product.in_stock,
            price: product.price,
            sizes: product.sizes.clone(),
        }
    }
}
