//! Product domain entity

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Physical dimensions of a product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Dimensions {
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub depth: f64,
}

/// Customer review attached to a product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default)]
    pub rating: i32,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub reviewer_name: String,
    #[serde(default)]
    pub reviewer_email: String,
}

/// Bookkeeping metadata carried by catalog records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductMeta {
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub barcode: String,
    #[serde(default)]
    pub qr_code: String,
}

/// A catalog product.
///
/// Only `id` and `category` take part in filtering and pagination; every
/// other field is descriptive payload passed through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Repository-assigned identifier
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Category name, matched case-insensitively
    pub category: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub discount_percentage: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub dimensions: Dimensions,
    #[serde(default)]
    pub warranty_information: String,
    #[serde(default)]
    pub shipping_information: String,
    #[serde(default)]
    pub availability_status: String,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_order_quantity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ProductMeta>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// Default availability for freshly added products
pub const DEFAULT_AVAILABILITY: &str = "In Stock";

fn default_availability() -> String {
    DEFAULT_AVAILABILITY.to_string()
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some("must not be empty".into());
        return Err(err);
    }
    Ok(())
}

/// Body of an "add product" request.
///
/// Title, description, category, price and stock are mandatory; the rest
/// defaults to an empty listing.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    #[validate(custom(function = "not_blank"))]
    pub description: String,
    #[validate(custom(function = "not_blank"))]
    pub category: String,
    #[validate(range(exclusive_min = 0.0, message = "price must be positive"))]
    pub price: f64,
    #[validate(range(min = 0, message = "stock can't be negative"))]
    pub stock: i64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub discount_percentage: f64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub dimensions: Dimensions,
    #[serde(default)]
    pub warranty_information: String,
    #[serde(default)]
    pub shipping_information: String,
    #[serde(default = "default_availability")]
    pub availability_status: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl NewProduct {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        stock: i64,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category: category.into(),
            price,
            stock,
            rating: 0.0,
            discount_percentage: 0.0,
            tags: Vec::new(),
            brand: String::new(),
            sku: String::new(),
            weight: 0.0,
            dimensions: Dimensions::default(),
            warranty_information: String::new(),
            shipping_information: String::new(),
            availability_status: default_availability(),
            images: Vec::new(),
            thumbnail: None,
        }
    }

    /// Materialize the product under the id chosen by the repository.
    pub fn into_product(self, id: i64, created_at: String) -> Product {
        Product {
            id,
            title: self.title,
            description: self.description,
            category: self.category,
            price: self.price,
            discount_percentage: self.discount_percentage,
            rating: self.rating,
            stock: self.stock,
            tags: self.tags,
            brand: self.brand,
            sku: self.sku,
            weight: self.weight,
            dimensions: self.dimensions,
            warranty_information: self.warranty_information,
            shipping_information: self.shipping_information,
            availability_status: self.availability_status,
            reviews: Vec::new(),
            return_policy: None,
            minimum_order_quantity: None,
            meta: Some(ProductMeta {
                updated_at: created_at.clone(),
                created_at,
                ..ProductMeta::default()
            }),
            images: self.images,
            thumbnail: self.thumbnail,
        }
    }
}
