use axum_helpers::validation::not_blank;
use domain_categories::{Category, CategoryDto};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use strum::EnumString;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// A stored product with its category resolved.
///
/// Two products are equal when their ids are equal.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: i64,
    #[serde(default)]
    pub category: Option<Category>,
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Product {}

impl Hash for Product {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Product as sent by clients on create and update.
///
/// Of the nested category only `id` is used; the stored category is
/// attached in its place.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default)]
    #[validate(
        required(message = "Product name is required."),
        custom(function = "not_blank", message = "Product name cannot be blank"),
        length(max = 100, message = "Product name must be between 1 and 100 characters")
    )]
    pub name: Option<String>,

    #[serde(default)]
    #[validate(
        required(message = "Product description is required."),
        custom(function = "not_blank", message = "Product description cannot be blank"),
        length(
            max = 500,
            message = "Product description must be between 1 and 500 characters"
        )
    )]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(
        required(message = "Product price is required."),
        range(exclusive_min = 0.0, message = "Price must be greater than 0")
    )]
    pub price: Option<f64>,

    #[serde(default)]
    #[validate(
        required(message = "Product quantity is required."),
        range(min = 0, message = "Quantity must be greater than or equal to 0")
    )]
    pub quantity: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryDto>,
}

impl ProductDto {
    /// Id of the referenced category, if the body names one
    pub fn category_id(&self) -> Option<i64> {
        self.category.as_ref().and_then(|category| category.id)
    }
}

/// What the repository writes: no id inserts, an id replaces that row.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: i64,
    pub category_id: Option<i64>,
}

impl From<ProductDto> for ProductDraft {
    fn from(dto: ProductDto) -> Self {
        let category_id = dto.category_id();
        Self {
            id: dto.id,
            name: dto.name.unwrap_or_default(),
            description: dto.description.unwrap_or_default(),
            price: dto.price.unwrap_or_default(),
            quantity: dto.quantity.unwrap_or_default(),
            category_id,
        }
    }
}

/// Search criteria for `GET /api/products/filter`.
///
/// Every field is optional and each present one narrows the result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductFilter {
    /// Case-insensitive substring of the product name
    pub name: Option<String>,
    /// Case-insensitive substring of the product description
    pub description: Option<String>,
    /// Inclusive lower price bound
    #[serde(alias = "minPrice")]
    pub min_price: Option<f64>,
    /// Inclusive upper price bound
    #[serde(alias = "maxPrice")]
    pub max_price: Option<f64>,
    /// Inclusive lower quantity bound
    #[serde(alias = "minQuantity")]
    pub min_quantity: Option<i64>,
    /// Inclusive upper quantity bound
    #[serde(alias = "maxQuantity")]
    pub max_quantity: Option<i64>,
    /// Case-insensitive substring of the category name
    #[serde(alias = "categoryName")]
    pub category_name: Option<String>,
}

/// Fields a product listing can be sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum ProductSortField {
    #[default]
    Id,
    Name,
    Description,
    Price,
    Quantity,
}

impl ProductSortField {
    /// Ascending comparison of two products on this field.
    pub fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            ProductSortField::Id => a.id.cmp(&b.id),
            ProductSortField::Name => a.name.cmp(&b.name),
            ProductSortField::Description => a.description.cmp(&b.description),
            ProductSortField::Price => a.price.total_cmp(&b.price),
            ProductSortField::Quantity => a.quantity.cmp(&b.quantity),
        }
    }
}
