//! Product search predicates.
//!
//! A [`ProductFilter`] turns into one [`ProductPredicate`] per present field.
//! Each predicate renders as a SQL condition for the Postgres repository and
//! evaluates directly against a [`Product`] for the in-memory one; both
//! readings agree. The predicates of a filter are joined with AND, and an
//! empty filter matches every product.

use domain_categories::entity as category;
use sea_orm::ColumnTrait;
use sea_orm::sea_query::{Condition, Expr, ExprTrait, Func, IntoIden};

use crate::entity;
use crate::models::{Product, ProductFilter};

#[derive(Debug, Clone, PartialEq)]
pub enum ProductPredicate {
    /// Name contains the (lowercased) needle
    NameContains(String),
    DescriptionContains(String),
    MinPrice(f64),
    MaxPrice(f64),
    MinQuantity(i64),
    MaxQuantity(i64),
    /// Category name contains the needle; uncategorised products never match
    CategoryNameContains(String),
}

impl ProductPredicate {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            ProductPredicate::NameContains(needle) => contains(&product.name, needle),
            ProductPredicate::DescriptionContains(needle) => {
                contains(&product.description, needle)
            }
            ProductPredicate::MinPrice(min) => product.price >= *min,
            ProductPredicate::MaxPrice(max) => product.price <= *max,
            ProductPredicate::MinQuantity(min) => product.quantity >= *min,
            ProductPredicate::MaxQuantity(max) => product.quantity <= *max,
            ProductPredicate::CategoryNameContains(needle) => product
                .category
                .as_ref()
                .is_some_and(|category| contains(&category.name, needle)),
        }
    }

    /// SQL form of the predicate.
    ///
    /// The category predicate refers to the `categories` table, so the query
    /// must join it.
    pub fn to_condition(&self) -> Condition {
        let condition = Condition::all();
        match self {
            ProductPredicate::NameContains(needle) => {
                lower_like(entity::Entity, entity::Column::Name, needle)
            }
            ProductPredicate::DescriptionContains(needle) => {
                lower_like(entity::Entity, entity::Column::Description, needle)
            }
            ProductPredicate::MinPrice(min) => condition.add(entity::Column::Price.gte(*min)),
            ProductPredicate::MaxPrice(max) => condition.add(entity::Column::Price.lte(*max)),
            ProductPredicate::MinQuantity(min) => {
                condition.add(entity::Column::Quantity.gte(*min))
            }
            ProductPredicate::MaxQuantity(max) => {
                condition.add(entity::Column::Quantity.lte(*max))
            }
            ProductPredicate::CategoryNameContains(needle) => {
                lower_like(category::Entity, category::Column::Name, needle)
            }
        }
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// `LOWER(table.column) LIKE '%needle%'`; the needle is already lowercase.
fn lower_like<T, C>(table: T, column: C, needle: &str) -> Condition
where
    T: IntoIden + 'static,
    C: IntoIden + 'static,
{
    let pattern = format!("%{}%", escape_like(needle));
    Condition::all().add(Expr::expr(Func::lower(Expr::col((table, column)))).like(pattern))
}

/// Escapes LIKE metacharacters so they match literally.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl ProductFilter {
    /// One predicate per present field, in declaration order.
    pub fn predicates(&self) -> Vec<ProductPredicate> {
        let needle = |value: &Option<String>| value.as_ref().map(|v| v.to_lowercase());

        let mut predicates = Vec::new();
        if let Some(name) = needle(&self.name) {
            predicates.push(ProductPredicate::NameContains(name));
        }
        if let Some(description) = needle(&self.description) {
            predicates.push(ProductPredicate::DescriptionContains(description));
        }
        if let Some(min) = self.min_price {
            predicates.push(ProductPredicate::MinPrice(min));
        }
        if let Some(max) = self.max_price {
            predicates.push(ProductPredicate::MaxPrice(max));
        }
        if let Some(min) = self.min_quantity {
            predicates.push(ProductPredicate::MinQuantity(min));
        }
        if let Some(max) = self.max_quantity {
            predicates.push(ProductPredicate::MaxQuantity(max));
        }
        if let Some(category_name) = needle(&self.category_name) {
            predicates.push(ProductPredicate::CategoryNameContains(category_name));
        }
        predicates
    }

    /// Conjunction of every predicate; empty when no field is set.
    pub fn condition(&self) -> Condition {
        self.predicates()
            .iter()
            .fold(Condition::all(), |condition, predicate| {
                condition.add(predicate.to_condition())
            })
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.predicates()
            .iter()
            .all(|predicate| predicate.matches(product))
    }
}
