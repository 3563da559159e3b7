use axum_helpers::validation::not_blank;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use strum::EnumString;
use utoipa::ToSchema;
use validator::Validate;

/// A stored category.
///
/// Two categories are equal when their ids are equal.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "nameCategory", alias = "name")]
    pub name: String,
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Category {}

impl Hash for Category {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Category as sent by clients on create and update.
///
/// Also used as the nested category reference inside a product body, where
/// only `id` is read.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CategoryDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(
        default,
        rename = "nameCategory",
        alias = "name",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(
        required(message = "Category name is required."),
        custom(function = "not_blank", message = "Category name cannot be blank"),
        length(max = 100, message = "Category name must be between 1 and 100 characters")
    )]
    pub name: Option<String>,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: Some(category.id),
            name: Some(category.name),
        }
    }
}

/// What the repository writes: no id inserts, an id replaces that row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDraft {
    pub id: Option<i64>,
    pub name: String,
}

impl From<CategoryDto> for CategoryDraft {
    fn from(dto: CategoryDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name.unwrap_or_default(),
        }
    }
}

/// Fields a category listing can be sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum CategorySortField {
    #[default]
    Id,
    #[strum(serialize = "name", serialize = "nameCategory")]
    Name,
}

impl CategorySortField {
    /// Ascending comparison of two categories on this field.
    pub fn compare(self, a: &Category, b: &Category) -> Ordering {
        match self {
            CategorySortField::Id => a.id.cmp(&b.id),
            CategorySortField::Name => a.name.cmp(&b.name),
        }
    }
}
