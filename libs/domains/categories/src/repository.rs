use async_trait::async_trait;
use axum_helpers::{Page, Pageable};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{CategoryError, CategoryResult};
use crate::models::{Category, CategoryDraft, CategorySortField};

/// Repository trait for Category persistence
///
/// `exists_by_id(id)` is true exactly when `find_by_id(id)` returns `Some`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> CategoryResult<Option<Category>>;

    /// One page of categories in the requested order, ties broken by id
    async fn find_all_paged(
        &self,
        pageable: Pageable<CategorySortField>,
    ) -> CategoryResult<Page<Category>>;

    async fn exists_by_id(&self, id: i64) -> CategoryResult<bool>;

    /// Insert when the draft has no id, otherwise replace that row.
    ///
    /// Replacing an id that is not stored fails with `CategoryError::NotFound`.
    async fn save(&self, draft: CategoryDraft) -> CategoryResult<Category>;

    /// Hard delete. A missing id is not an error.
    async fn delete_by_id(&self, id: i64) -> CategoryResult<()>;
}

/// Sorts categories by the requested fields, falling back to id order.
pub fn sort_categories(categories: &mut [Category], pageable: &Pageable<CategorySortField>) {
    categories.sort_by(|a, b| {
        pageable
            .sort
            .iter()
            .map(|order| order.direction.apply(order.field.compare(a, b)))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| a.id.cmp(&b.id))
    });
}

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    categories: BTreeMap<i64, Category>,
}

/// In-memory implementation of CategoryRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCategoryRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn find_by_id(&self, id: i64) -> CategoryResult<Option<Category>> {
        let store = self.store.read().await;
        Ok(store.categories.get(&id).cloned())
    }

    async fn find_all_paged(
        &self,
        pageable: Pageable<CategorySortField>,
    ) -> CategoryResult<Page<Category>> {
        let store = self.store.read().await;
        let mut categories: Vec<Category> = store.categories.values().cloned().collect();
        sort_categories(&mut categories, &pageable);
        Ok(Page::from_sorted(categories, &pageable))
    }

    async fn exists_by_id(&self, id: i64) -> CategoryResult<bool> {
        let store = self.store.read().await;
        Ok(store.categories.contains_key(&id))
    }

    async fn save(&self, draft: CategoryDraft) -> CategoryResult<Category> {
        let mut store = self.store.write().await;

        let id = match draft.id {
            Some(id) if store.categories.contains_key(&id) => id,
            Some(id) => return Err(CategoryError::NotFound(id)),
            None => {
                store.next_id += 1;
                store.next_id
            }
        };

        let category = Category {
            id,
            name: draft.name,
        };
        store.categories.insert(id, category.clone());
        Ok(category)
    }

    async fn delete_by_id(&self, id: i64) -> CategoryResult<()> {
        let mut store = self.store.write().await;
        store.categories.remove(&id);
        Ok(())
    }
}
