use async_trait::async_trait;
use axum_helpers::{Page, Pageable};
use domain_categories::{CategoryRepository, InMemoryCategoryRepository};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductDraft, ProductFilter, ProductSortField};

/// Repository trait for Product persistence
///
/// Products come back with their category joined. `exists_by_id(id)` is
/// true exactly when `find_by_id(id)` returns `Some`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>>;

    /// One page of products in the requested order, ties broken by id
    async fn find_all_paged(
        &self,
        pageable: Pageable<ProductSortField>,
    ) -> ProductResult<Page<Product>>;

    /// Like `find_all_paged`, restricted to products matching every
    /// predicate of the filter
    async fn find_all_filtered(
        &self,
        filter: ProductFilter,
        pageable: Pageable<ProductSortField>,
    ) -> ProductResult<Page<Product>>;

    async fn exists_by_id(&self, id: i64) -> ProductResult<bool>;

    /// Insert when the draft has no id, otherwise replace that row.
    ///
    /// A category id that no longer exists is stored as no category.
    /// Replacing an id that is not stored fails with `ProductError::NotFound`.
    async fn save(&self, draft: ProductDraft) -> ProductResult<Product>;

    /// Hard delete. A missing id is not an error.
    async fn delete_by_id(&self, id: i64) -> ProductResult<()>;
}

/// Sorts products by the requested fields, falling back to id order.
pub fn sort_products(products: &mut [Product], pageable: &Pageable<ProductSortField>) {
    products.sort_by(|a, b| {
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
    rows: BTreeMap<i64, ProductDraft>,
}

/// In-memory implementation of ProductRepository (for development/testing)
///
/// Category references are resolved against the given category repository
/// on every read, so deleting a category detaches it from its products.
#[derive(Debug, Clone)]
pub struct InMemoryProductRepository {
    store: Arc<RwLock<Store>>,
    categories: InMemoryCategoryRepository,
}

impl InMemoryProductRepository {
    pub fn new(categories: InMemoryCategoryRepository) -> Self {
        Self {
            store: Arc::new(RwLock::new(Store::default())),
            categories,
        }
    }

    async fn hydrate(&self, id: i64, row: &ProductDraft) -> ProductResult<Product> {
        let category = match row.category_id {
            Some(category_id) => self.categories.find_by_id(category_id).await?,
            None => None,
        };

        Ok(Product {
            id,
            name: row.name.clone(),
            description: row.description.clone(),
            price: row.price,
            quantity: row.quantity,
            category,
        })
    }

    async fn all(&self) -> ProductResult<Vec<Product>> {
        let store = self.store.read().await;
        let mut products = Vec::with_capacity(store.rows.len());
        for (id, row) in &store.rows {
            products.push(self.hydrate(*id, row).await?);
        }
        Ok(products)
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let store = self.store.read().await;
        match store.rows.get(&id) {
            Some(row) => Ok(Some(self.hydrate(id, row).await?)),
            None => Ok(None),
        }
    }

    async fn find_all_paged(
        &self,
        pageable: Pageable<ProductSortField>,
    ) -> ProductResult<Page<Product>> {
        let mut products = self.all().await?;
        sort_products(&mut products, &pageable);
        Ok(Page::from_sorted(products, &pageable))
    }

    async fn find_all_filtered(
        &self,
        filter: ProductFilter,
        pageable: Pageable<ProductSortField>,
    ) -> ProductResult<Page<Product>> {
        let predicates = filter.predicates();
        let mut products: Vec<Product> = self
            .all()
            .await?
            .into_iter()
            .filter(|product| predicates.iter().all(|p| p.matches(product)))
            .collect();
        sort_products(&mut products, &pageable);
        Ok(Page::from_sorted(products, &pageable))
    }

    async fn exists_by_id(&self, id: i64) -> ProductResult<bool> {
        let store = self.store.read().await;
        Ok(store.rows.contains_key(&id))
    }

    async fn save(&self, draft: ProductDraft) -> ProductResult<Product> {
        let category_id = match draft.category_id {
            Some(category_id) if self.categories.exists_by_id(category_id).await? => {
                Some(category_id)
            }
            _ => None,
        };

        let mut store = self.store.write().await;
        let id = match draft.id {
            Some(id) if store.rows.contains_key(&id) => id,
            Some(id) => return Err(ProductError::NotFound(id)),
            None => {
                store.next_id += 1;
                store.next_id
            }
        };

        let row = ProductDraft {
            id: Some(id),
            category_id,
            ..draft
        };
        store.rows.insert(id, row.clone());
        drop(store);

        self.hydrate(id, &row).await
    }

    async fn delete_by_id(&self, id: i64) -> ProductResult<()> {
        let mut store = self.store.write().await;
        store.rows.remove(&id);
        Ok(())
    }
}
